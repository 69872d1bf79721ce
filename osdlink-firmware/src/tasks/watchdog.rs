//! Watchdog task
//!
//! Feeds the hardware watchdog only while the console keeps reporting
//! progress. A console stuck on the SPI bus stops the heartbeat and the
//! chip resets.

use defmt::*;
use embassy_rp::watchdog::Watchdog;
use embassy_time::{with_timeout, Duration};

use crate::channels::CONSOLE_ALIVE;

/// Hardware timeout (the RP2040 maximum is about 8.3 s)
pub const WATCHDOG_TIMEOUT: Duration = Duration::from_secs(8);

/// Longest silence from the console before feeding stops
const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(2);

#[embassy_executor::task]
pub async fn watchdog_task(mut watchdog: Watchdog) {
    info!("Watchdog task started ({} ms)", WATCHDOG_TIMEOUT.as_millis());
    watchdog.start(WATCHDOG_TIMEOUT);

    let mut starving = false;
    loop {
        match with_timeout(HEARTBEAT_TIMEOUT, CONSOLE_ALIVE.wait()).await {
            Ok(()) => {
                if starving {
                    info!("Console heartbeat back");
                    starving = false;
                }
                watchdog.feed();
            }
            Err(_) => {
                if !starving {
                    warn!("Console heartbeat lost, watchdog will fire");
                    starving = true;
                }
            }
        }
    }
}
