//! Console task
//!
//! Runs the blocking command console: one byte (or one receive timeout)
//! per poll, yielding to the executor in between so the watchdog task
//! keeps running.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;

use osdlink_core::engine::{Console, ConsoleError};
use osdlink_core::traits::OsdDisplay;
use osdlink_drivers::osd::{Max7456, SpiTransport};
use osdlink_protocol::Status;

use crate::channels::CONSOLE_ALIVE;
use crate::serial::{SerialRx, SerialTx, Uptime};

/// MAX7456 on SPI0 with a dedicated chip select
pub type Osd = Max7456<
    SpiTransport<ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, Delay>>,
    Delay,
>;

/// Console over the buffered host UART
pub type HostLink = Console<SerialRx<BufferedUartRx>, SerialTx<BufferedUartTx>>;

#[embassy_executor::task]
pub async fn console_task(mut console: HostLink, mut osd: Osd) {
    info!("Console task started");

    match osd.reset() {
        Ok(()) => info!("OSD ready, {} rows", osd.grid().rows()),
        Err(e) => error!("OSD reset failed: {:?}", Debug2Format(&e)),
    }

    if let Err(e) = console.announce() {
        warn!("Banner not sent: {:?}", e);
    }

    let clock = Uptime;
    let mut truncated = 0;

    loop {
        match console.poll(&mut osd, &clock) {
            Ok(Some(status)) => {
                if console.truncated_lines() != truncated {
                    truncated = console.truncated_lines();
                    warn!("Command line overflowed, {} so far", truncated);
                }
                if status != Status::Ok {
                    debug!("Command failed: {:?}", status);
                }
            }
            Ok(None) => {}
            Err(ConsoleError::Rx(e)) => warn!("UART RX error: {:?}", e),
            Err(ConsoleError::Tx(e)) => warn!("UART TX error: {:?}", e),
        }

        CONSOLE_ALIVE.signal(());
        yield_now().await;
    }
}
