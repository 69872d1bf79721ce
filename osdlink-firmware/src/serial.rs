//! Host link adapters
//!
//! Bridges the blocking `embedded_io` side of the RP2040 buffered UART to
//! the `osdlink-hal` traits the console is written against. The UART
//! interrupt keeps filling the ring buffer while the console task waits.

use embassy_time::{block_for, Duration, Instant};
use embedded_io::{Read, ReadReady, Write};

use osdlink_hal::{Clock, UartRx, UartTx};

/// Spacing between receive-buffer checks, under one byte time at 115200 baud
const READY_POLL: Duration = Duration::from_micros(50);

/// Receive half with a quiet-link timeout
///
/// Blocks the executor for at most the timeout per read, well inside the
/// 2 s watchdog heartbeat window.
pub struct SerialRx<R> {
    rx: R,
    timeout: Duration,
}

impl<R> SerialRx<R> {
    pub fn new(rx: R, timeout_ms: u32) -> Self {
        Self {
            rx,
            timeout: Duration::from_millis(u64::from(timeout_ms)),
        }
    }
}

impl<R: Read + ReadReady> UartRx for SerialRx<R> {
    type Error = R::Error;

    /// Waits up to the configured timeout for data, then returns `Ok(0)`
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        let deadline = Instant::now() + self.timeout;
        loop {
            if self.rx.read_ready()? {
                return self.rx.read(buf);
            }
            if Instant::now() >= deadline {
                return Ok(0);
            }
            block_for(READY_POLL);
        }
    }
}

/// Transmit half
pub struct SerialTx<W> {
    tx: W,
}

impl<W> SerialTx<W> {
    pub fn new(tx: W) -> Self {
        Self { tx }
    }
}

impl<W: Write> UartTx for SerialTx<W> {
    type Error = W::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.flush()
    }
}

/// Milliseconds since boot from the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct Uptime;

impl Clock for Uptime {
    fn millis(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
