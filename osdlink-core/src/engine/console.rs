//! Serial command console
//!
//! Reads NUL-terminated lines from the host, dispatches each one and
//! writes the response. A receive timeout closes a partial line the same
//! way a terminator would.

use osdlink_hal::{Clock, UartRx, UartTx};
use osdlink_protocol::{LineReader, Response, Status, FRAME_TERMINATOR};

use super::dispatcher::Dispatcher;
use crate::config::SerialConfig;
use crate::traits::OsdDisplay;

/// Written once when the console starts
pub const BANNER: &[u8] = b"OSD_INIT\r\n";

/// Serial link failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError<R, T> {
    /// Receive side failed
    Rx(R),
    /// Transmit side failed
    Tx(T),
}

/// Line-oriented command console over a UART pair
pub struct Console<RX, TX> {
    rx: RX,
    tx: TX,
    reader: LineReader,
    truncated: u32,
}

impl<RX, TX> Console<RX, TX>
where
    RX: UartRx,
    TX: UartTx,
{
    /// Create a console
    pub fn new(rx: RX, tx: TX, config: &SerialConfig) -> Self {
        Self {
            rx,
            tx,
            reader: LineReader::with_line_len(usize::from(config.line_len)),
            truncated: 0,
        }
    }

    /// Write the startup banner
    pub fn announce(&mut self) -> Result<(), ConsoleError<RX::Error, TX::Error>> {
        self.tx.write_blocking(BANNER).map_err(ConsoleError::Tx)?;
        self.tx.flush().map_err(ConsoleError::Tx)
    }

    /// Receive one byte and run the command it completes, if any
    ///
    /// Returns the status of the executed command, or `None` while a line
    /// is still being collected.
    pub fn poll<D, C>(
        &mut self,
        osd: &mut D,
        clock: &C,
    ) -> Result<Option<Status>, ConsoleError<RX::Error, TX::Error>>
    where
        D: OsdDisplay,
        Status: From<D::Error>,
        C: Clock,
    {
        let line = match self.rx.read_byte().map_err(ConsoleError::Rx)? {
            Some(byte) => self.reader.feed(byte),
            None => self.reader.timeout(),
        };

        let Some(line) = line else {
            return Ok(None);
        };

        if line.truncated {
            self.truncated = self.truncated.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::debug!("Line cut to {} bytes", line.data.len());
        }

        let response = Dispatcher::new(osd, clock).dispatch(line.as_bytes());
        self.respond(&response)?;
        Ok(Some(response.status))
    }

    /// Lines that overflowed the configured length and were cut short
    pub fn truncated_lines(&self) -> u32 {
        self.truncated
    }

    /// Release the UART halves
    pub fn into_parts(self) -> (RX, TX) {
        (self.rx, self.tx)
    }

    fn respond(&mut self, response: &Response) -> Result<(), ConsoleError<RX::Error, TX::Error>> {
        if !response.payload.is_empty() {
            self.tx
                .write_blocking(&response.payload)
                .map_err(ConsoleError::Tx)?;
        }
        self.tx
            .write_blocking(&[FRAME_TERMINATOR, response.status.to_byte()])
            .map_err(ConsoleError::Tx)?;
        self.tx.flush().map_err(ConsoleError::Tx)
    }
}
