//! Register transport
//!
//! Each call is exactly one chip-select bracket on the bus. Nothing is
//! buffered or retried.

use embedded_hal::spi::{Operation, SpiDevice};

use super::registers::READ_PROBE;

/// Byte-wide register access
pub trait RegisterBus {
    /// Error type for bus transfers
    type Error;

    /// Write `data` to `address`
    fn poke(&mut self, address: u8, data: u8) -> Result<(), Self::Error>;

    /// Read the register at `address`
    fn peek(&mut self, address: u8) -> Result<u8, Self::Error>;

    /// Send `data` then `terminator` inside a single held transaction
    fn stream(&mut self, data: &[u8], terminator: u8) -> Result<(), Self::Error>;
}

/// [`RegisterBus`] over an SPI device
///
/// The device owns chip select; one `SpiDevice` transaction is one
/// register access.
pub struct SpiTransport<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> SpiTransport<SPI> {
    /// Wrap an SPI device
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Release the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> RegisterBus for SpiTransport<SPI> {
    type Error = SPI::Error;

    fn poke(&mut self, address: u8, data: u8) -> Result<(), Self::Error> {
        self.spi.write(&[address, data])
    }

    fn peek(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut frame = [address, READ_PROBE];
        self.spi.transfer_in_place(&mut frame)?;
        Ok(frame[1])
    }

    fn stream(&mut self, data: &[u8], terminator: u8) -> Result<(), Self::Error> {
        self.spi
            .transaction(&mut [Operation::Write(data), Operation::Write(&[terminator])])
    }
}
