//! On-screen-display drivers

pub mod max7456;
pub mod registers;
pub mod transport;

#[cfg(test)]
mod scenarios;
#[cfg(test)]
pub(crate) mod sim;

pub use max7456::{Max7456, OsdError};
pub use registers::{reg, DisplayMemoryMode, Register, RowBrightness, VideoMode0, VideoMode1};
pub use transport::{RegisterBus, SpiTransport};
