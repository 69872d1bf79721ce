//! On-screen-display driver trait
//!
//! Implemented by the MAX7456 driver in `osdlink-drivers` and by in-memory
//! fakes in tests.

use crate::osd::{CharAttributes, CursorPosition, Grid};
use crate::state::DeviceState;

/// Horizontal offset range in pixels
pub const HORIZONTAL_OFFSET_RANGE: (i32, i32) = (-32, 31);

/// Vertical offset range in lines
pub const VERTICAL_OFFSET_RANGE: (i32, i32) = (-15, 16);

/// Trait for character overlay devices
///
/// The driver owns the cursor and the persisted character attributes.
/// Every character write advances the cursor by one cell.
pub trait OsdDisplay {
    /// Error type for device operations
    type Error;

    /// Write the default register set
    ///
    /// Idempotent.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Soft-reset the chip, wait for completion and reinitialize
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Clear display memory and home the cursor
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Current lifecycle state
    fn state(&self) -> DeviceState;

    /// Usable cursor bounds
    fn grid(&self) -> Grid;

    /// Current cursor cell
    fn cursor(&self) -> CursorPosition;

    /// Move the cursor, saturating into the grid
    fn set_cursor(&mut self, x: i32, y: i32);

    /// Write one character at the cursor
    fn write_char(&mut self, c: u8) -> Result<(), Self::Error>;

    /// Write a string through the chip's auto-increment mode
    ///
    /// Wrapped rows start at column 0 regardless of the grid margin.
    fn write_string(&mut self, text: &[u8]) -> Result<(), Self::Error>;

    /// Write a string one character at a time
    fn write_string_slow(&mut self, text: &[u8]) -> Result<(), Self::Error>;

    /// Read back the character stored at `(x, y)`
    fn read_display(&mut self, x: u8, y: u8) -> Result<u8, Self::Error>;

    /// Shift the overlay; values are clamped into the offset ranges
    fn offset(&mut self, horizontal: i32, vertical: i32) -> Result<(), Self::Error>;

    /// Persisted attributes applied to subsequent writes
    fn attributes(&self) -> CharAttributes;

    /// Toggle blink for subsequent writes
    fn blink(&mut self, on: bool);

    /// Toggle inversion for subsequent writes
    fn invert(&mut self, on: bool);

    /// Toggle the gray local background for subsequent writes
    fn local_background(&mut self, on: bool);

    /// Turn the overlay on or off
    fn display(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Read the status register
    fn status(&mut self) -> Result<u8, Self::Error>;

    /// Read video-mode registers 0 and 1
    fn video_modes(&mut self) -> Result<(u8, u8), Self::Error>;
}
