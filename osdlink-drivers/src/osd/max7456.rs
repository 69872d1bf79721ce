//! MAX7456 on-screen-display driver
//!
//! The MAX7456 overlays a 30-column character grid on composite video.
//! Display memory holds one character index per cell plus a parallel
//! attribute plane (blink, invert, local background).
//!
//! # Character writes
//!
//! Two strategies are provided:
//!
//! - Slow path: one DMM/DMAH/DMAL/DMDI sequence per character. The logical
//!   cursor decides every address, so grid margins are honored on wrap.
//! - Bulk path: address set once, the chip's auto-increment counter takes
//!   over and the whole string is streamed in one transaction. The chip
//!   counter runs linearly, so a left margin is not honored on wrapped rows.
//!
//! # Completion polls
//!
//! Reset and clear are acknowledged by the chip clearing a bit. Both polls
//! are bounded by [`PollConfig`]; exhaustion yields [`OsdError::Timeout`].

use embedded_hal::delay::DelayNs;
use osdlink_core::config::{OsdConfig, PollConfig, VideoStandard};
use osdlink_core::osd::{CharAttributes, Cursor, CursorPosition, Grid, GRID_CAPACITY, MAX_ROWS};
use osdlink_core::state::{DeviceEvent, DeviceState};
use osdlink_core::traits::osd::{HORIZONTAL_OFFSET_RANGE, VERTICAL_OFFSET_RANGE};
use osdlink_core::traits::OsdDisplay;
use osdlink_protocol::Status;

use super::registers::{
    reg, DisplayMemoryMode, Register, RowBrightness, VideoMode0, VideoMode1, AUTO_INCREMENT_END,
    DMAH_ATTRIBUTE_PLANE, OSDBL_AUTO_DISABLE,
};
use super::transport::RegisterBus;

/// Errors from OSD operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OsdError<E> {
    /// Bus transfer failed
    Bus(E),
    /// Reset or clear did not complete within the poll budget
    Timeout,
    /// String longer than display memory
    StringTooLong,
    /// String contains the auto-increment terminator byte
    ReservedByte,
}

impl<E> From<OsdError<E>> for Status {
    fn from(e: OsdError<E>) -> Self {
        match e {
            OsdError::Bus(_) => Status::Io,
            OsdError::Timeout => Status::Timeout,
            OsdError::StringTooLong => Status::OutOfRange,
            OsdError::ReservedByte => Status::Malformed,
        }
    }
}

/// MAX7456 driver
///
/// Owns the register bus, the cursor and the persisted character
/// attributes.
pub struct Max7456<B, D> {
    bus: B,
    delay: D,
    standard: VideoStandard,
    poll: PollConfig,
    cursor: Cursor,
    attributes: CharAttributes,
    offset: (i8, i8),
    state: DeviceState,
}

impl<B, D> Max7456<B, D>
where
    B: RegisterBus,
    D: DelayNs,
{
    /// Create a driver; nothing is written until [`OsdDisplay::initialize`]
    /// or [`OsdDisplay::reset`]
    pub fn new(bus: B, delay: D, config: &OsdConfig) -> Self {
        Self {
            bus,
            delay,
            standard: config.video.standard,
            poll: config.poll,
            cursor: Cursor::new(config.video.grid()),
            attributes: CharAttributes::none(),
            offset: (0, 0),
            state: DeviceState::Uninitialized,
        }
    }

    /// Release the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Raw register write
    pub fn poke(&mut self, address: u8, data: u8) -> Result<(), OsdError<B::Error>> {
        self.bus.poke(address, data).map_err(OsdError::Bus)
    }

    /// Raw register read
    pub fn peek(&mut self, address: u8) -> Result<u8, OsdError<B::Error>> {
        self.bus.peek(address).map_err(OsdError::Bus)
    }

    /// Clamped offsets last written
    pub fn offsets(&self) -> (i8, i8) {
        self.offset
    }

    /// Move the cursor to `(x, y)` and write `c` there
    pub fn write_char_at(&mut self, c: u8, x: i32, y: i32) -> Result<(), OsdError<B::Error>> {
        self.cursor.set(x, y);
        self.write_char(c)
    }

    /// Write `c` and an explicit attribute byte for the same cell
    ///
    /// The persisted attributes are not changed.
    pub fn write_char_with_attributes(
        &mut self,
        c: u8,
        attributes: CharAttributes,
    ) -> Result<(), OsdError<B::Error>> {
        let linear = self.cursor.linear();
        self.write_cell(linear, c)?;
        self.set_address(linear, true)?;
        self.write(reg::DMDI, attributes.cell_byte())?;
        self.cursor.advance();
        Ok(())
    }

    fn write(&mut self, register: Register, value: u8) -> Result<(), OsdError<B::Error>> {
        self.poke(register.write_address(), value)
    }

    fn read(&mut self, register: Register) -> Result<u8, OsdError<B::Error>> {
        self.peek(register.read_address())
    }

    fn set_address(&mut self, linear: u16, attribute_plane: bool) -> Result<(), OsdError<B::Error>> {
        let mut high = ((linear >> 8) as u8) & 0x01;
        if attribute_plane {
            high |= DMAH_ATTRIBUTE_PLANE;
        }
        self.write(reg::DMAH, high)?;
        self.write(reg::DMAL, linear as u8)
    }

    fn write_cell(&mut self, linear: u16, c: u8) -> Result<(), OsdError<B::Error>> {
        self.write(reg::DMM, DisplayMemoryMode::eight_bit(self.attributes).to_byte())?;
        self.set_address(linear, false)?;
        self.write(reg::DMDI, c)
    }

    fn wait_until_clear(&mut self, register: Register, mask: u8) -> Result<(), OsdError<B::Error>> {
        for _ in 0..self.poll.max_polls {
            if self.read(register)? & mask == 0 {
                return Ok(());
            }
            self.delay.delay_us(self.poll.interval_us);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "OSD register {=u8:#x} bit {=u8:#x} still set after {} polls",
            register.write_address(),
            mask,
            self.poll.max_polls
        );
        Err(OsdError::Timeout)
    }

    fn reset_sequence(&mut self) -> Result<(), OsdError<B::Error>> {
        self.write(reg::VM0, VideoMode0::reset_request().to_byte())?;
        self.delay.delay_us(self.poll.reset_settle_us);
        self.wait_until_clear(reg::VM0, VideoMode0::SOFTWARE_RESET)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("OSD reset complete");
        self.initialize()
    }

    fn validate(text: &[u8]) -> Result<(), OsdError<B::Error>> {
        if text.len() > GRID_CAPACITY {
            return Err(OsdError::StringTooLong);
        }
        if text.contains(&AUTO_INCREMENT_END) {
            return Err(OsdError::ReservedByte);
        }
        Ok(())
    }
}

impl<B, D> OsdDisplay for Max7456<B, D>
where
    B: RegisterBus,
    D: DelayNs,
{
    type Error = OsdError<B::Error>;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        self.write(reg::DMM, DisplayMemoryMode::eight_bit(self.attributes).to_byte())?;
        self.write(reg::VM0, VideoMode0::running(self.standard).to_byte())?;
        self.write(reg::VM1, VideoMode1::default().to_byte())?;

        let brightness = RowBrightness::default().to_byte();
        for row in 0..reg::ROWS {
            self.write(reg::rb(row), brightness)?;
        }

        self.state = self.state.transition(DeviceEvent::Initialized);
        Ok(())
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.state = self.state.transition(DeviceEvent::ResetIssued);
        let result = self.reset_sequence();
        if result.is_err() {
            self.state = self.state.transition(DeviceEvent::ResetFailed);
        }
        result
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.write(reg::DMM, DisplayMemoryMode::clear_memory(self.attributes).to_byte())?;
        self.cursor.home();
        self.wait_until_clear(reg::DMM, DisplayMemoryMode::CLEAR)
    }

    fn state(&self) -> DeviceState {
        self.state
    }

    fn grid(&self) -> Grid {
        self.cursor.grid()
    }

    fn cursor(&self) -> CursorPosition {
        self.cursor.position()
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor.set(x, y);
    }

    fn write_char(&mut self, c: u8) -> Result<(), Self::Error> {
        self.write_cell(self.cursor.linear(), c)?;
        self.cursor.advance();
        Ok(())
    }

    fn write_string(&mut self, text: &[u8]) -> Result<(), Self::Error> {
        Self::validate(text)?;
        if text.is_empty() {
            return Ok(());
        }

        self.set_address(self.cursor.linear(), false)?;
        self.write(reg::DMM, DisplayMemoryMode::auto_increment(self.attributes).to_byte())?;
        self.bus
            .stream(text, AUTO_INCREMENT_END)
            .map_err(OsdError::Bus)?;
        for _ in text {
            self.cursor.advance();
        }
        self.write(reg::DMM, DisplayMemoryMode::eight_bit(self.attributes).to_byte())
    }

    fn write_string_slow(&mut self, text: &[u8]) -> Result<(), Self::Error> {
        Self::validate(text)?;
        text.iter().try_for_each(|&c| self.write_char(c))
    }

    fn read_display(&mut self, x: u8, y: u8) -> Result<u8, Self::Error> {
        let cell = Grid::new(MAX_ROWS).clamp(i32::from(x), i32::from(y));
        self.write(reg::DMM, DisplayMemoryMode::eight_bit(self.attributes).to_byte())?;
        self.set_address(cell.linear(), false)?;
        self.peek(reg::DMDO)
    }

    fn offset(&mut self, horizontal: i32, vertical: i32) -> Result<(), Self::Error> {
        let h = horizontal.clamp(HORIZONTAL_OFFSET_RANGE.0, HORIZONTAL_OFFSET_RANGE.1);
        let v = vertical.clamp(VERTICAL_OFFSET_RANGE.0, VERTICAL_OFFSET_RANGE.1);

        // HOS: 0 = -32 px, 32 = centered. VOS: 0 = +16 lines, 16 = centered.
        self.write(reg::HOS, (h + 32) as u8)?;
        self.write(reg::VOS, (16 - v) as u8)?;
        self.offset = (h as i8, v as i8);
        Ok(())
    }

    fn attributes(&self) -> CharAttributes {
        self.attributes
    }

    fn blink(&mut self, on: bool) {
        self.attributes.blink = on;
    }

    fn invert(&mut self, on: bool) {
        self.attributes.invert = on;
    }

    fn local_background(&mut self, on: bool) {
        self.attributes.local_background = on;
    }

    fn display(&mut self, on: bool) -> Result<(), Self::Error> {
        let mut vm0 = VideoMode0::from_byte(self.read(reg::VM0)?);
        vm0.osd_enabled = on;

        if on {
            let osdbl = self.read(reg::OSDBL)?;
            self.write(reg::VM0, vm0.to_byte())?;
            self.write(reg::OSDBL, osdbl & !OSDBL_AUTO_DISABLE)
        } else {
            self.write(reg::VM0, vm0.to_byte())
        }
    }

    fn status(&mut self) -> Result<u8, Self::Error> {
        self.peek(reg::STAT)
    }

    fn video_modes(&mut self) -> Result<(u8, u8), Self::Error> {
        let vm0 = self.read(reg::VM0)?;
        let vm1 = self.read(reg::VM1)?;
        Ok((vm0, vm1))
    }
}
