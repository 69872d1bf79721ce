//! In-memory OSD and clock for engine tests

use osdlink_hal::Clock;
use osdlink_protocol::Status;

use crate::osd::{CharAttributes, Cursor, CursorPosition, Grid, GRID_CAPACITY};
use crate::state::{DeviceEvent, DeviceState};
use crate::traits::OsdDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FakeError {
    Bus,
    Timeout,
}

impl From<FakeError> for Status {
    fn from(e: FakeError) -> Self {
        match e {
            FakeError::Bus => Status::Io,
            FakeError::Timeout => Status::Timeout,
        }
    }
}

pub(crate) struct FakeClock(pub u32);

impl Clock for FakeClock {
    fn millis(&self) -> u32 {
        self.0
    }
}

pub(crate) struct FakeOsd {
    cursor: Cursor,
    attrs: CharAttributes,
    state: DeviceState,
    pub cells: [u8; GRID_CAPACITY],
    pub enabled: bool,
    pub offset: (i32, i32),
    pub stat: u8,
    pub vm: (u8, u8),
    /// Error returned by the next fallible call
    pub fail: Option<FakeError>,
    pub slow_writes: usize,
    pub fast_writes: usize,
    pub resets: usize,
}

impl FakeOsd {
    pub fn new() -> Self {
        Self {
            cursor: Cursor::new(Grid::default()),
            attrs: CharAttributes::none(),
            state: DeviceState::Ready,
            cells: [0; GRID_CAPACITY],
            enabled: true,
            offset: (0, 0),
            stat: 0,
            vm: (0, 0),
            fail: None,
            slow_writes: 0,
            fast_writes: 0,
            resets: 0,
        }
    }

    fn check(&mut self) -> Result<(), FakeError> {
        match self.fail.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl OsdDisplay for FakeOsd {
    type Error = FakeError;

    fn initialize(&mut self) -> Result<(), FakeError> {
        self.check()?;
        self.state = self.state.transition(DeviceEvent::Initialized);
        Ok(())
    }

    fn reset(&mut self) -> Result<(), FakeError> {
        self.state = self.state.transition(DeviceEvent::ResetIssued);
        if let Err(e) = self.check() {
            self.state = self.state.transition(DeviceEvent::ResetFailed);
            return Err(e);
        }
        self.resets += 1;
        self.initialize()
    }

    fn clear(&mut self) -> Result<(), FakeError> {
        self.check()?;
        self.cells = [0; GRID_CAPACITY];
        self.cursor.home();
        Ok(())
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

    fn write_char(&mut self, c: u8) -> Result<(), FakeError> {
        self.check()?;
        self.cells[usize::from(self.cursor.linear())] = c;
        self.cursor.advance();
        Ok(())
    }

    fn write_string(&mut self, text: &[u8]) -> Result<(), FakeError> {
        self.fast_writes += 1;
        text.iter().try_for_each(|&c| self.write_char(c))
    }

    fn write_string_slow(&mut self, text: &[u8]) -> Result<(), FakeError> {
        self.slow_writes += 1;
        text.iter().try_for_each(|&c| self.write_char(c))
    }

    fn read_display(&mut self, x: u8, y: u8) -> Result<u8, FakeError> {
        self.check()?;
        Ok(self.cells[usize::from(CursorPosition::new(x, y).linear())])
    }

    fn offset(&mut self, horizontal: i32, vertical: i32) -> Result<(), FakeError> {
        self.check()?;
        self.offset = (horizontal.clamp(-32, 31), vertical.clamp(-15, 16));
        Ok(())
    }

    fn attributes(&self) -> CharAttributes {
        self.attrs
    }

    fn blink(&mut self, on: bool) {
        self.attrs.blink = on;
    }

    fn invert(&mut self, on: bool) {
        self.attrs.invert = on;
    }

    fn local_background(&mut self, on: bool) {
        self.attrs.local_background = on;
    }

    fn display(&mut self, on: bool) -> Result<(), FakeError> {
        self.check()?;
        self.enabled = on;
        Ok(())
    }

    fn status(&mut self) -> Result<u8, FakeError> {
        self.check()?;
        Ok(self.stat)
    }

    fn video_modes(&mut self) -> Result<(u8, u8), FakeError> {
        self.check()?;
        Ok(self.vm)
    }
}
