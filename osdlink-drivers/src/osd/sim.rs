//! Byte-level MAX7456 model for driver tests
//!
//! Implements `SpiDevice` by decoding the (address, data) byte stream the
//! way the chip does. Reset and clear bits stay set for a configurable
//! number of reads.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::{self, ErrorKind, ErrorType, Operation, SpiDevice};
use osdlink_core::osd::GRID_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SimError;

impl spi::Error for SimError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Busy bit that never clears
pub(crate) const NEVER: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Address,
    Write(u8),
    Read(u8),
}

pub(crate) struct SimState {
    pub regs: [u8; 128],
    pub stat: u8,
    pub chars: [u8; GRID_CAPACITY],
    pub attrs: [u8; GRID_CAPACITY],
    /// Every (address, data) register write
    pub writes: Vec<(u8, u8)>,
    /// Bytes received in auto-increment mode
    pub streamed: Vec<u8>,
    pub transactions: usize,
    pub fail: bool,
    pub auto_increment: bool,
    /// Reads of VM0 that still report the reset bit
    pub reset_polls: u32,
    /// Reads of DMM that still report the clear bit
    pub clear_polls: u32,
    pending_reset: u32,
    pending_clear: u32,
    auto_address: u16,
    phase: Phase,
}

impl SimState {
    fn new() -> Self {
        Self {
            regs: Self::power_on_registers(),
            stat: 0,
            chars: [0; GRID_CAPACITY],
            attrs: [0; GRID_CAPACITY],
            writes: Vec::new(),
            streamed: Vec::new(),
            transactions: 0,
            fail: false,
            auto_increment: false,
            reset_polls: 2,
            clear_polls: 2,
            pending_reset: 0,
            pending_clear: 0,
            auto_address: 0,
            phase: Phase::Address,
        }
    }

    fn power_on_registers() -> [u8; 128] {
        let mut regs = [0u8; 128];
        regs[0x6C] = 0x1F;
        regs
    }

    /// DMM value at the time of each DMDI write, in order
    pub fn dmm_at_char_writes(&self) -> Vec<u8> {
        let mut dmm = 0;
        let mut out = Vec::new();
        for &(address, data) in &self.writes {
            match address {
                0x04 => dmm = data,
                0x07 => out.push(dmm),
                _ => {}
            }
        }
        out
    }

    pub fn cell_char(&self, x: usize, y: usize) -> u8 {
        self.chars[y * 30 + x]
    }

    pub fn cell_attr(&self, x: usize, y: usize) -> u8 {
        self.attrs[y * 30 + x]
    }

    fn address(&self) -> u16 {
        (u16::from(self.regs[0x05] & 0x01) << 8) | u16::from(self.regs[0x06])
    }

    fn store(&mut self, address: u16, attribute_plane: bool, value: u8) {
        let index = usize::from(address);
        if index >= GRID_CAPACITY {
            return;
        }
        if attribute_plane {
            self.attrs[index] = value;
        } else {
            self.chars[index] = value;
            if self.regs[0x04] & 0x40 == 0 {
                // DMM bits 5:3 land in cell bits 7:5
                self.attrs[index] = (self.regs[0x04] & 0x38) << 2;
            }
        }
    }

    fn clear_memory(&mut self) {
        self.chars = [0; GRID_CAPACITY];
        self.attrs = [0; GRID_CAPACITY];
    }

    fn clock(&mut self, byte: u8) -> u8 {
        match self.phase {
            Phase::Address if self.auto_increment => {
                if byte == 0xFF {
                    self.auto_increment = false;
                    self.regs[0x04] &= !0x01;
                } else {
                    self.streamed.push(byte);
                    self.store(self.auto_address, false, byte);
                    self.auto_address += 1;
                }
                0
            }
            Phase::Address => {
                self.phase = if byte & 0x80 != 0 {
                    Phase::Read(byte)
                } else {
                    Phase::Write(byte)
                };
                0
            }
            Phase::Write(address) => {
                self.phase = Phase::Address;
                self.write(address, byte);
                0
            }
            Phase::Read(address) => {
                self.phase = Phase::Address;
                self.read(address)
            }
        }
    }

    fn write(&mut self, address: u8, data: u8) {
        self.writes.push((address, data));
        match address {
            0x00 if data & 0x02 != 0 => {
                self.regs = Self::power_on_registers();
                self.clear_memory();
                self.auto_increment = false;
                self.pending_reset = self.reset_polls;
                self.regs[0x00] = if self.reset_polls == 0 {
                    data & !0x02
                } else {
                    data
                };
            }
            0x04 => {
                self.regs[0x04] = data;
                if data & 0x04 != 0 {
                    self.clear_memory();
                    self.pending_clear = self.clear_polls;
                    if self.clear_polls == 0 {
                        self.regs[0x04] &= !0x04;
                    }
                }
                if data & 0x01 != 0 {
                    self.auto_increment = true;
                    self.auto_address = self.address();
                }
            }
            0x07 => {
                self.regs[0x07] = data;
                let attribute_plane = self.regs[0x05] & 0x02 != 0;
                self.store(self.address(), attribute_plane, data);
            }
            _ => self.regs[usize::from(address & 0x7F)] = data,
        }
    }

    fn read(&mut self, address: u8) -> u8 {
        match address {
            0x80 => {
                let value = self.regs[0x00];
                if self.pending_reset > 0 && self.pending_reset != NEVER {
                    self.pending_reset -= 1;
                    if self.pending_reset == 0 {
                        self.regs[0x00] &= !0x02;
                    }
                }
                value
            }
            0x84 => {
                let value = self.regs[0x04];
                if self.pending_clear > 0 && self.pending_clear != NEVER {
                    self.pending_clear -= 1;
                    if self.pending_clear == 0 {
                        self.regs[0x04] &= !0x04;
                    }
                }
                value
            }
            0xA0 => self.stat,
            0xB0 => {
                let index = usize::from(self.address());
                let plane = if self.regs[0x05] & 0x02 != 0 {
                    &self.attrs
                } else {
                    &self.chars
                };
                plane.get(index).copied().unwrap_or(0)
            }
            other => self.regs[usize::from(other & 0x7F)],
        }
    }
}

/// Shared handle; clones observe the same chip
#[derive(Clone)]
pub(crate) struct Max7456Sim(Rc<RefCell<SimState>>);

impl Max7456Sim {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(SimState::new())))
    }

    pub fn state(&self) -> Ref<'_, SimState> {
        self.0.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, SimState> {
        self.0.borrow_mut()
    }
}

impl ErrorType for Max7456Sim {
    type Error = SimError;
}

impl SpiDevice for Max7456Sim {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), SimError> {
        let mut state = self.0.borrow_mut();
        if state.fail {
            return Err(SimError);
        }
        state.transactions += 1;
        state.phase = Phase::Address;

        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => {
                    for &byte in data.iter() {
                        state.clock(byte);
                    }
                }
                Operation::Transfer(read, write) => {
                    for (i, &byte) in write.iter().enumerate() {
                        let out = state.clock(byte);
                        if let Some(slot) = read.get_mut(i) {
                            *slot = out;
                        }
                    }
                }
                Operation::TransferInPlace(buf) => {
                    for slot in buf.iter_mut() {
                        *slot = state.clock(*slot);
                    }
                }
                Operation::Read(buf) => {
                    for slot in buf.iter_mut() {
                        *slot = state.clock(0xFF);
                    }
                }
                Operation::DelayNs(_) => {}
            }
        }
        Ok(())
    }
}

/// Delay that returns immediately and counts requested microseconds
#[derive(Debug, Default)]
pub(crate) struct NoDelay {
    pub waited_ns: u64,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waited_ns += u64::from(ns);
    }
}
