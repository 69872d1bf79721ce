//! MAX7456 register map and register value types
//!
//! Every register is reached with a two-byte SPI transaction: the address
//! byte, then the data byte (write) or a 0xFF probe (read). The read
//! address of a read/write register is its write address with bit 7 set.

use osdlink_core::config::VideoStandard;
use osdlink_core::osd::CharAttributes;

/// Set on the write address to form the read address
pub const READ_FLAG: u8 = 0x80;

/// Byte that ends an auto-increment write sequence
///
/// Character index 0xFF can therefore never be written in that mode.
pub const AUTO_INCREMENT_END: u8 = 0xFF;

/// Dummy byte clocked out while reading
pub const READ_PROBE: u8 = 0xFF;

/// A read/write register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register(u8);

impl Register {
    /// Address used for writes
    pub const fn write_address(self) -> u8 {
        self.0
    }

    /// Address used for reads
    pub const fn read_address(self) -> u8 {
        self.0 | READ_FLAG
    }
}

/// MAX7456 register addresses
pub mod reg {
    use super::Register;

    /// Video mode 0
    pub const VM0: Register = Register(0x00);
    /// Video mode 1
    pub const VM1: Register = Register(0x01);
    /// Horizontal offset
    pub const HOS: Register = Register(0x02);
    /// Vertical offset
    pub const VOS: Register = Register(0x03);
    /// Display memory mode
    pub const DMM: Register = Register(0x04);
    /// Display memory address high
    pub const DMAH: Register = Register(0x05);
    /// Display memory address low
    pub const DMAL: Register = Register(0x06);
    /// Display memory data in
    pub const DMDI: Register = Register(0x07);
    /// OSD black level
    pub const OSDBL: Register = Register(0x6C);

    /// Status (read only)
    pub const STAT: u8 = 0xA0;
    /// Display memory data out (read only)
    pub const DMDO: u8 = 0xB0;

    /// Number of row brightness registers
    pub const ROWS: u8 = 16;

    /// Row brightness register for `row` (0-15)
    pub const fn rb(row: u8) -> Register {
        Register(0x10 + (row & 0x0F))
    }
}

/// DMAH bit selecting the attribute plane
pub const DMAH_ATTRIBUTE_PLANE: u8 = 0x02;

/// OSDBL bit disabling the automatic black level control
pub const OSDBL_AUTO_DISABLE: u8 = 0x10;

/// VM0 sync source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncMode {
    /// Follow the video input, free-run without one
    #[default]
    Auto,
    /// External sync only
    External,
    /// Internal sync only
    Internal,
}

/// Video mode 0 (VM0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VideoMode0 {
    /// Bit 6
    pub standard: VideoStandard,
    /// Bits 5:4
    pub sync: SyncMode,
    /// Bit 3
    pub osd_enabled: bool,
    /// Bit 2: apply OSD enable on the next VSYNC
    pub vsync_update: bool,
    /// Bit 1: self-clearing
    pub software_reset: bool,
    /// Bit 0
    pub buffer_disabled: bool,
}

impl VideoMode0 {
    /// OSD enable bit
    pub const OSD_ENABLE: u8 = 1 << 3;
    /// Software reset bit
    pub const SOFTWARE_RESET: u8 = 1 << 1;

    /// Value written to start a software reset
    pub fn reset_request() -> Self {
        Self {
            standard: VideoStandard::Ntsc,
            software_reset: true,
            ..Self::default()
        }
    }

    /// Operating value used after initialization
    pub fn running(standard: VideoStandard) -> Self {
        Self {
            standard,
            sync: SyncMode::Auto,
            osd_enabled: true,
            vsync_update: true,
            software_reset: false,
            buffer_disabled: false,
        }
    }

    /// Encode to the register value
    pub fn to_byte(&self) -> u8 {
        let mut value = 0u8;
        if self.standard == VideoStandard::Pal {
            value |= 1 << 6;
        }
        value |= match self.sync {
            SyncMode::Auto => 0b00,
            SyncMode::External => 0b10,
            SyncMode::Internal => 0b11,
        } << 4;
        if self.osd_enabled {
            value |= Self::OSD_ENABLE;
        }
        if self.vsync_update {
            value |= 1 << 2;
        }
        if self.software_reset {
            value |= Self::SOFTWARE_RESET;
        }
        if self.buffer_disabled {
            value |= 1;
        }
        value
    }

    /// Decode a register value
    pub fn from_byte(value: u8) -> Self {
        Self {
            standard: if value & (1 << 6) != 0 {
                VideoStandard::Pal
            } else {
                VideoStandard::Ntsc
            },
            sync: match (value >> 4) & 0b11 {
                0b10 => SyncMode::External,
                0b11 => SyncMode::Internal,
                _ => SyncMode::Auto,
            },
            osd_enabled: value & Self::OSD_ENABLE != 0,
            vsync_update: value & (1 << 2) != 0,
            software_reset: value & Self::SOFTWARE_RESET != 0,
            buffer_disabled: value & 1 != 0,
        }
    }
}

/// Blink period in video fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkTime {
    /// 2 fields (33 ms NTSC, 40 ms PAL)
    #[default]
    Fields2,
    /// 4 fields (67 ms NTSC, 80 ms PAL)
    Fields4,
    /// 6 fields (100 ms NTSC, 120 ms PAL)
    Fields6,
    /// 8 fields (133 ms NTSC, 160 ms PAL)
    Fields8,
}

/// Blink on:off ratio, in multiples of the blink time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkDuty {
    /// 1:1 (50/50)
    #[default]
    Equal,
    /// 1:2
    OneToTwo,
    /// 1:3
    OneToThree,
    /// 3:1
    ThreeToOne,
}

/// Video mode 1 (VM1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VideoMode1 {
    /// Bit 7: gray background over the whole picture
    pub full_background: bool,
    /// Bits 6:4: background brightness in 7% steps
    pub background_level: u8,
    /// Bits 3:2
    pub blink_time: BlinkTime,
    /// Bits 1:0
    pub blink_duty: BlinkDuty,
}

impl VideoMode1 {
    /// Background level for 21% brightness
    pub const BACKGROUND_21_PERCENT: u8 = 3;

    /// Encode to the register value
    pub fn to_byte(&self) -> u8 {
        let mut value = (self.background_level & 0b111) << 4;
        if self.full_background {
            value |= 1 << 7;
        }
        value |= (self.blink_time as u8) << 2;
        value |= self.blink_duty as u8;
        value
    }
}

impl Default for VideoMode1 {
    fn default() -> Self {
        Self {
            full_background: false,
            background_level: Self::BACKGROUND_21_PERCENT,
            blink_time: BlinkTime::Fields2,
            blink_duty: BlinkDuty::Equal,
        }
    }
}

/// Character white level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WhiteLevel {
    /// 120% of the video white level
    Percent120,
    /// 100%
    Percent100,
    /// 90%
    #[default]
    Percent90,
    /// 80%
    Percent80,
}

/// Character black level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlackLevel {
    /// 0% of the video white level
    #[default]
    Percent0,
    /// 10%
    Percent10,
    /// 20%
    Percent20,
    /// 30%
    Percent30,
}

/// Row brightness (RB0-RB15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowBrightness {
    /// Bits 3:2
    pub black: BlackLevel,
    /// Bits 1:0
    pub white: WhiteLevel,
}

impl RowBrightness {
    /// Encode to the register value
    pub fn to_byte(&self) -> u8 {
        ((self.black as u8) << 2) | self.white as u8
    }
}

/// Display memory write width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// Character and DMM attributes written together
    SixteenBit,
    /// Character and attribute planes written separately
    #[default]
    EightBit,
}

/// Display memory mode (DMM)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMemoryMode {
    /// Bit 6
    pub mode: OperationMode,
    /// Bits 5:3
    pub attributes: CharAttributes,
    /// Bit 2: self-clearing
    pub clear: bool,
    /// Bit 1: clear on the next VSYNC
    pub vsync_clear: bool,
    /// Bit 0
    pub auto_increment: bool,
}

impl DisplayMemoryMode {
    /// Clear display memory bit
    pub const CLEAR: u8 = 1 << 2;
    const EIGHT_BIT: u8 = 1 << 6;
    const VSYNC_CLEAR: u8 = 1 << 1;
    const AUTO_INCREMENT: u8 = 1;

    /// Single-character writes
    pub fn eight_bit(attributes: CharAttributes) -> Self {
        Self {
            mode: OperationMode::EightBit,
            attributes,
            clear: false,
            vsync_clear: true,
            auto_increment: false,
        }
    }

    /// Streamed writes through the auto-increment counter
    pub fn auto_increment(attributes: CharAttributes) -> Self {
        Self {
            mode: OperationMode::SixteenBit,
            auto_increment: true,
            ..Self::eight_bit(attributes)
        }
    }

    /// Request a display memory clear
    pub fn clear_memory(attributes: CharAttributes) -> Self {
        Self {
            clear: true,
            ..Self::eight_bit(attributes)
        }
    }

    /// Encode to the register value
    pub fn to_byte(&self) -> u8 {
        let mut value = self.attributes.dmm_bits();
        if self.mode == OperationMode::EightBit {
            value |= Self::EIGHT_BIT;
        }
        if self.clear {
            value |= Self::CLEAR;
        }
        if self.vsync_clear {
            value |= Self::VSYNC_CLEAR;
        }
        if self.auto_increment {
            value |= Self::AUTO_INCREMENT;
        }
        value
    }
}
