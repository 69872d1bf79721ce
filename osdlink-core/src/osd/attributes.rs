//! Character attributes
//!
//! The same three flags appear in two encodings:
//!
//! - Display Memory Mode register, bits 5..3 (LBC, BLK, INV). Applied to
//!   every character written while that DMM value is active.
//! - Attribute plane byte, bits 7..5 (LBC, BLK, INV). Stored per cell when
//!   DMAH bit 1 selects the attribute plane.

/// Per-character display flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CharAttributes {
    /// Blink the character
    pub blink: bool,
    /// White-on-black instead of black-on-white
    pub invert: bool,
    /// Gray local background instead of transparent
    pub local_background: bool,
}

impl CharAttributes {
    const DMM_LBC: u8 = 1 << 5;
    const DMM_BLK: u8 = 1 << 4;
    const DMM_INV: u8 = 1 << 3;

    const CELL_LBC: u8 = 1 << 7;
    const CELL_BLK: u8 = 1 << 6;
    const CELL_INV: u8 = 1 << 5;

    /// All flags off
    pub const fn none() -> Self {
        Self {
            blink: false,
            invert: false,
            local_background: false,
        }
    }

    /// Flags positioned for the Display Memory Mode register
    pub fn dmm_bits(&self) -> u8 {
        let mut bits = 0;
        if self.local_background {
            bits |= Self::DMM_LBC;
        }
        if self.blink {
            bits |= Self::DMM_BLK;
        }
        if self.invert {
            bits |= Self::DMM_INV;
        }
        bits
    }

    /// Flags positioned for an attribute-plane cell
    pub fn cell_byte(&self) -> u8 {
        let mut bits = 0;
        if self.local_background {
            bits |= Self::CELL_LBC;
        }
        if self.blink {
            bits |= Self::CELL_BLK;
        }
        if self.invert {
            bits |= Self::CELL_INV;
        }
        bits
    }
}
