//! Configuration type definitions

use crate::osd::Grid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default serial line length, including the terminator slot
pub const DEFAULT_LINE_LEN: u16 = 128;

/// Analog video standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VideoStandard {
    /// 525-line, 13 text rows
    Ntsc,
    /// 625-line, 16 text rows
    #[default]
    Pal,
}

impl VideoStandard {
    /// Text rows available in this standard
    pub fn rows(self) -> u8 {
        match self {
            VideoStandard::Ntsc => 13,
            VideoStandard::Pal => 16,
        }
    }
}

/// Video output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VideoConfig {
    /// Video standard written to VM0
    pub standard: VideoStandard,
    /// First usable column
    pub x_min: u8,
    /// First usable row
    pub y_min: u8,
}

impl VideoConfig {
    /// Cursor bounds for these settings
    pub fn grid(&self) -> Grid {
        Grid::with_margins(self.standard.rows(), self.x_min, self.y_min)
    }
}

/// Host serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SerialConfig {
    /// Baud rate
    pub baudrate: u32,
    /// Maximum line length including the terminator slot
    pub line_len: u16,
    /// Quiet time that closes a partial line (ms)
    pub timeout_ms: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            line_len: DEFAULT_LINE_LEN,
            timeout_ms: 100,
        }
    }
}

/// Busy-wait budget for reset and clear completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PollConfig {
    /// Settle time after issuing a software reset (µs)
    pub reset_settle_us: u32,
    /// Delay between polls (µs)
    pub interval_us: u32,
    /// Polls before giving up
    pub max_polls: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            reset_settle_us: 100,
            interval_us: 100,
            max_polls: 1000,
        }
    }
}

/// Complete OSD configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OsdConfig {
    /// Video output
    pub video: VideoConfig,
    /// Host serial link
    pub serial: SerialConfig,
    /// Reset/clear polling
    pub poll: PollConfig,
}
