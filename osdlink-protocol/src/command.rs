//! Command decoding
//!
//! The first byte of a line is the opcode, the rest is argument text. One
//! separator space between the two is dropped, so `p HELLO` prints
//! `HELLO` and `e  x` echoes ` x`.

use crate::args::ArgParser;

// Opcode bytes
pub const OP_PRINT: u8 = b'p';
pub const OP_PRINT_FAST: u8 = b'P';
pub const OP_LOCATE: u8 = b'l';
pub const OP_ATTRIBUTE: u8 = b'a';
pub const OP_OFFSET: u8 = b'o';
pub const OP_STATUS: u8 = b's';
pub const OP_RESET: u8 = b'r';
pub const OP_CLEAR: u8 = b'c';
pub const OP_ECHO: u8 = b'e';
pub const OP_MILLIS: u8 = b'm';
pub const OP_VIDEO_MODE: u8 = b'v';
pub const OP_HEARTBEAT: u8 = b'h';

/// Console opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Opcode {
    /// Print a string one register write per character
    Print,
    /// Print a string through auto-increment mode
    PrintFast,
    /// Move the cursor
    Locate,
    /// Change blink/invert/display/background attribute
    Attribute,
    /// Shift the overlay by whole pixels
    Offset,
    /// Report the status register
    Status,
    /// Soft-reset the OSD
    Reset,
    /// Clear display memory
    Clear,
    /// Echo the argument text
    Echo,
    /// Report uptime in milliseconds
    Millis,
    /// Report both video-mode registers
    VideoMode,
    /// Link check, does nothing
    Heartbeat,
    /// Anything else
    Unknown(u8),
}

impl Opcode {
    /// Decode an opcode byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            OP_PRINT => Opcode::Print,
            OP_PRINT_FAST => Opcode::PrintFast,
            OP_LOCATE => Opcode::Locate,
            OP_ATTRIBUTE => Opcode::Attribute,
            OP_OFFSET => Opcode::Offset,
            OP_STATUS => Opcode::Status,
            OP_RESET => Opcode::Reset,
            OP_CLEAR => Opcode::Clear,
            OP_ECHO => Opcode::Echo,
            OP_MILLIS => Opcode::Millis,
            OP_VIDEO_MODE => Opcode::VideoMode,
            OP_HEARTBEAT => Opcode::Heartbeat,
            other => Opcode::Unknown(other),
        }
    }
}

/// Targets of the `a` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttributeTarget {
    /// `b`: blink subsequent characters
    Blink,
    /// `i`: invert subsequent characters
    Invert,
    /// `d`: overlay on/off
    Display,
    /// `g`: gray local background behind subsequent characters
    LocalBackground,
}

impl AttributeTarget {
    /// Decode a sub-opcode byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'b' => Some(AttributeTarget::Blink),
            b'i' => Some(AttributeTarget::Invert),
            b'd' => Some(AttributeTarget::Display),
            b'g' => Some(AttributeTarget::LocalBackground),
            _ => None,
        }
    }
}

/// One decoded command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command<'a> {
    /// Opcode
    pub opcode: Opcode,
    /// Argument text, separator removed, cut at the first NUL
    pub args: &'a [u8],
}

impl<'a> Command<'a> {
    /// Split a line into opcode and arguments
    ///
    /// Returns `None` for an empty line.
    pub fn parse(line: &'a [u8]) -> Option<Self> {
        let end = line.iter().position(|&b| b == 0).unwrap_or(line.len());
        let (&first, rest) = line[..end].split_first()?;
        let args = rest.strip_prefix(b" ").unwrap_or(rest);

        Some(Self {
            opcode: Opcode::from_byte(first),
            args,
        })
    }

    /// Tokenizer over the argument text
    pub fn arg_parser(&self) -> ArgParser<'a> {
        ArgParser::new(self.args)
    }
}
