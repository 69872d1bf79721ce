//! Response encoding
//!
//! Format:
//! - PAYLOAD (0-N bytes): opcode-specific text (`s`, `m`, `e`, `v` only)
//! - TERMINATOR (1 byte): 0xFF
//! - STATUS (1 byte): [`Status`] code

use core::fmt::Write;

use heapless::{String, Vec};

use crate::args::ArgError;

/// Marks the end of a response, right before the status byte
pub const FRAME_TERMINATOR: u8 = 0xFF;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 256;

/// Maximum complete response size (payload + terminator + status)
pub const MAX_RESPONSE_SIZE: usize = MAX_PAYLOAD_SIZE + 2;

/// Command status byte
///
/// Non-zero codes reuse the classic errno numbers so a host written
/// against a C serial library can print them with `strerror`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Status {
    /// Command applied
    Ok = 0x00,
    /// Bus transfer to the OSD failed (EIO)
    Io = 0x05,
    /// Unknown attribute sub-opcode (EDOM)
    DomainError = 0x21,
    /// Argument outside the accepted range (ERANGE)
    OutOfRange = 0x22,
    /// OSD did not finish a reset or clear in time (ETIME)
    Timeout = 0x3E,
    /// Argument is not a well-formed token (EILSEQ)
    Malformed = 0x54,
    /// Unknown opcode
    Unknown = 0xFF,
}

impl Status {
    /// Wire byte
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

impl From<ArgError> for Status {
    fn from(e: ArgError) -> Self {
        match e {
            ArgError::Malformed => Status::Malformed,
            ArgError::OutOfRange => Status::OutOfRange,
        }
    }
}

impl From<ResponseError> for Status {
    fn from(_: ResponseError) -> Self {
        Status::OutOfRange
    }
}

/// Errors building or encoding a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseError {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Reply to one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Payload emitted before the terminator
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    /// Status byte emitted after the terminator
    pub status: Status,
}

impl Response {
    /// Successful response without payload
    pub fn ok() -> Self {
        Self::with_status(Status::Ok)
    }

    /// Response with the given status and no payload
    pub fn with_status(status: Status) -> Self {
        Self {
            payload: Vec::new(),
            status,
        }
    }

    /// Append raw payload bytes
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), ResponseError> {
        self.payload
            .extend_from_slice(bytes)
            .map_err(|_| ResponseError::PayloadTooLarge)
    }

    /// Append `value` as uppercase hex without leading zeros
    pub fn push_hex(&mut self, value: u8) -> Result<(), ResponseError> {
        let mut text: String<2> = String::new();
        write!(text, "{:X}", value).map_err(|_| ResponseError::PayloadTooLarge)?;
        self.push_bytes(text.as_bytes())
    }

    /// Append `value` in decimal
    pub fn push_decimal(&mut self, value: u32) -> Result<(), ResponseError> {
        let mut text: String<10> = String::new();
        write!(text, "{}", value).map_err(|_| ResponseError::PayloadTooLarge)?;
        self.push_bytes(text.as_bytes())
    }

    /// Number of bytes [`Response::encode`] writes
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + 2
    }

    /// Encode into `buffer`
    ///
    /// Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, ResponseError> {
        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(ResponseError::BufferTooSmall);
        }

        let n = self.payload.len();
        buffer[..n].copy_from_slice(&self.payload);
        buffer[n] = FRAME_TERMINATOR;
        buffer[n + 1] = self.status.to_byte();

        Ok(len)
    }

    /// Encode into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_RESPONSE_SIZE>, ResponseError> {
        let mut buffer = [0u8; MAX_RESPONSE_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| ResponseError::BufferTooSmall)?;
        Ok(vec)
    }
}
