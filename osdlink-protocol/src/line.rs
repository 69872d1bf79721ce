//! Command line framing.
//!
//! Lines are terminated by a NUL byte. A line that outgrows the buffer is
//! truncated: the stored bytes are kept, everything up to the next NUL is
//! discarded, and the resulting [`Line`] is flagged as truncated. A partial
//! line can also be closed by a receive timeout, matching a serial reader
//! that returns whatever it collected when the link goes quiet.

use heapless::Vec;

/// Line terminator
pub const LINE_TERMINATOR: u8 = 0x00;

/// Size of the line buffer, including the slot reserved for the terminator
pub const MAX_LINE_LEN: usize = 256;

/// A completed command line (terminator stripped)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line content without the terminator
    pub data: Vec<u8, MAX_LINE_LEN>,
    /// Bytes were dropped because the line exceeded the configured length
    pub truncated: bool,
}

impl Line {
    /// Line content
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Accumulates received bytes into [`Line`]s
#[derive(Debug, Clone)]
pub struct LineReader {
    buffer: Vec<u8, MAX_LINE_LEN>,
    limit: usize,
    discarding: bool,
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    /// Create a reader using the full buffer
    pub fn new() -> Self {
        Self::with_line_len(MAX_LINE_LEN)
    }

    /// Create a reader for lines of at most `line_len` bytes including the
    /// terminator slot
    ///
    /// `line_len` is clamped to `2..=MAX_LINE_LEN`, so at least the opcode
    /// byte always fits.
    pub fn with_line_len(line_len: usize) -> Self {
        Self {
            buffer: Vec::new(),
            limit: line_len.clamp(2, MAX_LINE_LEN) - 1,
            discarding: false,
        }
    }

    /// Maximum number of content bytes kept per line
    pub fn capacity(&self) -> usize {
        self.limit
    }

    /// Feed a single byte
    ///
    /// Returns `Some(line)` when a terminator closes a non-empty line.
    /// Empty lines are skipped.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        if byte == LINE_TERMINATOR {
            return self.take();
        }

        if self.buffer.len() < self.limit {
            // Cannot fail: limit <= capacity
            let _ = self.buffer.push(byte);
        } else {
            self.discarding = true;
        }
        None
    }

    /// Close the line in progress because the link went quiet
    pub fn timeout(&mut self) -> Option<Line> {
        self.take()
    }

    fn take(&mut self) -> Option<Line> {
        let truncated = self.discarding;
        self.discarding = false;

        if self.buffer.is_empty() {
            return None;
        }

        let data = core::mem::take(&mut self.buffer);
        Some(Line { data, truncated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed bytes until the first complete line; returns it and the bytes used
    fn feed_all(reader: &mut LineReader, bytes: &[u8]) -> (Option<Line>, usize) {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(line) = reader.feed(byte) {
                return (Some(line), i + 1);
            }
        }
        (None, bytes.len())
    }

    #[test]
    fn test_line_terminated_by_nul() {
        let mut reader = LineReader::new();
        let (line, used) = feed_all(&mut reader, b"l 5 10\0p X\0");

        let line = line.unwrap();
        assert_eq!(line.as_bytes(), b"l 5 10");
        assert!(!line.truncated);
        assert_eq!(used, 7);

        let (line, _) = feed_all(&mut reader, b"p X\0");
        assert_eq!(line.unwrap().as_bytes(), b"p X");
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let mut reader = LineReader::new();
        assert_eq!(reader.feed(0), None);
        assert_eq!(reader.feed(0), None);
        assert_eq!(reader.timeout(), None);
    }

    #[test]
    fn test_overlong_line_is_truncated_to_last_slot() {
        let mut reader = LineReader::with_line_len(8);
        assert_eq!(reader.capacity(), 7);

        let (line, _) = feed_all(&mut reader, b"e0123456789\0");
        let line = line.unwrap();
        assert_eq!(line.as_bytes(), b"e012345");
        assert!(line.truncated);

        // The overflow does not leak into the next line
        let (line, _) = feed_all(&mut reader, b"c\0");
        let line = line.unwrap();
        assert_eq!(line.as_bytes(), b"c");
        assert!(!line.truncated);
    }

    #[test]
    fn test_timeout_flushes_partial_line() {
        let mut reader = LineReader::new();
        let (line, _) = feed_all(&mut reader, b"r");
        assert!(line.is_none());

        let line = reader.timeout().unwrap();
        assert_eq!(line.as_bytes(), b"r");
        assert_eq!(reader.timeout(), None);
    }

    #[test]
    fn test_line_len_is_clamped() {
        assert_eq!(LineReader::with_line_len(0).capacity(), 1);
        assert_eq!(LineReader::with_line_len(10_000).capacity(), MAX_LINE_LEN - 1);
    }
}
