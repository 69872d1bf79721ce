//! UART serial communication abstractions
//!
//! The host link is a plain byte stream: command lines come in, two-byte
//! responses (plus optional payload) go out.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read data from the UART
    ///
    /// Waits for at least one byte and returns how many were placed in
    /// `buf`. `Ok(0)` means the link stayed quiet for the receive timeout.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART
    ///
    /// Returns `Ok(None)` on a receive timeout.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut buf = [0u8; 1];
        match self.read_blocking(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Script<'a> {
        data: &'a [u8],
        pos: usize,
    }

    impl UartRx for Script<'_> {
        type Error = ();

        fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            if self.pos >= self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    fn test_read_byte_reports_timeout_as_none() {
        let mut rx = Script { data: b"a", pos: 0 };
        assert_eq!(rx.read_byte(), Ok(Some(b'a')));
        assert_eq!(rx.read_byte(), Ok(None));
    }
}
