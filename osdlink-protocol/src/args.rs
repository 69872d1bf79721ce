//! Argument tokenizer
//!
//! Arguments are space-separated decimal integers with an optional single
//! leading sign. A token ends at a space, a NUL, or the end of the input.
//!
//! Overflow is reported, never saturated or wrapped: a value outside the
//! target type yields [`ArgError::OutOfRange`] and no value at all.

/// Argument parsing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgError {
    /// A non-digit appeared where a digit was expected
    Malformed,
    /// The value does not fit the requested integer type
    OutOfRange,
}

/// Cursor over the argument text of one command
#[derive(Debug, Clone)]
pub struct ArgParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> ArgParser<'a> {
    /// Create a parser over `input`
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Unconsumed input
    pub fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Check whether only spaces (or nothing) remain
    pub fn is_exhausted(&self) -> bool {
        self.rest()
            .iter()
            .take_while(|&&b| b != 0)
            .all(|&b| b == b' ')
    }

    /// Parse a 32-bit signed integer
    pub fn next_long(&mut self) -> Result<i32, ArgError> {
        self.next_integer()
    }

    /// Parse a 16-bit signed integer
    pub fn next_int(&mut self) -> Result<i16, ArgError> {
        self.next_integer()
    }

    /// Parse the next integer token into `T`
    pub fn next_integer<T: TryFrom<i64>>(&mut self) -> Result<T, ArgError> {
        self.skip_spaces();

        let mut negative = false;
        let mut signed = false;
        let mut digits = 0usize;
        // None once the magnitude has overflowed i64
        let mut magnitude: Option<i64> = Some(0);

        while let Some(&b) = self.input.get(self.pos) {
            match b {
                b'0'..=b'9' => {
                    magnitude = magnitude
                        .and_then(|m| m.checked_mul(10))
                        .and_then(|m| m.checked_add(i64::from(b - b'0')));
                    digits += 1;
                }
                b'+' | b'-' if !signed && digits == 0 => {
                    signed = true;
                    negative = b == b'-';
                }
                b' ' => {
                    self.pos += 1;
                    break;
                }
                0 => break,
                _ => {
                    self.skip_token();
                    return Err(ArgError::Malformed);
                }
            }
            self.pos += 1;
        }

        if digits == 0 {
            return Err(ArgError::Malformed);
        }

        let magnitude = magnitude.ok_or(ArgError::OutOfRange)?;
        let value = if negative { -magnitude } else { magnitude };
        T::try_from(value).map_err(|_| ArgError::OutOfRange)
    }

    /// Take the next non-space byte as a single-character selector
    ///
    /// The byte must stand alone: it is followed by a space or the end of
    /// input. Returns `None` when nothing but spaces remain.
    pub fn next_char(&mut self) -> Result<Option<u8>, ArgError> {
        self.skip_spaces();

        let b = match self.input.get(self.pos) {
            None | Some(0) => return Ok(None),
            Some(&b) => b,
        };
        self.pos += 1;

        match self.input.get(self.pos) {
            None | Some(0) => Ok(Some(b)),
            Some(b' ') => {
                self.pos += 1;
                Ok(Some(b))
            }
            Some(_) => {
                self.skip_token();
                Err(ArgError::Malformed)
            }
        }
    }

    fn skip_spaces(&mut self) {
        while self.input.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }
    }

    fn skip_token(&mut self) {
        while let Some(&b) = self.input.get(self.pos) {
            if b == 0 {
                return;
            }
            self.pos += 1;
            if b == b' ' {
                return;
            }
        }
    }
}
