//! Forward-only cursor over an encoded hash string.
//!
//! Every primitive is total: truncated or garbage input makes a read come back
//! empty instead of panicking, so the decoder can run its whole grammar
//! unconditionally and validate once at the end.

/// Cursor over a borrowed byte slice. The offset never moves backwards.
#[derive(Debug)]
pub struct Scanner<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Returns the current offset within the slice.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Returns the number of bytes left after the current offset.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    fn rest(&self) -> &'a [u8] {
        self.bytes.get(self.offset..).unwrap_or_default()
    }

    /// Compares the next `expected.len()` bytes against `expected`.
    ///
    /// When enough bytes remain the cursor moves past them whether or not they
    /// matched. When too few remain the cursor stays put and `false` is
    /// returned.
    pub fn match_literal(&mut self, expected: &[u8]) -> bool {
        let Some(candidate) = self.rest().get(..expected.len()) else {
            return false;
        };
        self.offset += expected.len();
        candidate == expected
    }

    /// Reads a single byte, or `None` at the end of the buffer.
    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.rest().first()?;
        self.offset += 1;
        Some(byte)
    }

    /// Parses a run of ASCII decimal digits as a `u32`.
    ///
    /// Returns `None` when no digit is present (the cursor does not move) or
    /// when the value would not fit in 32 bits (the cursor stops on the digit
    /// that overflowed).
    pub fn parse_u32(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;

        while let Some(&byte) = self.rest().first() {
            if !byte.is_ascii_digit() {
                break;
            }
            let digit = u32::from(byte - b'0');
            let next = value.unwrap_or(0).checked_mul(10)?.checked_add(digit)?;
            value = Some(next);
            self.offset += 1;
        }

        value
    }

    /// Moves the cursor just past the next `delim`. Does nothing if `delim`
    /// does not occur again.
    pub fn skip_until(&mut self, delim: u8) {
        if let Some(idx) = self.rest().iter().position(|&b| b == delim) {
            self.offset += idx + 1;
        }
    }

    /// Returns the bytes before the next `delim` and moves past the delimiter.
    ///
    /// Returns `None` (without moving) if `delim` is absent or the span before
    /// it would be empty.
    pub fn read_slice(&mut self, delim: u8) -> Option<&'a [u8]> {
        let rest = self.rest();
        let idx = rest.iter().position(|&b| b == delim)?;
        if idx == 0 {
            return None;
        }
        self.offset += idx + 1;
        Some(&rest[..idx])
    }

    /// Returns everything after the cursor and moves to the end, or `None` if
    /// nothing is left.
    pub fn read_remainder(&mut self) -> Option<&'a [u8]> {
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        self.offset = self.bytes.len();
        Some(rest)
    }
}

impl<'a> From<&'a [u8]> for Scanner<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Scanner::new(bytes)
    }
}
