//! Line framing for the serial protocol.
//!
//! Every message is a single line of ASCII text:
//! - Bytes are accumulated until `\n`
//! - A trailing `\r` and surrounding whitespace are stripped
//! - Blank lines are ignored
//! - Lines longer than [`MAX_LINE_LEN`] are dropped up to the next `\n`

use heapless::{String, Vec};

/// Maximum line length in bytes (excluding the `\r\n` or `\n` terminator)
pub const MAX_LINE_LEN: usize = 64;

/// Line terminator
pub const LINE_END: u8 = b'\n';

// One spare byte for the `\r` of a full-length CRLF line
const BUFFER_LEN: usize = MAX_LINE_LEN + 1;

/// A complete, trimmed line
pub type Line = String<MAX_LINE_LEN>;

/// Errors that can occur while assembling lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the maximum length; the rest of it is discarded
    Overflow,
    /// Line is not valid UTF-8
    InvalidUtf8,
}

/// State machine for assembling incoming lines
#[derive(Debug, Clone)]
pub struct LineParser {
    state: ParseState,
    buffer: Vec<u8, BUFFER_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Collecting bytes of the current line
    Accumulating,
    /// Current line overflowed, skipping until the terminator
    Discarding,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Create a new line parser
    pub const fn new() -> Self {
        Self {
            state: ParseState::Accumulating,
            buffer: Vec::new(),
        }
    }

    /// Reset the parser state, dropping any partial line
    pub fn reset(&mut self) {
        self.state = ParseState::Accumulating;
        self.buffer.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` when a complete non-blank line is available,
    /// `Ok(None)` when more bytes are needed, or `Err` when the current line
    /// had to be dropped. An overflow is reported once per line.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match self.state {
            ParseState::Accumulating => {
                if byte == LINE_END {
                    return self.take_line();
                }
                // Only a `\r` may occupy the spare byte
                let limit = if byte == b'\r' {
                    BUFFER_LEN
                } else {
                    MAX_LINE_LEN
                };
                if self.buffer.len() >= limit || self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.state = ParseState::Discarding;
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
            ParseState::Discarding => {
                if byte == LINE_END {
                    self.state = ParseState::Accumulating;
                }
                Ok(None)
            }
        }
    }

    fn take_line(&mut self) -> Result<Option<Line>, LineError> {
        let result = match core::str::from_utf8(&self.buffer) {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    Ok(None)
                } else {
                    let mut line = Line::new();
                    // Cannot fail: only a trailing `\r` can exceed the limit
                    let _ = line.push_str(text);
                    Ok(Some(line))
                }
            }
            Err(_) => Err(LineError::InvalidUtf8),
        };
        self.buffer.clear();
        result
    }
}
