//! Serial command decoder
//!
//! Turns the raw byte stream from the serial port into [`LedCommand`]s.
//! Anything that is not a command is reported as an error and never
//! reaches the controller.

use sensorlab_protocol::{LedCommand, Line, LineError, LineParser};

/// Errors produced while decoding commands
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Line could not be framed (too long, not UTF-8)
    Line(LineError),
    /// Complete line that is not a known command
    UnknownCommand(Line),
}

impl From<LineError> for DecodeError {
    fn from(e: LineError) -> Self {
        DecodeError::Line(e)
    }
}

/// Byte-fed command decoder
#[derive(Debug, Clone, Default)]
pub struct CommandDecoder {
    parser: LineParser,
}

impl CommandDecoder {
    pub const fn new() -> Self {
        Self {
            parser: LineParser::new(),
        }
    }

    /// Drop any partial line, e.g. after a receive error
    pub fn reset(&mut self) {
        self.parser.reset();
    }

    /// Feed one received byte
    ///
    /// Returns a command once its line is complete.
    pub fn feed(&mut self, byte: u8) -> Result<Option<LedCommand>, DecodeError> {
        let Some(line) = self.parser.feed(byte)? else {
            return Ok(None);
        };

        LedCommand::parse(&line)
            .map(Some)
            .map_err(|_| DecodeError::UnknownCommand(line))
    }
}
