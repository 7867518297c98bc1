//! Message types for the LED controller
//!
//! Messages are divided into two directions:
//! - Host → Board: command tokens (`on`, `off`, `blink`, `status`)
//! - Board → Host: the status code, only in response to `status`

use core::fmt;
use core::str::FromStr;

// Command tokens: Host → Board
pub const CMD_ON: &str = "on";
pub const CMD_OFF: &str = "off";
pub const CMD_BLINK: &str = "blink";
pub const CMD_STATUS: &str = "status";

// Status codes: Board → Host
pub const STATUS_OFF: &str = "0";
pub const STATUS_ON: &str = "1";
pub const STATUS_BLINKING: &str = "2";

/// Command parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Token was empty after trimming
    Empty,
    /// Token is not one of the known commands
    UnknownCommand,
}

/// Commands from the host to the LED controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedCommand {
    /// Light the LED steadily
    On,
    /// Turn the LED off
    Off,
    /// Toggle the LED at the configured interval
    Blink,
    /// Ask for the current state
    Status,
}

impl LedCommand {
    /// Parse a command token
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    pub fn parse(token: &str) -> Result<Self, CommandError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CommandError::Empty);
        }

        [
            (CMD_ON, LedCommand::On),
            (CMD_OFF, LedCommand::Off),
            (CMD_BLINK, LedCommand::Blink),
            (CMD_STATUS, LedCommand::Status),
        ]
        .into_iter()
        .find(|(name, _)| token.eq_ignore_ascii_case(name))
        .map(|(_, cmd)| cmd)
        .ok_or(CommandError::UnknownCommand)
    }

    /// Wire token for this command (without terminator)
    pub fn as_str(&self) -> &'static str {
        match self {
            LedCommand::On => CMD_ON,
            LedCommand::Off => CMD_OFF,
            LedCommand::Blink => CMD_BLINK,
            LedCommand::Status => CMD_STATUS,
        }
    }

    /// Whether the board answers this command with a status line
    pub fn expects_reply(&self) -> bool {
        matches!(self, LedCommand::Status)
    }
}

impl FromStr for LedCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LED state as reported over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedStatus {
    Off,
    On,
    Blinking,
}

impl LedStatus {
    /// Numeric status code (0 = off, 1 = on, 2 = blinking)
    pub fn code(&self) -> u8 {
        match self {
            LedStatus::Off => 0,
            LedStatus::On => 1,
            LedStatus::Blinking => 2,
        }
    }

    /// Reply line payload (without terminator)
    pub fn as_str(&self) -> &'static str {
        match self {
            LedStatus::Off => STATUS_OFF,
            LedStatus::On => STATUS_ON,
            LedStatus::Blinking => STATUS_BLINKING,
        }
    }

    /// Complete reply line including the terminator
    pub fn reply(&self) -> &'static [u8] {
        match self {
            LedStatus::Off => b"0\n",
            LedStatus::On => b"1\n",
            LedStatus::Blinking => b"2\n",
        }
    }

    /// Decode a reply line
    ///
    /// Returns `None` for anything that is not a known status code.
    pub fn parse(reply: &str) -> Option<Self> {
        match reply.trim() {
            STATUS_OFF => Some(LedStatus::Off),
            STATUS_ON => Some(LedStatus::On),
            STATUS_BLINKING => Some(LedStatus::Blinking),
            _ => None,
        }
    }

    /// Human readable description used by the host tools
    pub fn describe(&self) -> &'static str {
        match self {
            LedStatus::Off => "LED off",
            LedStatus::On => "LED on",
            LedStatus::Blinking => "LED blink",
        }
    }
}

impl fmt::Display for LedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
