//! State machine definition
//!
//! The LED output is a function of the current state and, while
//! blinking, of the blink timer.

use sensorlab_protocol::{LedCommand, LedStatus};

/// LED controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    /// LED dark
    #[default]
    Off,
    /// LED lit steadily
    On,
    /// LED toggling at the blink interval
    Blinking,
}

impl LedState {
    /// Steady output level for this state
    ///
    /// Returns `None` while blinking, where the level is owned by the
    /// blink timer.
    pub fn steady_level(&self) -> Option<bool> {
        match self {
            LedState::Off => Some(false),
            LedState::On => Some(true),
            LedState::Blinking => None,
        }
    }

    /// Check if the output is driven by the blink timer
    pub fn is_blinking(&self) -> bool {
        matches!(self, LedState::Blinking)
    }

    /// Wire representation of this state
    pub fn status(&self) -> LedStatus {
        match self {
            LedState::Off => LedStatus::Off,
            LedState::On => LedStatus::On,
            LedState::Blinking => LedStatus::Blinking,
        }
    }

    /// Process a command and return the next state
    ///
    /// Every command is accepted from every state; `status` never changes
    /// the state.
    pub fn transition(self, command: LedCommand) -> Self {
        match command {
            LedCommand::On => LedState::On,
            LedCommand::Off => LedState::Off,
            LedCommand::Blink => LedState::Blinking,
            LedCommand::Status => self,
        }
    }
}

impl From<LedState> for LedStatus {
    fn from(state: LedState) -> Self {
        state.status()
    }
}
