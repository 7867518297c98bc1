//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use sensorlab_protocol::LedCommand;

/// Channel capacity for parsed LED commands
const LED_COMMAND_CHANNEL_SIZE: usize = 8;

/// Commands parsed by the serial RX task, consumed by the LED task
pub static LED_COMMANDS: Channel<CriticalSectionRawMutex, LedCommand, LED_COMMAND_CHANNEL_SIZE> =
    Channel::new();
