//! LED control
//!
//! Decodes serial commands, applies them to the LED state machine and
//! drives the output, including the non-blocking blink timer.

pub mod blink;
pub mod controller;
pub mod decoder;

pub use blink::BlinkTimer;
pub use controller::LedController;
pub use decoder::{CommandDecoder, DecodeError};
