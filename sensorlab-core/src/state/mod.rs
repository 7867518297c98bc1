//! LED state machine
//!
//! Defines the authoritative runtime behavior of the LED controller.
//! The state machine is explicit, finite, and deterministic.

pub mod machine;

pub use machine::LedState;
