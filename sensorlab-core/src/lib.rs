//! Board-agnostic core logic for the Sensorlab firmwares
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (LED output, accelerometer)
//! - LED state machine and command dispatcher
//! - Non-blocking blink timer
//! - Accelerometer poller that streams sample lines
//! - Rolling sample window with statistics
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod imu;
pub mod led;
pub mod state;
pub mod traits;
