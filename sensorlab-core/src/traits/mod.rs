//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod accelerometer;
pub mod led;

pub use accelerometer::{Accelerometer, SensorError};
pub use led::LedOutput;
