//! Accelerometer implementations

pub mod lsm6ds3;

pub use lsm6ds3::{Lsm6ds3, DEFAULT_ADDRESS};
