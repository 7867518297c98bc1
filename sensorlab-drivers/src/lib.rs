//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in sensorlab-core:
//!
//! - LED output on a GPIO pin
//! - LSM6DS3-family accelerometer over I2C

#![no_std]
#![deny(unsafe_code)]

pub mod imu;
pub mod led;
