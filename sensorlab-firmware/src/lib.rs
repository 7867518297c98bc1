//! Sensorlab firmware support
//!
//! Shared pieces of the two RP2040 binaries:
//!
//! - `led-controller`: line-based serial commands drive the board LED
//! - `imu-streamer`: accelerometer samples streamed as `x,y,z` lines
//!
//! Board settings come from `board.toml`, validated at build time.

#![no_std]

pub mod channels;
pub mod config;
pub mod tasks;
