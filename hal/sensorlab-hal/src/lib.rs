//! Sensorlab Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the application
//! crates are written against. Chip-specific adapters (RP2040) and the
//! host tools (serial device files, stdout) implement them, so the same
//! dispatcher and poller code runs on the board and on a workstation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  sensorlab-core / sensorlab-drivers          │
//! └──────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌──────────────────────────────────────────────┐
//! │  sensorlab-hal (this crate - traits)         │
//! └──────────────────────────────────────────────┘
//!                       │
//!         ┌─────────────┴─────────────┐
//!         ▼                           ▼
//! ┌────────────────┐          ┌────────────────┐
//! │ sensorlab-hal- │          │ sensorlab-host │
//! │    rp2040      │          │  (std adapters)│
//! └────────────────┘          └────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use i2c::I2cConfig;
pub use uart::{UartConfig, UartRx, UartTx};
