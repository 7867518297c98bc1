//! RP2040-specific HAL for the Sensorlab firmwares
//!
//! Thin adapters that implement the shared `sensorlab-hal` traits on
//! `embassy-rp` peripherals, plus conversions from the board-agnostic
//! bus configurations:
//!
//! - GPIO output pins (LED)
//! - Blocking UART transmitter (sample stream)
//! - UART and I2C configuration mapping

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod uart;

pub use gpio::LedPin;
pub use i2c::i2c_config;
pub use uart::{uart_config, SerialTx};
