//! Board configuration
//!
//! Constants generated by `build.rs` from `board.toml`.

use sensorlab_core::config::{BoardConfig, DataRate, FullScale, ImuConfig, LedConfig, SerialConfig};
use sensorlab_hal::I2cConfig;

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// IMU bus settings
pub const fn imu_i2c_config() -> I2cConfig {
    I2cConfig {
        frequency: I2C_FREQUENCY_HZ,
    }
}
