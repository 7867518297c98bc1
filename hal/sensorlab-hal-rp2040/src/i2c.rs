//! I2C configuration mapping

use sensorlab_hal::I2cConfig;

/// Build an `embassy-rp` I2C configuration
pub fn i2c_config(config: &I2cConfig) -> embassy_rp::i2c::Config {
    let mut rp = embassy_rp::i2c::Config::default();
    rp.frequency = config.frequency;
    rp
}
