//! Accelerometer trait

use sensorlab_protocol::AccelSample;

/// Errors that can occur with the accelerometer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed (NACK, arbitration, timeout)
    Bus,
    /// Device answered with an unexpected identity register value
    UnknownDevice(u8),
    /// Sensor used before a successful `init`
    NotInitialized,
}

/// Trait for three-axis accelerometers
///
/// Implementations should handle the specific part (LSM6DS3 family,
/// simulated sources, etc.). All readings are in g.
pub trait Accelerometer {
    /// Probe and configure the device
    ///
    /// Must succeed before any other method is used.
    fn init(&mut self) -> Result<(), SensorError>;

    /// Check whether a new sample is ready to be read
    ///
    /// Takes `&mut self` because checking typically requires a bus read.
    fn acceleration_available(&mut self) -> Result<bool, SensorError>;

    /// Read the latest sample
    fn read_acceleration(&mut self) -> Result<AccelSample, SensorError>;

    /// Output data rate in Hz
    fn sample_rate_hz(&self) -> f32;
}
