//! Configuration type definitions

use sensorlab_hal::UartConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default blink half-period in milliseconds
pub const DEFAULT_BLINK_INTERVAL_MS: u32 = 500;

/// Longest accepted blink half-period
pub const MAX_BLINK_INTERVAL_MS: u32 = 60_000;

/// Longest accepted delay between sensor polls
pub const MAX_POLL_INTERVAL_MS: u32 = 10_000;

/// Default serial baud rate
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// Baud rates accepted by both the firmware and the host tools
pub const SUPPORTED_BAUDRATES: &[u32] = &[9600, 19_200, 38_400, 57_600, 115_200];

/// Default number of samples kept by a sample window
pub const DEFAULT_WINDOW_LEN: usize = 100;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Blink interval is zero or above [`MAX_BLINK_INTERVAL_MS`]
    BlinkIntervalOutOfRange,
    /// Poll interval is above [`MAX_POLL_INTERVAL_MS`]
    PollIntervalOutOfRange,
    /// Full scale is not one of 2, 4, 8, 16 g
    UnsupportedFullScale,
    /// Data rate is not one of the sensor's output data rates
    UnsupportedDataRate,
    /// Baud rate is not in [`SUPPORTED_BAUDRATES`]
    UnsupportedBaudrate,
}

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FullScale {
    /// ±2 g
    G2,
    /// ±4 g
    #[default]
    G4,
    /// ±8 g
    G8,
    /// ±16 g
    G16,
}

impl FullScale {
    /// Look up a range by its magnitude in g
    pub fn from_g(g: u8) -> Result<Self, ConfigError> {
        match g {
            2 => Ok(FullScale::G2),
            4 => Ok(FullScale::G4),
            8 => Ok(FullScale::G8),
            16 => Ok(FullScale::G16),
            _ => Err(ConfigError::UnsupportedFullScale),
        }
    }

    /// Range magnitude in g
    pub fn as_g(&self) -> u8 {
        match self {
            FullScale::G2 => 2,
            FullScale::G4 => 4,
            FullScale::G8 => 8,
            FullScale::G16 => 16,
        }
    }

    /// Sensitivity in mg per LSB for a 16-bit output
    pub fn sensitivity_mg_per_lsb(&self) -> f32 {
        match self {
            FullScale::G2 => 0.061,
            FullScale::G4 => 0.122,
            FullScale::G8 => 0.244,
            FullScale::G16 => 0.488,
        }
    }
}

/// Accelerometer output data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataRate {
    Hz26,
    Hz52,
    #[default]
    Hz104,
    Hz208,
    Hz416,
    Hz833,
    Hz1660,
    Hz3330,
    Hz6660,
}

impl DataRate {
    /// Look up a rate by its frequency in Hz
    pub fn from_hz(hz: u16) -> Result<Self, ConfigError> {
        match hz {
            26 => Ok(DataRate::Hz26),
            52 => Ok(DataRate::Hz52),
            104 => Ok(DataRate::Hz104),
            208 => Ok(DataRate::Hz208),
            416 => Ok(DataRate::Hz416),
            833 => Ok(DataRate::Hz833),
            1660 => Ok(DataRate::Hz1660),
            3330 => Ok(DataRate::Hz3330),
            6660 => Ok(DataRate::Hz6660),
            _ => Err(ConfigError::UnsupportedDataRate),
        }
    }

    /// Frequency in Hz
    pub fn as_hz(&self) -> u16 {
        match self {
            DataRate::Hz26 => 26,
            DataRate::Hz52 => 52,
            DataRate::Hz104 => 104,
            DataRate::Hz208 => 208,
            DataRate::Hz416 => 416,
            DataRate::Hz833 => 833,
            DataRate::Hz1660 => 1660,
            DataRate::Hz3330 => 3330,
            DataRate::Hz6660 => 6660,
        }
    }
}

/// Serial line configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

impl SerialConfig {
    /// Validate against [`SUPPORTED_BAUDRATES`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if SUPPORTED_BAUDRATES.contains(&self.baudrate) {
            Ok(())
        } else {
            Err(ConfigError::UnsupportedBaudrate)
        }
    }

    /// UART settings (8N1) for this line
    pub fn uart_config(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baudrate)
    }
}

/// LED controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedConfig {
    /// Time between toggles while blinking, in milliseconds
    pub blink_interval_ms: u32,
    /// LED is lit when the pin is low
    pub active_low: bool,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            blink_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
            active_low: false,
        }
    }
}

impl LedConfig {
    /// Check the blink interval range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blink_interval_ms == 0 || self.blink_interval_ms > MAX_BLINK_INTERVAL_MS {
            return Err(ConfigError::BlinkIntervalOutOfRange);
        }
        Ok(())
    }
}

/// Accelerometer streamer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImuConfig {
    /// Measurement range
    pub full_scale: FullScale,
    /// Sensor output data rate
    pub data_rate: DataRate,
    /// Delay between polls in milliseconds (0 = poll continuously)
    pub poll_interval_ms: u32,
}

impl Default for ImuConfig {
    fn default() -> Self {
        Self {
            full_scale: FullScale::G4,
            data_rate: DataRate::Hz104,
            poll_interval_ms: 0,
        }
    }
}

impl ImuConfig {
    /// Check the poll interval range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms > MAX_POLL_INTERVAL_MS {
            return Err(ConfigError::PollIntervalOutOfRange);
        }
        Ok(())
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    pub serial: SerialConfig,
    pub led: LedConfig,
    pub imu: ImuConfig,
}

impl BoardConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.serial.validate()?;
        self.led.validate()?;
        self.imu.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BoardConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.serial.baudrate, 9600);
        assert_eq!(config.led.blink_interval_ms, 500);
        assert_eq!(config.imu.full_scale, FullScale::G4);
        assert_eq!(config.imu.data_rate, DataRate::Hz104);
    }

    #[test]
    fn test_full_scale_lookup() {
        assert_eq!(FullScale::from_g(2), Ok(FullScale::G2));
        assert_eq!(FullScale::from_g(16), Ok(FullScale::G16));
        assert_eq!(FullScale::from_g(3), Err(ConfigError::UnsupportedFullScale));
        assert_eq!(FullScale::G8.as_g(), 8);
    }

    #[test]
    fn test_sensitivity_doubles_with_range() {
        let g2 = FullScale::G2.sensitivity_mg_per_lsb();
        let g4 = FullScale::G4.sensitivity_mg_per_lsb();
        let g16 = FullScale::G16.sensitivity_mg_per_lsb();
        assert!((g4 - 2.0 * g2).abs() < 1e-6);
        assert!((g16 - 8.0 * g2).abs() < 1e-6);
    }

    #[test]
    fn test_data_rate_lookup() {
        assert_eq!(DataRate::from_hz(104), Ok(DataRate::Hz104));
        assert_eq!(DataRate::from_hz(6660), Ok(DataRate::Hz6660));
        assert_eq!(DataRate::from_hz(100), Err(ConfigError::UnsupportedDataRate));
        assert_eq!(DataRate::Hz833.as_hz(), 833);
    }

    #[test]
    fn test_blink_interval_range() {
        let mut led = LedConfig::default();
        led.blink_interval_ms = 0;
        assert_eq!(led.validate(), Err(ConfigError::BlinkIntervalOutOfRange));
        led.blink_interval_ms = MAX_BLINK_INTERVAL_MS + 1;
        assert_eq!(led.validate(), Err(ConfigError::BlinkIntervalOutOfRange));
        led.blink_interval_ms = 1;
        assert_eq!(led.validate(), Ok(()));
    }

    #[test]
    fn test_poll_interval_range() {
        let imu = ImuConfig {
            poll_interval_ms: MAX_POLL_INTERVAL_MS + 1,
            ..Default::default()
        };
        assert_eq!(imu.validate(), Err(ConfigError::PollIntervalOutOfRange));
    }

    #[test]
    fn test_baudrate_validation() {
        let serial = SerialConfig { baudrate: 115_200 };
        assert_eq!(serial.validate(), Ok(()));
        assert_eq!(serial.uart_config().baudrate, 115_200);

        let serial = SerialConfig { baudrate: 1234 };
        assert_eq!(serial.validate(), Err(ConfigError::UnsupportedBaudrate));

        let config = BoardConfig {
            serial,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::UnsupportedBaudrate));
    }
}
