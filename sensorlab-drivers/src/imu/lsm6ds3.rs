//! LSM6DS3-family accelerometer (I2C)
//!
//! Covers the LSM6DS3, LSM6DS3TR-C and LSM6DSOX, which share the
//! accelerometer register layout used here. Only the accelerometer is
//! enabled; the gyroscope stays powered down.
//!
//! # Register usage
//!
//! - `CTRL3_C`: block data update + address auto-increment
//! - `CTRL1_XL`: output data rate (bits 7:4) and full scale (bits 3:2)
//! - `STATUS_REG`: bit 0 (`XLDA`) set when a new sample is ready
//! - `OUTX_L_XL`..`OUTZ_H_XL`: three little-endian `i16` values

use embedded_hal::i2c::I2c;
use sensorlab_core::config::{DataRate, FullScale, ImuConfig};
use sensorlab_core::traits::{Accelerometer, SensorError};
use sensorlab_protocol::AccelSample;

/// I2C address with SA0 pulled low
pub const DEFAULT_ADDRESS: u8 = 0x6A;

/// I2C address with SA0 pulled high
pub const ALTERNATE_ADDRESS: u8 = 0x6B;

/// Register addresses
pub mod reg {
    /// Device identification
    pub const WHO_AM_I: u8 = 0x0F;
    /// Accelerometer control 1 (ODR, full scale)
    pub const CTRL1_XL: u8 = 0x10;
    /// Gyroscope control 2 (ODR, full scale)
    pub const CTRL2_G: u8 = 0x11;
    /// Control 3 (BDU, IF_INC, reset)
    pub const CTRL3_C: u8 = 0x12;
    /// Data ready flags
    pub const STATUS_REG: u8 = 0x1E;
    /// First accelerometer output byte
    pub const OUTX_L_XL: u8 = 0x28;
}

/// `WHO_AM_I` values of supported parts
pub const SUPPORTED_IDS: &[u8] = &[
    0x69, // LSM6DS3
    0x6A, // LSM6DS3TR-C
    0x6C, // LSM6DSOX
];

const CTRL3_C_BDU: u8 = 1 << 6;
const CTRL3_C_IF_INC: u8 = 1 << 2;
const STATUS_XLDA: u8 = 1 << 0;

/// LSM6DS3-family accelerometer driver
pub struct Lsm6ds3<I2C> {
    i2c: I2C,
    address: u8,
    full_scale: FullScale,
    data_rate: DataRate,
    initialized: bool,
}

impl<I2C: I2c> Lsm6ds3<I2C> {
    /// Create a driver at [`DEFAULT_ADDRESS`] with the given settings
    pub fn new(i2c: I2C, config: &ImuConfig) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS, config)
    }

    /// Create a driver at a specific address
    pub fn with_address(i2c: I2C, address: u8, config: &ImuConfig) -> Self {
        Self {
            i2c,
            address,
            full_scale: config.full_scale,
            data_rate: config.data_rate,
            initialized: false,
        }
    }

    /// Read the identification register
    pub fn who_am_i(&mut self) -> Result<u8, SensorError> {
        self.read_register(reg::WHO_AM_I)
    }

    /// Configured full scale
    pub fn full_scale(&self) -> FullScale {
        self.full_scale
    }

    /// Release the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, register: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .map_err(|_| SensorError::Bus)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|_| SensorError::Bus)
    }

    fn ensure_initialized(&self) -> Result<(), SensorError> {
        if self.initialized {
            Ok(())
        } else {
            Err(SensorError::NotInitialized)
        }
    }

    fn raw_to_g(&self, raw: i16) -> f32 {
        raw as f32 * self.full_scale.sensitivity_mg_per_lsb() / 1000.0
    }
}

/// `CTRL1_XL` value for a data rate and full scale
pub fn ctrl1_xl(data_rate: DataRate, full_scale: FullScale) -> u8 {
    let odr: u8 = match data_rate {
        DataRate::Hz26 => 0b0010,
        DataRate::Hz52 => 0b0011,
        DataRate::Hz104 => 0b0100,
        DataRate::Hz208 => 0b0101,
        DataRate::Hz416 => 0b0110,
        DataRate::Hz833 => 0b0111,
        DataRate::Hz1660 => 0b1000,
        DataRate::Hz3330 => 0b1001,
        DataRate::Hz6660 => 0b1010,
    };

    // Full-scale encoding is not monotonic
    let fs: u8 = match full_scale {
        FullScale::G2 => 0b00,
        FullScale::G16 => 0b01,
        FullScale::G4 => 0b10,
        FullScale::G8 => 0b11,
    };

    (odr << 4) | (fs << 2)
}

impl<I2C: I2c> Accelerometer for Lsm6ds3<I2C> {
    fn init(&mut self) -> Result<(), SensorError> {
        self.initialized = false;

        let id = self.who_am_i()?;
        if !SUPPORTED_IDS.contains(&id) {
            return Err(SensorError::UnknownDevice(id));
        }

        self.write_register(reg::CTRL3_C, CTRL3_C_BDU | CTRL3_C_IF_INC)?;
        self.write_register(reg::CTRL2_G, 0x00)?;
        self.write_register(reg::CTRL1_XL, ctrl1_xl(self.data_rate, self.full_scale))?;

        self.initialized = true;
        Ok(())
    }

    fn acceleration_available(&mut self) -> Result<bool, SensorError> {
        self.ensure_initialized()?;
        let status = self.read_register(reg::STATUS_REG)?;
        Ok(status & STATUS_XLDA != 0)
    }

    fn read_acceleration(&mut self) -> Result<AccelSample, SensorError> {
        self.ensure_initialized()?;

        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::OUTX_L_XL], &mut buf)
            .map_err(|_| SensorError::Bus)?;

        let x = i16::from_le_bytes([buf[0], buf[1]]);
        let y = i16::from_le_bytes([buf[2], buf[3]]);
        let z = i16::from_le_bytes([buf[4], buf[5]]);

        Ok(AccelSample::new(
            self.raw_to_g(x),
            self.raw_to_g(y),
            self.raw_to_g(z),
        ))
    }

    fn sample_rate_hz(&self) -> f32 {
        self.data_rate.as_hz() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    /// Register-file I2C device with auto-increment
    struct MockBus {
        address: u8,
        regs: [u8; 128],
        pointer: usize,
        writes: u32,
    }

    impl MockBus {
        fn new(who_am_i: u8) -> Self {
            let mut regs = [0u8; 128];
            regs[reg::WHO_AM_I as usize] = who_am_i;
            Self {
                address: DEFAULT_ADDRESS,
                regs,
                pointer: 0,
                writes: 0,
            }
        }

        fn set_axes(&mut self, x: i16, y: i16, z: i16) {
            let base = reg::OUTX_L_XL as usize;
            for (i, v) in [x, y, z].iter().enumerate() {
                let bytes = v.to_le_bytes();
                self.regs[base + 2 * i] = bytes[0];
                self.regs[base + 2 * i + 1] = bytes[1];
            }
        }
    }

    impl ErrorType for MockBus {
        type Error = ErrorKind;
    }

    impl I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if address != self.address {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }

            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((first, rest)) = bytes.split_first() {
                            self.pointer = *first as usize;
                            for b in rest {
                                self.regs[self.pointer] = *b;
                                self.pointer += 1;
                                self.writes += 1;
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for b in buf.iter_mut() {
                            *b = self.regs[self.pointer];
                            self.pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_init_configures_registers() {
        let mut imu = Lsm6ds3::new(MockBus::new(0x6C), &ImuConfig::default());
        imu.init().unwrap();

        let bus = imu.release();
        assert_eq!(bus.regs[reg::CTRL3_C as usize], 0x44);
        assert_eq!(bus.regs[reg::CTRL2_G as usize], 0x00);
        // 104 Hz, ±4 g
        assert_eq!(bus.regs[reg::CTRL1_XL as usize], 0x48);
        assert_eq!(bus.writes, 3);
    }

    #[test]
    fn test_accepts_family_ids() {
        for &id in SUPPORTED_IDS {
            let mut imu = Lsm6ds3::new(MockBus::new(id), &ImuConfig::default());
            assert_eq!(imu.init(), Ok(()));
        }
    }

    #[test]
    fn test_unknown_device() {
        let mut imu = Lsm6ds3::new(MockBus::new(0x33), &ImuConfig::default());
        assert_eq!(imu.init(), Err(SensorError::UnknownDevice(0x33)));
        assert_eq!(imu.release().writes, 0);
    }

    #[test]
    fn test_addresses_follow_sa0() {
        // SA0 is the address LSB
        assert_eq!(DEFAULT_ADDRESS & 1, 0);
        assert_eq!(ALTERNATE_ADDRESS, DEFAULT_ADDRESS | 1);
    }

    #[test]
    fn test_missing_device_is_bus_error() {
        let mut imu = Lsm6ds3::with_address(
            MockBus::new(0x6C),
            ALTERNATE_ADDRESS,
            &ImuConfig::default(),
        );
        assert_eq!(imu.init(), Err(SensorError::Bus));
    }

    #[test]
    fn test_reads_require_init() {
        let mut imu = Lsm6ds3::new(MockBus::new(0x6C), &ImuConfig::default());
        assert_eq!(
            imu.acceleration_available(),
            Err(SensorError::NotInitialized)
        );
        assert_eq!(imu.read_acceleration(), Err(SensorError::NotInitialized));
    }

    #[test]
    fn test_data_ready_flag() {
        let mut imu = Lsm6ds3::new(MockBus::new(0x6C), &ImuConfig::default());
        imu.init().unwrap();
        assert_eq!(imu.acceleration_available(), Ok(false));

        let mut bus = imu.release();
        bus.regs[reg::STATUS_REG as usize] = 0b0000_0111;
        let mut imu = Lsm6ds3::new(bus, &ImuConfig::default());
        imu.init().unwrap();
        assert_eq!(imu.acceleration_available(), Ok(true));
    }

    #[test]
    fn test_scaled_reading() {
        let mut bus = MockBus::new(0x6C);
        // 1 g at ±4 g is 1000 / 0.122 ≈ 8197 LSB
        bus.set_axes(8197, -8197, 0);
        let mut imu = Lsm6ds3::new(bus, &ImuConfig::default());
        imu.init().unwrap();

        let sample = imu.read_acceleration().unwrap();
        assert!(approx(sample.x, 1.0));
        assert!(approx(sample.y, -1.0));
        assert!(approx(sample.z, 0.0));
    }

    #[test]
    fn test_scaled_reading_2g() {
        let mut bus = MockBus::new(0x69);
        bus.set_axes(i16::MIN, 0, 16393);
        let config = ImuConfig {
            full_scale: FullScale::G2,
            ..Default::default()
        };
        let mut imu = Lsm6ds3::new(bus, &config);
        imu.init().unwrap();

        let sample = imu.read_acceleration().unwrap();
        assert!(approx(sample.x, -32768.0 * 0.061 / 1000.0));
        assert!(approx(sample.z, 1.0));
    }

    #[test]
    fn test_ctrl1_xl_encoding() {
        assert_eq!(ctrl1_xl(DataRate::Hz104, FullScale::G2), 0x40);
        assert_eq!(ctrl1_xl(DataRate::Hz104, FullScale::G16), 0x44);
        assert_eq!(ctrl1_xl(DataRate::Hz104, FullScale::G8), 0x4C);
        assert_eq!(ctrl1_xl(DataRate::Hz6660, FullScale::G4), 0xA8);
        assert_eq!(ctrl1_xl(DataRate::Hz26, FullScale::G2), 0x20);
    }

    #[test]
    fn test_sample_rate() {
        let config = ImuConfig {
            data_rate: DataRate::Hz833,
            ..Default::default()
        };
        let imu = Lsm6ds3::new(MockBus::new(0x6C), &config);
        assert!(approx(imu.sample_rate_hz(), 833.0));
    }
}
