//! Sensor poller
//!
//! Checks the accelerometer for a fresh sample and writes it to a serial
//! transmitter as one `x,y,z` line. The caller decides the cadence: the
//! firmware runs it in a tight loop, the host simulator on a timer.

use sensorlab_hal::UartTx;
use sensorlab_protocol::{AccelSample, SampleError};

use crate::traits::{Accelerometer, SensorError};

/// Line written when the sensor cannot be initialized
pub const INIT_FAILURE_MESSAGE: &str = "Failed to initialize IMU!";

/// Result of one poll
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// No new sample was available
    Idle,
    /// A sample was read and written
    Sent(AccelSample),
}

/// Poll errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollError<E> {
    /// Sensor access failed
    Sensor(SensorError),
    /// Sample could not be encoded
    Encode(SampleError),
    /// Serial write failed
    Serial(E),
}

impl<E> From<SensorError> for PollError<E> {
    fn from(err: SensorError) -> Self {
        PollError::Sensor(err)
    }
}

impl<E> From<SampleError> for PollError<E> {
    fn from(err: SampleError) -> Self {
        PollError::Encode(err)
    }
}

/// Accelerometer poller
pub struct SensorPoller<A: Accelerometer> {
    sensor: A,
    started: bool,
    samples_sent: u32,
}

impl<A: Accelerometer> SensorPoller<A> {
    /// Wrap a sensor; call [`start`](Self::start) before polling
    pub fn new(sensor: A) -> Self {
        Self {
            sensor,
            started: false,
            samples_sent: 0,
        }
    }

    /// Initialize the sensor
    pub fn start(&mut self) -> Result<(), SensorError> {
        self.sensor.init()?;
        self.started = true;
        Ok(())
    }

    /// Whether [`start`](Self::start) has succeeded
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Number of samples written so far (wraps)
    pub fn samples_sent(&self) -> u32 {
        self.samples_sent
    }

    /// Sensor output data rate in Hz
    pub fn sample_rate_hz(&self) -> f32 {
        self.sensor.sample_rate_hz()
    }

    /// Read and send one sample if the sensor has one ready
    pub fn poll<T: UartTx>(&mut self, tx: &mut T) -> Result<PollOutcome, PollError<T::Error>> {
        if !self.started {
            return Err(PollError::Sensor(SensorError::NotInitialized));
        }

        if !self.sensor.acceleration_available()? {
            return Ok(PollOutcome::Idle);
        }

        let sample = self.sensor.read_acceleration()?;
        let line = sample.to_line()?;
        tx.write_line(&line).map_err(PollError::Serial)?;

        self.samples_sent = self.samples_sent.wrapping_add(1);
        Ok(PollOutcome::Sent(sample))
    }

    /// Release the sensor
    pub fn into_inner(self) -> A {
        self.sensor
    }
}

/// Write [`INIT_FAILURE_MESSAGE`] as a line and flush
pub fn report_init_failure<T: UartTx>(tx: &mut T) -> Result<(), T::Error> {
    tx.write_line(INIT_FAILURE_MESSAGE)?;
    tx.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    struct MockSensor {
        init_result: Result<(), SensorError>,
        ready: bool,
        sample: AccelSample,
        reads: u32,
    }

    impl MockSensor {
        fn new(sample: AccelSample) -> Self {
            Self {
                init_result: Ok(()),
                ready: true,
                sample,
                reads: 0,
            }
        }
    }

    impl Accelerometer for MockSensor {
        fn init(&mut self) -> Result<(), SensorError> {
            self.init_result
        }

        fn acceleration_available(&mut self) -> Result<bool, SensorError> {
            Ok(self.ready)
        }

        fn read_acceleration(&mut self) -> Result<AccelSample, SensorError> {
            self.reads += 1;
            Ok(self.sample)
        }

        fn sample_rate_hz(&self) -> f32 {
            104.0
        }
    }

    #[derive(Default)]
    struct MockTx {
        buf: Vec<u8, 256>,
        flushed: bool,
        fail: bool,
    }

    impl MockTx {
        fn as_str(&self) -> &str {
            core::str::from_utf8(&self.buf).unwrap()
        }
    }

    impl UartTx for MockTx {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.buf.extend_from_slice(data)
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.flushed = true;
            Ok(())
        }
    }

    #[test]
    fn test_poll_before_start() {
        let mut poller = SensorPoller::new(MockSensor::new(AccelSample::default()));
        let mut tx = MockTx::default();
        assert_eq!(
            poller.poll(&mut tx),
            Err(PollError::Sensor(SensorError::NotInitialized))
        );
        assert!(tx.buf.is_empty());
    }

    #[test]
    fn test_start_failure() {
        let mut sensor = MockSensor::new(AccelSample::default());
        sensor.init_result = Err(SensorError::UnknownDevice(0x00));
        let mut poller = SensorPoller::new(sensor);
        assert_eq!(poller.start(), Err(SensorError::UnknownDevice(0x00)));
        assert!(!poller.is_started());
    }

    #[test]
    fn test_sends_sample_line() {
        let sample = AccelSample::new(0.0123, -0.5, 1.0);
        let mut poller = SensorPoller::new(MockSensor::new(sample));
        let mut tx = MockTx::default();

        poller.start().unwrap();
        assert_eq!(poller.poll(&mut tx), Ok(PollOutcome::Sent(sample)));
        assert_eq!(tx.as_str(), "0.0123,-0.5000,1.0000\n");
        assert_eq!(poller.samples_sent(), 1);
    }

    #[test]
    fn test_idle_when_no_data() {
        let mut sensor = MockSensor::new(AccelSample::default());
        sensor.ready = false;
        let mut poller = SensorPoller::new(sensor);
        let mut tx = MockTx::default();

        poller.start().unwrap();
        assert_eq!(poller.poll(&mut tx), Ok(PollOutcome::Idle));
        assert!(tx.buf.is_empty());
        assert_eq!(poller.samples_sent(), 0);
        assert_eq!(poller.into_inner().reads, 0);
    }

    #[test]
    fn test_serial_error() {
        let mut poller = SensorPoller::new(MockSensor::new(AccelSample::default()));
        let mut tx = MockTx {
            fail: true,
            ..Default::default()
        };

        poller.start().unwrap();
        assert_eq!(poller.poll(&mut tx), Err(PollError::Serial(())));
        assert_eq!(poller.samples_sent(), 0);
    }

    #[test]
    fn test_consecutive_samples() {
        let mut poller = SensorPoller::new(MockSensor::new(AccelSample::new(0.0, 0.0, 1.0)));
        let mut tx = MockTx::default();
        poller.start().unwrap();

        for _ in 0..3 {
            poller.poll(&mut tx).unwrap();
        }
        assert_eq!(
            tx.as_str(),
            "0.0000,0.0000,1.0000\n0.0000,0.0000,1.0000\n0.0000,0.0000,1.0000\n"
        );
        assert_eq!(poller.samples_sent(), 3);
    }

    #[test]
    fn test_report_init_failure() {
        let mut tx = MockTx::default();
        report_init_failure(&mut tx).unwrap();
        assert_eq!(tx.as_str(), "Failed to initialize IMU!\n");
        assert!(tx.flushed);
    }
}
