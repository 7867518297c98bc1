//! Simulated accelerometer
//!
//! Produces `x = sin t`, `y = cos t`, `z = sin(t + 1)` with uniform noise
//! and streams it through the same [`SensorPoller`] the firmware uses, so
//! the capture tool can be exercised without a board.

use std::io::Write;
use std::thread;
use std::time::Duration;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sensorlab_core::imu::{PollError, PollOutcome, SensorPoller};
use sensorlab_core::traits::{Accelerometer, SensorError};
use sensorlab_protocol::AccelSample;

use crate::error::{HostError, Result};
use crate::port::SerialTx;

/// Noise amplitude in g
pub const NOISE_G: f32 = 0.1;

/// Accelerometer producing phase-shifted sine waves plus noise
pub struct SimulatedAccelerometer {
    rng: StdRng,
    step_s: f32,
    t: f32,
    noise: f32,
    initialized: bool,
}

impl SimulatedAccelerometer {
    /// Create a simulator advancing `step` per sample
    ///
    /// A `seed` makes the noise reproducible.
    pub fn new(step: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            step_s: step.as_secs_f32(),
            t: 0.0,
            noise: NOISE_G,
            initialized: false,
        }
    }

    /// Change the noise amplitude
    pub fn with_noise(mut self, noise: f32) -> Self {
        self.noise = noise.abs();
        self
    }

    fn jitter(&mut self) -> f32 {
        if self.noise == 0.0 {
            0.0
        } else {
            self.rng.gen_range(-self.noise..=self.noise)
        }
    }
}

impl Accelerometer for SimulatedAccelerometer {
    fn init(&mut self) -> std::result::Result<(), SensorError> {
        self.initialized = true;
        Ok(())
    }

    fn acceleration_available(&mut self) -> std::result::Result<bool, SensorError> {
        Ok(self.initialized)
    }

    fn read_acceleration(&mut self) -> std::result::Result<AccelSample, SensorError> {
        if !self.initialized {
            return Err(SensorError::NotInitialized);
        }

        let t = self.t;
        self.t += self.step_s;

        Ok(AccelSample::new(
            t.sin() + self.jitter(),
            t.cos() + self.jitter(),
            (t + 1.0).sin() + self.jitter(),
        ))
    }

    fn sample_rate_hz(&self) -> f32 {
        if self.step_s > 0.0 {
            1.0 / self.step_s
        } else {
            0.0
        }
    }
}

/// Stream simulated samples to `out`
///
/// Stops after `count` samples, or runs until the writer fails when
/// `count` is `None`.
pub fn run<W: Write>(
    sensor: SimulatedAccelerometer,
    out: W,
    period: Duration,
    count: Option<u64>,
) -> Result<u64> {
    let mut poller = SensorPoller::new(sensor);
    poller.start()?;
    info!("Simulating {:.1} Hz", poller.sample_rate_hz());

    let mut tx = SerialTx::new(out);
    let mut sent = 0u64;

    while count.map_or(true, |limit| sent < limit) {
        match poller.poll(&mut tx) {
            Ok(PollOutcome::Sent(_)) => sent += 1,
            Ok(PollOutcome::Idle) => {}
            Err(PollError::Sensor(e)) => return Err(HostError::Sensor(e)),
            Err(PollError::Encode(e)) => return Err(HostError::Sample(e)),
            Err(PollError::Serial(e)) => return Err(HostError::Io(e)),
        }

        if !period.is_zero() {
            thread::sleep(period);
        }
    }

    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_free_waveform() {
        let mut sensor = SimulatedAccelerometer::new(Duration::from_millis(500), None).with_noise(0.0);
        sensor.init().unwrap();

        let first = sensor.read_acceleration().unwrap();
        assert!((first.x - 0.0).abs() < 1e-6);
        assert!((first.y - 1.0).abs() < 1e-6);
        assert!((first.z - 1.0f32.sin()).abs() < 1e-6);

        let second = sensor.read_acceleration().unwrap();
        assert!((second.x - 0.5f32.sin()).abs() < 1e-6);
        assert!((second.y - 0.5f32.cos()).abs() < 1e-6);
    }

    #[test]
    fn test_noise_is_bounded() {
        let mut sensor = SimulatedAccelerometer::new(Duration::from_millis(10), Some(7));
        sensor.init().unwrap();

        for i in 0..200 {
            let t = i as f32 * 0.01;
            let s = sensor.read_acceleration().unwrap();
            assert!((s.x - t.sin()).abs() <= NOISE_G + 1e-4);
            assert!((s.y - t.cos()).abs() <= NOISE_G + 1e-4);
            assert!((s.z - (t + 1.0).sin()).abs() <= NOISE_G + 1e-4);
        }
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let a = run(
            SimulatedAccelerometer::new(Duration::from_millis(10), Some(42)),
            Vec::new(),
            Duration::ZERO,
            Some(5),
        );
        assert_eq!(a.unwrap(), 5);

        let mut out_a = Vec::new();
        let mut out_b = Vec::new();
        run(
            SimulatedAccelerometer::new(Duration::from_millis(10), Some(42)),
            &mut out_a,
            Duration::ZERO,
            Some(5),
        )
        .unwrap();
        run(
            SimulatedAccelerometer::new(Duration::from_millis(10), Some(42)),
            &mut out_b,
            Duration::ZERO,
            Some(5),
        )
        .unwrap();
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_output_is_sample_lines() {
        let mut out = Vec::new();
        let sensor = SimulatedAccelerometer::new(Duration::from_millis(20), Some(1)).with_noise(0.0);
        run(sensor, &mut out, Duration::ZERO, Some(3)).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "0.0000,1.0000,0.8415");
        for line in lines {
            assert!(AccelSample::parse(line).is_ok());
        }
    }

    #[test]
    fn test_sample_rate() {
        let sensor = SimulatedAccelerometer::new(Duration::from_millis(20), Some(1));
        assert!((sensor.sample_rate_hz() - 50.0).abs() < 1e-3);
    }
}
