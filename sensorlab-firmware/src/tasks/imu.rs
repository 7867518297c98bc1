//! IMU streaming task
//!
//! Initializes the accelerometer and writes every new sample to the
//! serial line. If the sensor does not come up, the task reports it once
//! and parks forever.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Timer;

use sensorlab_core::config::ImuConfig;
use sensorlab_core::imu::{report_init_failure, PollError, PollOutcome, SensorPoller};
use sensorlab_drivers::imu::Lsm6ds3;
use sensorlab_hal_rp2040::SerialTx;

/// Accelerometer on the board's I2C0 bus
pub type BoardImu = Lsm6ds3<I2c<'static, I2C0, Blocking>>;

/// IMU task - sample streamer
#[embassy_executor::task]
pub async fn imu_task(imu: BoardImu, mut tx: SerialTx<'static>, config: ImuConfig) {
    info!("IMU task started");

    let mut poller = SensorPoller::new(imu);

    if let Err(e) = poller.start() {
        error!("IMU init failed: {:?}", e);
        if let Err(e) = report_init_failure(&mut tx) {
            warn!("Failed to report init failure: {:?}", e);
        }
        halt().await;
    }

    info!(
        "IMU ready: {} Hz, +/-{} g",
        config.data_rate.as_hz(),
        config.full_scale.as_g()
    );

    loop {
        match poller.poll(&mut tx) {
            Ok(PollOutcome::Sent(sample)) => trace!("Sample: {}", sample),
            Ok(PollOutcome::Idle) => {}
            Err(PollError::Sensor(e)) => warn!("IMU read failed: {:?}", e),
            Err(PollError::Encode(e)) => warn!("Sample encode failed: {:?}", e),
            Err(PollError::Serial(e)) => warn!("UART write failed: {:?}", e),
        }

        if config.poll_interval_ms > 0 {
            Timer::after_millis(config.poll_interval_ms as u64).await;
        } else {
            yield_now().await;
        }
    }
}

/// Park the task forever
async fn halt() -> ! {
    loop {
        Timer::after_secs(60).await;
    }
}
