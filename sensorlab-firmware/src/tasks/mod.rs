//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod imu;
pub mod led;
pub mod serial_rx;

pub use imu::{imu_task, BoardImu};
pub use led::{led_task, BoardLed};
pub use serial_rx::serial_rx_task;
