//! Accelerometer streaming
//!
//! The poller turns sensor readings into sample lines; the window keeps
//! the most recent samples for statistics on the receiving side.

pub mod poller;
pub mod window;

pub use poller::{report_init_failure, PollError, PollOutcome, SensorPoller, INIT_FAILURE_MESSAGE};
pub use window::{SampleWindow, WindowStats};
