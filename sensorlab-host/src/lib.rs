//! Host-side companion tools
//!
//! - [`led`]: interactive prompt for the LED controller
//! - [`capture`]: sample capture with rolling statistics and CSV export
//! - [`simulate`]: simulated accelerometer that speaks the streamer protocol
//!
//! Serial devices are opened as plain files; [`port`] adapts them to the
//! `sensorlab-hal` UART traits so the firmware's framing and poller code
//! run unchanged on the host.

pub mod capture;
pub mod error;
pub mod led;
pub mod port;
pub mod simulate;

pub use error::{HostError, Result};
