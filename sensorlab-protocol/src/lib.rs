//! Sensorlab serial protocol
//!
//! Both firmwares speak plain newline-terminated ASCII so that any serial
//! terminal can drive them.
//!
//! # LED controller
//!
//! ```text
//! host → board   on\n | off\n | blink\n | status\n
//! board → host   0\n (off) | 1\n (on) | 2\n (blinking)    -- only after status
//! ```
//!
//! # IMU streamer
//!
//! ```text
//! board → host   <x>,<y>,<z>\n      acceleration in g, 4 decimal places
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod line;
pub mod messages;
pub mod sample;

pub use line::{Line, LineError, LineParser, LINE_END, MAX_LINE_LEN};
pub use messages::{CommandError, LedCommand, LedStatus};
pub use sample::{AccelSample, SampleError, SampleLine, SAMPLE_DECIMALS};
