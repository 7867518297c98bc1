//! Host tool errors

use std::io;
use std::path::PathBuf;

use sensorlab_core::traits::SensorError;
use sensorlab_protocol::SampleError;

/// Errors raised by the host tools
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("cannot open serial device {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serial I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("sensor error: {0:?}")]
    Sensor(SensorError),

    #[error("sample encoding failed: {0:?}")]
    Sample(SampleError),

    #[error("device closed the connection")]
    Disconnected,
}

impl From<SensorError> for HostError {
    fn from(err: SensorError) -> Self {
        HostError::Sensor(err)
    }
}

pub type Result<T> = std::result::Result<T, HostError>;
