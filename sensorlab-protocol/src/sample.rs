//! Accelerometer sample lines.
//!
//! Line format: `<x>,<y>,<z>` where each field is the acceleration along
//! one axis in g. The board writes [`SAMPLE_DECIMALS`] decimal places,
//! which matches the 0.061 mg/LSB resolution at ±2 g. Readers accept any
//! float syntax and tolerate whitespace around fields.

use core::fmt::{self, Write};

use heapless::String;

/// Decimal places written per axis
pub const SAMPLE_DECIMALS: usize = 4;

/// Capacity of an encoded sample line (without terminator)
pub const MAX_SAMPLE_LINE_LEN: usize = 48;

/// Field separator
pub const FIELD_SEPARATOR: char = ',';

/// Encoded sample line
pub type SampleLine = String<MAX_SAMPLE_LINE_LEN>;

/// Sample parse/encode errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// Line does not have exactly three fields
    FieldCount,
    /// A field is not a number
    InvalidNumber,
    /// Encoded line does not fit the line buffer
    LineTooLong,
}

/// One three-axis acceleration reading, in g
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelSample {
    /// Create a sample from three axis values
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Axis values as an array in x, y, z order
    pub fn axes(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Build a sample from an x, y, z array
    pub fn from_axes(axes: [f32; 3]) -> Self {
        Self::new(axes[0], axes[1], axes[2])
    }

    /// Encode as a sample line (without terminator)
    pub fn to_line(&self) -> Result<SampleLine, SampleError> {
        let mut line = SampleLine::new();
        write!(line, "{}", self).map_err(|_| SampleError::LineTooLong)?;
        Ok(line)
    }

    /// Parse a sample line
    pub fn parse(line: &str) -> Result<Self, SampleError> {
        let mut fields = line.trim().split(FIELD_SEPARATOR);
        let mut axes = [0.0f32; 3];

        for axis in axes.iter_mut() {
            let field = fields.next().ok_or(SampleError::FieldCount)?;
            *axis = field
                .trim()
                .parse::<f32>()
                .map_err(|_| SampleError::InvalidNumber)?;
        }

        if fields.next().is_some() {
            return Err(SampleError::FieldCount);
        }

        Ok(Self::from_axes(axes))
    }
}

impl fmt::Display for AccelSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.prec$}{sep}{:.prec$}{sep}{:.prec$}",
            self.x,
            self.y,
            self.z,
            prec = SAMPLE_DECIMALS,
            sep = FIELD_SEPARATOR,
        )
    }
}
