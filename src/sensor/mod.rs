//! Sensor readings and their external formats
//!
//! Readings arrive as packed binary records (see [`reader`]) and leave as CSV
//! lines (see [`csv`]). A reading with id 0 is reserved as the in-band
//! end-of-stream marker and is never a valid measurement.

pub mod csv;
mod error;
pub mod reader;

pub use csv::{format_line, open_output, parse_line, CsvSink};
pub use error::{SensorError, SensorResult};
pub use reader::{ReadingReader, ReadingWriter, RECORD_SIZE};

use crate::queue::StreamItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single sensor measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: u16,
    pub value: f64,
    /// Epoch seconds
    pub timestamp: i64,
}

impl Reading {
    /// Identifier reserved for the end-of-stream marker
    pub const END_OF_STREAM_ID: u16 = 0;

    pub fn new(id: u16, value: f64, timestamp: i64) -> Self {
        Self {
            id,
            value,
            timestamp,
        }
    }

    /// The timestamp as a UTC date, when it is representable
    pub fn recorded_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.timestamp, 0)
    }
}

impl StreamItem for Reading {
    fn end_of_stream() -> Self {
        Self::new(Self::END_OF_STREAM_ID, 0.0, 0)
    }

    fn is_end_of_stream(&self) -> bool {
        self.id == Self::END_OF_STREAM_ID
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={}, value={:.2}, ts={}",
            self.id, self.value, self.timestamp
        )?;
        if let Some(at) = self.recorded_at() {
            write!(f, " ({})", at.to_rfc3339())?;
        }
        Ok(())
    }
}
