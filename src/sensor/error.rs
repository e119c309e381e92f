//! Sensor I/O error types

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Truncated record at byte offset {offset}: got {len} of {expected} bytes")]
    TruncatedRecord {
        offset: u64,
        len: usize,
        expected: usize,
    },

    #[error("Malformed CSV line '{line}': {reason}")]
    Parse { line: String, reason: String },
}

pub type SensorResult<T> = Result<T, SensorError>;
