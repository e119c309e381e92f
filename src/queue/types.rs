//! Type definitions for the queue system
//!
//! Termination strategies and the per-thread reports returned by producers
//! and consumers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the producer tells consumers that the stream is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Termination {
    /// Insert one end-of-stream marker per consumer
    Sentinel,
    /// Close the queue, waking every consumer at once
    #[default]
    Close,
}

impl FromStr for Termination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sentinel" => Ok(Termination::Sentinel),
            "close" => Ok(Termination::Close),
            other => Err(format!(
                "unknown termination '{}' (expected sentinel or close)",
                other
            )),
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Sentinel => write!(f, "sentinel"),
            Termination::Close => write!(f, "close"),
        }
    }
}

/// Outcome of a producer run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProducerReport {
    /// Items successfully inserted
    pub inserted: usize,
    /// Items dropped because the insert failed or the item was a reserved marker
    pub dropped: usize,
    /// Errors reported by the source
    pub source_errors: usize,
    /// End-of-stream markers inserted (sentinel termination only)
    pub markers: usize,
}

/// Outcome of a consumer run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsumerReport {
    pub name: String,
    /// Items written to the sink
    pub delivered: usize,
    pub sink_failures: usize,
    /// Failed `remove` calls, including ones later retried successfully
    pub remove_failures: usize,
}

impl ConsumerReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
