//! Shared fixtures for the queue test suites

use crate::core::retry::RetryPolicy;
use crate::queue::{SharedSink, Sink};
use crate::sensor::Reading;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Long enough for any correct wake-up to arrive
pub const WAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Short window used to assert that a thread is still blocked
pub const STILL_BLOCKED: Duration = Duration::from_millis(100);

/// In-memory sink recording every item it receives
#[derive(Default)]
pub struct CollectingSink {
    pub items: Vec<Reading>,
}

impl Sink<Reading> for CollectingSink {
    type Error = String;

    fn write(&mut self, item: &Reading) -> Result<(), Self::Error> {
        self.items.push(*item);
        Ok(())
    }
}

pub fn shared_collector() -> SharedSink<CollectingSink> {
    Arc::new(Mutex::new(CollectingSink::default()))
}

/// Readings with the given ids; value and timestamp derive from the id
pub fn readings(ids: RangeInclusive<u16>) -> Vec<Reading> {
    ids.map(|id| Reading::new(id, f64::from(id) / 4.0, 1_000 + i64::from(id)))
        .collect()
}

pub fn fast_retry(max_attempts: usize) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        delay: Duration::from_millis(1),
        backoff_factor: 2,
        max_delay: Duration::from_millis(5),
    }
}
