//! Consumer: drains the shared queue into a sink
//!
//! Consumers compete for items; each item reaches exactly one consumer. Sink
//! writes are serialised through a lock shared by all consumers, held only for
//! the duration of one write.

use crate::core::retry::{retry_if, RetryPolicy};
use crate::core::sync::handle_mutex_poison;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::shared::SharedQueue;
use crate::queue::traits::{Sink, StreamItem};
use crate::queue::types::ConsumerReport;
use std::fmt::Display;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Sink handle shared by every consumer of a queue
pub type SharedSink<S> = Arc<Mutex<S>>;

/// Consumer handle for one worker thread
///
/// A run ends when the queue reports end of stream. Failed `remove` calls
/// are retried with backoff; once the retry policy is exhausted the run
/// returns [`QueueError::RetriesExhausted`] instead of spinning.
///
/// # Example
///
/// ```rust
/// use sensorbuf::queue::{Consumer, SharedQueue};
/// use sensorbuf::sensor::{CsvSink, Reading};
/// use std::sync::{Arc, Mutex};
///
/// let queue = Arc::new(SharedQueue::new());
/// queue.insert(Reading::new(1, 3.14, 1000)).unwrap();
/// queue.close().unwrap();
///
/// let sink = Arc::new(Mutex::new(CsvSink::new(Vec::new())));
/// let report = Consumer::new("consumer-1", queue, Arc::clone(&sink)).run().unwrap();
/// assert_eq!(report.delivered, 1);
/// ```
pub struct Consumer<T, S> {
    name: String,
    queue: Arc<SharedQueue<T>>,
    sink: SharedSink<S>,
    retry: RetryPolicy,
    item_delay: Duration,
}

impl<T, S> Consumer<T, S>
where
    T: StreamItem + Display,
    S: Sink<T>,
{
    pub fn new(name: impl Into<String>, queue: Arc<SharedQueue<T>>, sink: SharedSink<S>) -> Self {
        Self {
            name: name.into(),
            queue,
            sink,
            retry: RetryPolicy::default(),
            item_delay: Duration::ZERO,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Pause after every delivered item
    pub fn with_item_delay(mut self, delay: Duration) -> Self {
        self.item_delay = delay;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remove and deliver items until end of stream
    pub fn run(&self) -> QueueResult<ConsumerReport> {
        let mut report = ConsumerReport::new(&self.name);

        loop {
            let next = retry_if("queue remove", &self.retry, QueueError::is_retryable, || {
                self.queue.remove().map_err(|e| {
                    log::warn!("{}: buffer read failed: {}", self.name, e);
                    report.remove_failures += 1;
                    e
                })
            });

            match next {
                Ok(Some(item)) => {
                    self.deliver(&item, &mut report)?;
                    if !self.item_delay.is_zero() {
                        std::thread::sleep(self.item_delay);
                    }
                }
                Ok(None) => {
                    log::info!(
                        "{}: end of stream after {} item(s)",
                        self.name,
                        report.delivered
                    );
                    return Ok(report);
                }
                Err(e) if e.is_retryable() => {
                    log::error!("{}: giving up after repeated failures: {}", self.name, e);
                    return Err(QueueError::RetriesExhausted {
                        attempts: self.retry.attempts(),
                        last: Box::new(e),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn deliver(&self, item: &T, report: &mut ConsumerReport) -> QueueResult<()> {
        let mut sink = handle_mutex_poison(self.sink.lock(), |message| QueueError::Poisoned {
            message,
        })?;

        match sink.write(item) {
            Ok(()) => {
                report.delivered += 1;
                log::debug!("{}: logged {}", self.name, item);
            }
            Err(e) => {
                report.sink_failures += 1;
                log::warn!("{}: failed to log {}: {}", self.name, item, e);
            }
        }
        Ok(())
    }
}
