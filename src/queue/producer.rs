//! Producer: feeds a source into the shared queue
//!
//! Items are inserted in source order. A failed insert drops that item and
//! the run continues. Once the source is exhausted the producer signals end of
//! stream according to its [`Termination`].

use crate::queue::error::QueueResult;
use crate::queue::shared::SharedQueue;
use crate::queue::traits::StreamItem;
use crate::queue::types::{ProducerReport, Termination};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

/// Producer handle for one input source
///
/// # Example
///
/// ```rust
/// use sensorbuf::queue::{Producer, SharedQueue, Termination};
/// use sensorbuf::sensor::Reading;
/// use std::sync::Arc;
///
/// let queue = Arc::new(SharedQueue::<Reading>::new());
/// let producer = Producer::new(Arc::clone(&queue), Termination::Close, 2);
/// let source = vec![Ok::<_, std::io::Error>(Reading::new(1, 3.14, 1000))];
///
/// let report = producer.run(source).unwrap();
/// assert_eq!(report.inserted, 1);
/// assert!(queue.is_closed().unwrap());
/// ```
pub struct Producer<T> {
    queue: Arc<SharedQueue<T>>,
    termination: Termination,
    consumer_count: usize,
    item_delay: Duration,
}

impl<T: StreamItem> Producer<T> {
    pub fn new(queue: Arc<SharedQueue<T>>, termination: Termination, consumer_count: usize) -> Self {
        Self {
            queue,
            termination,
            consumer_count,
            item_delay: Duration::ZERO,
        }
    }

    /// Pause after every inserted item
    pub fn with_item_delay(mut self, delay: Duration) -> Self {
        self.item_delay = delay;
        self
    }

    /// Insert every item from `source`, then signal end of stream
    ///
    /// Source errors are logged and counted. An item that equals the
    /// end-of-stream marker is dropped so it cannot stop consumers early.
    pub fn run<I, E>(&self, source: I) -> QueueResult<ProducerReport>
    where
        I: IntoIterator<Item = Result<T, E>>,
        E: Display,
    {
        let mut report = ProducerReport::default();

        for (index, next) in source.into_iter().enumerate() {
            let item = match next {
                Ok(item) => item,
                Err(e) => {
                    log::error!("Source error at item #{}: {}", index, e);
                    report.source_errors += 1;
                    continue;
                }
            };

            if item.is_end_of_stream() {
                log::warn!(
                    "Dropping item #{}: it carries the reserved end-of-stream id",
                    index
                );
                report.dropped += 1;
                continue;
            }

            match self.queue.insert(item) {
                Ok(()) => report.inserted += 1,
                Err(e) => {
                    log::warn!("Queue insert failed, dropping item #{}: {}", index, e);
                    report.dropped += 1;
                }
            }

            if !self.item_delay.is_zero() {
                std::thread::sleep(self.item_delay);
            }
        }

        report.markers = self.finish()?;
        log::info!(
            "Producer finished: {} inserted, {} dropped, {} source error(s)",
            report.inserted,
            report.dropped,
            report.source_errors
        );
        Ok(report)
    }

    /// Signal end of stream; returns the number of markers inserted
    fn finish(&self) -> QueueResult<usize> {
        match self.termination {
            Termination::Close => {
                self.queue.close()?;
                Ok(0)
            }
            Termination::Sentinel => {
                for inserted in 0..self.consumer_count {
                    if let Err(e) = self.queue.insert(T::end_of_stream()) {
                        // Consumers without a marker would wait forever
                        log::error!(
                            "Failed to insert end-of-stream marker {}/{}: {}; closing queue instead",
                            inserted + 1,
                            self.consumer_count,
                            e
                        );
                        self.queue.close()?;
                        return Ok(inserted);
                    }
                }
                Ok(self.consumer_count)
            }
        }
    }
}
