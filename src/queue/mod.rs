//! Shared Reading Queue
//!
//! A blocking, unbounded FIFO that hands items from one producer thread to a
//! pool of consumer threads.
//!
//! # Overview
//!
//! - **One producer**: appends items in source order and then signals end of
//!   stream
//! - **Many consumers**: each `remove` takes the next item; every item goes to
//!   exactly one consumer, in insertion order across the pool
//! - **Blocking wait**: consumers park on a condition variable while the queue
//!   is empty instead of polling
//! - **End of stream**: either an in-band marker item that is never removed, so
//!   all consumers see it, or an explicit `close` that wakes everyone
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Producer   │  source order, then marker(s) or close()
//! └──────┬───────┘
//!        │ insert
//!        ▼
//! ┌─────────────────────────────────────────┐
//! │  SharedQueue  Mutex<VecDeque> + Condvar │
//! │  ┌───┬───┬───┬───┬───┐                  │
//! │  │ 1 │ 2 │ 3 │ 4 │...│                  │
//! │  └───┴───┴───┴───┴───┘                  │
//! └──────┬───────────────────────┬──────────┘
//!        │ remove                │ remove
//! ┌──────┴─────┐          ┌──────┴─────┐
//! │ Consumer A │          │ Consumer B │
//! └──────┬─────┘          └──────┬─────┘
//!        └──────► SharedSink ◄───┘   (one lock, one write at a time)
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use sensorbuf::queue::{SharedQueue, StreamItem};
//! use sensorbuf::sensor::Reading;
//!
//! let queue = SharedQueue::new();
//! queue.insert(Reading::new(1, 3.14, 1000)).unwrap();
//! queue.insert(Reading::end_of_stream()).unwrap();
//!
//! assert_eq!(queue.remove().unwrap(), Some(Reading::new(1, 3.14, 1000)));
//! // The marker stays at the head for every other consumer
//! assert_eq!(queue.remove().unwrap(), None);
//! assert_eq!(queue.len().unwrap(), 1);
//! ```

mod consumer;
mod error;
mod producer;
mod shared;
mod traits;
mod types;

pub use consumer::{Consumer, SharedSink};
pub use error::{QueueError, QueueResult};
pub use producer::Producer;
pub use shared::SharedQueue;
pub use traits::{Sink, StreamItem};
pub use types::{ConsumerReport, ProducerReport, Termination};

#[cfg(test)]
mod tests;
