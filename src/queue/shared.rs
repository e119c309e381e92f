//! SharedQueue: an unbounded blocking FIFO shared by one producer and many
//! consumers
//!
//! The queue owns its items in a `VecDeque` guarded by a single mutex; a
//! condition variable parks consumers while the queue is empty. Removing an
//! item moves it out to the caller, so nothing is freed by hand.
//!
//! End of stream can be signalled two ways:
//! - an in-band marker item (see [`StreamItem`]). It is never removed, so every
//!   consumer that reaches it observes end of stream;
//! - [`SharedQueue::close`], which wakes every waiter. Items queued before the
//!   close still drain in order.

use crate::core::sync::{handle_mutex_poison, wait_while_poison};
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::traits::StreamItem;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Open,
    Closed,
    Destroyed,
}

struct QueueState<T> {
    items: VecDeque<T>,
    lifecycle: Lifecycle,
}

/// Thread-safe unbounded FIFO with blocking removal
///
/// Share it between threads with `Arc<SharedQueue<T>>`. The item list is only
/// touched while holding the queue's mutex.
pub struct SharedQueue<T> {
    state: Mutex<QueueState<T>>,
    not_empty: Condvar,
}

impl<T: StreamItem> Default for SharedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StreamItem> SharedQueue<T> {
    /// Create an empty, open queue
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                lifecycle: Lifecycle::Open,
            }),
            not_empty: Condvar::new(),
        }
    }

    /// Create an empty queue with room for `capacity` items up front
    ///
    /// The capacity is a starting allocation, not a bound.
    pub fn with_capacity(capacity: usize) -> QueueResult<Self> {
        let mut items = VecDeque::new();
        items
            .try_reserve(capacity)
            .map_err(|_| QueueError::AllocationFailure)?;

        Ok(Self {
            state: Mutex::new(QueueState {
                items,
                lifecycle: Lifecycle::Open,
            }),
            not_empty: Condvar::new(),
        })
    }

    fn lock(&self) -> QueueResult<MutexGuard<'_, QueueState<T>>> {
        handle_mutex_poison(self.state.lock(), |message| QueueError::Poisoned {
            message,
        })
    }

    /// Append an item at the tail and wake one waiting consumer
    ///
    /// Never waits for consumers. Fails with `Closed` after [`close`](Self::close)
    /// and with `InvalidHandle` after [`destroy`](Self::destroy).
    pub fn insert(&self, item: T) -> QueueResult<()> {
        let mut state = self.lock()?;
        match state.lifecycle {
            Lifecycle::Destroyed => return Err(QueueError::InvalidHandle),
            Lifecycle::Closed => return Err(QueueError::Closed),
            Lifecycle::Open => {}
        }

        state
            .items
            .try_reserve(1)
            .map_err(|_| QueueError::AllocationFailure)?;
        state.items.push_back(item);
        drop(state);

        self.not_empty.notify_one();
        Ok(())
    }

    /// Take the head item, blocking while the queue is empty and open
    ///
    /// Returns `Ok(Some(item))` on success and `Ok(None)` at end of stream:
    /// either the head is an end-of-stream marker (left in place) or the queue
    /// is closed and drained.
    pub fn remove(&self) -> QueueResult<Option<T>> {
        let state = self.lock()?;
        let mut state = wait_while_poison(
            &self.not_empty,
            state,
            |s| s.items.is_empty() && s.lifecycle == Lifecycle::Open,
            |message| QueueError::Poisoned { message },
        )?;

        if state.lifecycle == Lifecycle::Destroyed {
            return Err(QueueError::InvalidHandle);
        }

        let head_is_marker = match state.items.front() {
            None => return Ok(None),
            Some(head) => head.is_end_of_stream(),
        };
        if head_is_marker {
            log::trace!("End-of-stream marker at queue head");
            return Ok(None);
        }

        Ok(state.items.pop_front())
    }

    /// Mark the stream complete and wake every waiting consumer
    ///
    /// Further inserts fail with `Closed`. Closing twice is a no-op.
    pub fn close(&self) -> QueueResult<()> {
        let mut state = self.lock()?;
        match state.lifecycle {
            Lifecycle::Destroyed => return Err(QueueError::InvalidHandle),
            Lifecycle::Closed => return Ok(()),
            Lifecycle::Open => state.lifecycle = Lifecycle::Closed,
        }
        drop(state);

        self.not_empty.notify_all();
        Ok(())
    }

    /// Release every remaining item and invalidate the queue
    ///
    /// Returns the number of items released. Every later operation, including
    /// a second `destroy`, fails with `InvalidHandle`. Blocked consumers are
    /// woken and fail the same way.
    pub fn destroy(&self) -> QueueResult<usize> {
        let mut state = self.lock()?;
        if state.lifecycle == Lifecycle::Destroyed {
            return Err(QueueError::InvalidHandle);
        }

        let released = state.items.len();
        state.items = VecDeque::new();
        state.lifecycle = Lifecycle::Destroyed;
        drop(state);

        self.not_empty.notify_all();
        log::debug!("Queue destroyed, released {} remaining item(s)", released);
        Ok(released)
    }

    /// Number of queued items, markers included
    pub fn len(&self) -> QueueResult<usize> {
        Ok(self.lock()?.items.len())
    }

    pub fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.lock()?.items.is_empty())
    }

    pub fn is_closed(&self) -> QueueResult<bool> {
        Ok(self.lock()?.lifecycle == Lifecycle::Closed)
    }

    pub fn is_destroyed(&self) -> QueueResult<bool> {
        Ok(self.lock()?.lifecycle == Lifecycle::Destroyed)
    }

    /// Whether the head item is an end-of-stream marker
    pub fn peek_is_end_of_stream(&self) -> QueueResult<bool> {
        Ok(self
            .lock()?
            .items
            .front()
            .is_some_and(|head| head.is_end_of_stream()))
    }
}
