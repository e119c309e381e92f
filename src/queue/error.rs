//! Queue Error Types

/// Failures reported by queue operations
///
/// End of stream is not an error: `remove` reports it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Failed to allocate queue storage")]
    AllocationFailure,

    #[error("Queue synchronisation failed: {message}")]
    Poisoned { message: String },

    #[error("Queue handle is no longer valid (queue destroyed)")]
    InvalidHandle,

    #[error("Queue is closed to new items")]
    Closed,

    #[error("Queue operation failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: usize,
        #[source]
        last: Box<QueueError>,
    },
}

impl QueueError {
    /// Whether repeating the failed call could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            QueueError::AllocationFailure | QueueError::Poisoned { .. }
        )
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
