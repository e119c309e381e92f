//! Traits connecting the queue to the items it carries and the sinks that
//! consume them.

/// An item that can travel through a [`SharedQueue`](super::SharedQueue)
///
/// Item types reserve one value as an in-band end-of-stream marker. The queue
/// never hands a marker to a consumer and never removes it: every consumer
/// that reaches it observes end of stream.
pub trait StreamItem: Send {
    /// Construct the end-of-stream marker
    fn end_of_stream() -> Self;

    /// Whether this item is the end-of-stream marker
    fn is_end_of_stream(&self) -> bool;
}

/// Destination for items removed from the queue
pub trait Sink<T> {
    type Error: std::fmt::Display;

    fn write(&mut self, item: &T) -> Result<(), Self::Error>;
}
