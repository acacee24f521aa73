//! Error types.
//!
//! Only construction can fail. Everything else the queue reports (a rejected
//! item after shutdown, an empty queue) is ordinary data that hands the item
//! back to the caller where there is one.

use core::fmt;
use std::collections::TryReserveError;

use thiserror::Error;

/// Failure to build a [`Queue`](crate::Queue).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The requested capacity was zero.
    #[error("capacity must be greater than 0")]
    InvalidCapacity,
    /// The slot buffer could not be allocated.
    #[error("failed to allocate queue buffer: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Returned by [`Queue::enqueue`](crate::Queue::enqueue) when the queue was
/// shut down before the item could be stored. Carries the item back out.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SendError<T>(pub T);

impl<T> SendError<T> {
    /// Take back the rejected item.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SendError(..)")
    }
}

impl<T> fmt::Display for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue is shut down")
    }
}

impl<T> std::error::Error for SendError<T> {}

/// Returned by [`Queue::try_enqueue`](crate::Queue::try_enqueue).
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TrySendError<T> {
    /// Every slot is occupied.
    Full(T),
    /// The queue no longer accepts items.
    ShutDown(T),
}

impl<T> TrySendError<T> {
    /// Take back the rejected item.
    pub fn into_inner(self) -> T {
        match self {
            TrySendError::Full(item) | TrySendError::ShutDown(item) => item,
        }
    }

    /// `true` if the item was rejected because the queue was full.
    pub fn is_full(&self) -> bool {
        matches!(self, TrySendError::Full(_))
    }

    /// `true` if the item was rejected because the queue was shut down.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, TrySendError::ShutDown(_))
    }
}

impl<T> fmt::Debug for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrySendError::Full(_) => f.write_str("Full(..)"),
            TrySendError::ShutDown(_) => f.write_str("ShutDown(..)"),
        }
    }
}

impl<T> fmt::Display for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrySendError::Full(_) => write!(f, "queue is full"),
            TrySendError::ShutDown(_) => write!(f, "queue is shut down"),
        }
    }
}

impl<T> std::error::Error for TrySendError<T> {}

impl<T> From<SendError<T>> for TrySendError<T> {
    fn from(err: SendError<T>) -> Self {
        TrySendError::ShutDown(err.0)
    }
}

/// Returned by [`Queue::try_dequeue`](crate::Queue::try_dequeue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryRecvError {
    /// No item is buffered right now.
    #[error("queue is empty")]
    Empty,
    /// No item is buffered and none ever will be.
    #[error("queue is shut down and drained")]
    ShutDown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_items_come_back() {
        assert_eq!(SendError("x").into_inner(), "x");
        assert_eq!(TrySendError::Full(1).into_inner(), 1);
        assert_eq!(TrySendError::ShutDown(2).into_inner(), 2);
        assert!(TrySendError::from(SendError(3)).is_shutdown());
    }

    #[test]
    fn messages() {
        assert_eq!(
            QueueError::InvalidCapacity.to_string(),
            "capacity must be greater than 0"
        );
        assert_eq!(SendError(()).to_string(), "queue is shut down");
        assert_eq!(TrySendError::Full(()).to_string(), "queue is full");
        assert_eq!(TryRecvError::Empty.to_string(), "queue is empty");
    }
}
