//! Free-function surface over an optional queue handle.
//!
//! Each function tolerates an absent queue and falls back to a fixed answer
//! instead of failing: shutdown, enqueue and destroy do nothing, `dequeue`
//! yields `None`, `is_empty` reports `true` and `is_shutdown` reports `false`.
//! [`enqueue`] also takes an optional item and ignores `None`.
//! Useful where a queue is wired up lazily and callers should not have to
//! branch on whether it exists yet.
//!
//! ```
//! use blocking_mpmc::{handle, Queue};
//!
//! let mut slot: Option<Queue<&str>> = None;
//! handle::enqueue(slot.as_ref(), Some("lost"));
//! assert!(handle::is_empty(slot.as_ref()));
//!
//! slot = Some(handle::create(2).unwrap());
//! handle::enqueue(slot.as_ref(), Some("kept"));
//! handle::enqueue(slot.as_ref(), None);
//! assert_eq!(handle::dequeue(slot.as_ref()), Some("kept"));
//! handle::destroy(slot);
//! ```

use crate::{Queue, QueueError};

/// Same as [`Queue::new`].
pub fn create<T>(capacity: usize) -> Result<Queue<T>, QueueError> {
    Queue::new(capacity)
}

/// Tear down the queue if there is one.
pub fn destroy<T>(queue: Option<Queue<T>>) {
    if let Some(queue) = queue {
        queue.destroy();
    }
}

/// Blocking enqueue. A missing queue or a `None` item is a no-op that never
/// blocks, and an item refused after shutdown is dropped.
pub fn enqueue<T>(queue: Option<&Queue<T>>, item: Option<T>) {
    if let (Some(queue), Some(item)) = (queue, item) {
        queue.enqueue(item).ok();
    }
}

/// Blocking dequeue; `None` without a queue.
pub fn dequeue<T>(queue: Option<&Queue<T>>) -> Option<T> {
    queue.and_then(Queue::dequeue)
}

/// Shut the queue down if there is one.
pub fn shutdown<T>(queue: Option<&Queue<T>>) {
    if let Some(queue) = queue {
        queue.shutdown();
    }
}

/// `true` without a queue.
pub fn is_empty<T>(queue: Option<&Queue<T>>) -> bool {
    queue.is_none_or(Queue::is_empty)
}

/// `false` without a queue.
pub fn is_shutdown<T>(queue: Option<&Queue<T>>) -> bool {
    queue.is_some_and(Queue::is_shutdown)
}
