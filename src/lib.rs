//! blocking_mpmc - bounded blocking MPMC FIFO queue built as a monitor
//!
//! One mutex guards a fixed circular buffer; producers park on a "not full"
//! condition variable and consumers on a "not empty" one. [`Queue::shutdown`]
//! is one-way: buffered items stay retrievable, new items are refused, and
//! once the buffer is drained every consumer gets `None` instead of blocking.
//!
//! ```
//! use blocking_mpmc::Queue;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let queue = Arc::new(Queue::<u32>::new(4).unwrap());
//!
//! let consumer = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || queue.iter().sum::<u32>())
//! };
//!
//! for i in 1..=10 {
//!     queue.enqueue(i).unwrap();
//! }
//! queue.shutdown();
//!
//! assert_eq!(consumer.join().unwrap(), 55);
//! ```
#![warn(missing_docs)]

use core::fmt;
use core::iter::FusedIterator;
use std::sync::PoisonError;

mod error;
pub mod handle;
mod sync;
mod trace;

pub use error::{QueueError, SendError, TryRecvError, TrySendError};
pub use trace::init_tracing;

use sync::{Condvar, Mutex, MutexGuard};
use trace::{debug, trace};

/// Lifecycle of a queue, as seen through [`Queue::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueState {
    /// Accepting items.
    Active,
    /// Shut down, but items are still waiting to be dequeued.
    Draining,
    /// Shut down and empty. Terminal.
    ShutDown,
}

/// Everything the lock protects.
///
/// `tail == (head + count) % buffer.len()` and exactly the `count` slots
/// starting at `head` are `Some`.
struct State<T> {
    buffer: Box<[Option<T>]>,
    count: usize,
    head: usize,
    tail: usize,
    shutdown: bool,
}

impl<T> State<T> {
    #[inline]
    fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Caller must have checked `!is_full()`.
    fn push(&mut self, item: T) {
        debug_assert!(!self.is_full());
        self.buffer[self.tail] = Some(item);
        self.tail = (self.tail + 1) % self.capacity();
        self.count += 1;
    }

    fn pop(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let item = self.buffer[self.head].take();
        debug_assert!(item.is_some(), "live slot at head was empty");
        self.head = (self.head + 1) % self.capacity();
        self.count -= 1;
        item
    }

    fn queue_state(&self) -> QueueState {
        match (self.shutdown, self.count) {
            (false, _) => QueueState::Active,
            (true, 0) => QueueState::ShutDown,
            (true, _) => QueueState::Draining,
        }
    }
}

/// Bounded blocking FIFO queue for any number of producers and consumers.
///
/// Share it between threads with `Arc<Queue<T>>`. All operations take the
/// same lock; waits release it while parked.
pub struct Queue<T> {
    state: Mutex<State<T>>,
    /// Producers wait here while the buffer is full.
    not_full: Condvar,
    /// Consumers wait here while the buffer is empty.
    not_empty: Condvar,
    /// Mirrors the buffer length, which never changes, so reads skip the lock.
    capacity: usize,
}

impl<T> Queue<T> {
    /// Create a queue holding at most `capacity` items.
    ///
    /// Fails with [`QueueError::InvalidCapacity`] for a zero capacity and with
    /// [`QueueError::Allocation`] if the buffer cannot be allocated. Nothing is
    /// left allocated on failure.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity);
        }

        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || None);

        debug!(capacity, "queue created");

        Ok(Queue {
            state: Mutex::new(State {
                buffer: slots.into_boxed_slice(),
                count: 0,
                head: 0,
                tail: 0,
                shutdown: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        })
    }

    // No code that can panic runs while the lock is held in a half-updated
    // state, so a poisoned lock still guards a consistent `State`.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_not_full<'a>(&self, guard: MutexGuard<'a, State<T>>) -> MutexGuard<'a, State<T>> {
        self.not_full.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_not_empty<'a>(&self, guard: MutexGuard<'a, State<T>>) -> MutexGuard<'a, State<T>> {
        self.not_empty.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an item, blocking while the queue is full.
    ///
    /// If the queue is (or becomes, while waiting) shut down, the item is not
    /// stored and comes back in [`SendError`]; callers that only want the
    /// drop-on-shutdown behavior can ignore the result.
    pub fn enqueue(&self, item: T) -> Result<(), SendError<T>> {
        let mut state = self.lock();
        while state.is_full() && !state.shutdown {
            trace!(capacity = self.capacity, "producer parked on full queue");
            state = self.wait_not_full(state);
        }

        if state.shutdown {
            trace!("enqueue rejected after shutdown");
            return Err(SendError(item));
        }

        state.push(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove the oldest item, blocking while the queue is empty.
    ///
    /// Returns `None` only once the queue is shut down and drained; buffered
    /// items are always handed out first.
    pub fn dequeue(&self) -> Option<T> {
        let mut state = self.lock();
        while state.count == 0 && !state.shutdown {
            trace!("consumer parked on empty queue");
            state = self.wait_not_empty(state);
        }

        let item = state.pop()?;
        self.not_full.notify_one();
        Some(item)
    }

    /// Non-blocking [`enqueue`](Self::enqueue).
    ///
    /// Shutdown is reported ahead of fullness.
    pub fn try_enqueue(&self, item: T) -> Result<(), TrySendError<T>> {
        let mut state = self.lock();
        if state.shutdown {
            return Err(TrySendError::ShutDown(item));
        }
        if state.is_full() {
            return Err(TrySendError::Full(item));
        }

        state.push(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Non-blocking [`dequeue`](Self::dequeue).
    pub fn try_dequeue(&self) -> Result<T, TryRecvError> {
        let mut state = self.lock();
        match state.pop() {
            Some(item) => {
                self.not_full.notify_one();
                Ok(item)
            }
            None if state.shutdown => Err(TryRecvError::ShutDown),
            None => Err(TryRecvError::Empty),
        }
    }

    /// Enqueue every item in order, blocking per item as needed.
    ///
    /// Items from other producers may land between them. Stops at shutdown and
    /// returns the items that were not stored, in their original order; the
    /// returned `Vec` is empty when everything went in.
    pub fn enqueue_batch<I>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut items = items.into_iter();
        while let Some(item) = items.next() {
            if let Err(SendError(item)) = self.enqueue(item) {
                let mut rejected = vec![item];
                rejected.extend(items);
                return rejected;
            }
        }
        Vec::new()
    }

    /// Stop accepting items and wake every parked producer and consumer.
    ///
    /// Idempotent. Buffered items remain available to [`dequeue`](Self::dequeue).
    pub fn shutdown(&self) {
        let mut state = self.lock();
        if !state.shutdown {
            debug!(pending = state.count, "queue shut down");
        }
        state.shutdown = true;
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    /// Snapshot: no items buffered.
    pub fn is_empty(&self) -> bool {
        self.lock().count == 0
    }

    /// Snapshot: every slot occupied.
    pub fn is_full(&self) -> bool {
        self.lock().is_full()
    }

    /// Snapshot: [`shutdown`](Self::shutdown) has been called.
    pub fn is_shutdown(&self) -> bool {
        self.lock().shutdown
    }

    /// Snapshot of the number of buffered items.
    pub fn len(&self) -> usize {
        self.lock().count
    }

    /// Snapshot of the lifecycle state.
    pub fn state(&self) -> QueueState {
        self.lock().queue_state()
    }

    /// Maximum number of buffered items.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Blocking iterator over dequeued items; ends once the queue is shut
    /// down and drained.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { queue: self }
    }

    /// Tear the queue down, dropping any items still buffered.
    ///
    /// Taking `self` by value means no other thread can still be using it.
    pub fn destroy(self) {
        drop(self);
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Queue")
            .field("capacity", &self.capacity)
            .field("len", &state.count)
            .field("shutdown", &state.shutdown)
            .finish()
    }
}

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        debug!(capacity = self.capacity, "queue destroyed");
    }
}

/// Iterator returned by [`Queue::iter`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    queue: &'a Queue<T>,
}

impl<T> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.dequeue()
    }
}

// Shutdown is permanent and refuses new items, so after the first `None`
// every later `dequeue` returns `None` too.
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn smoke() {
        let q = Queue::<i32>::new(8).unwrap();
        q.enqueue(42).unwrap();
        assert_eq!(q.dequeue(), Some(42));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(Queue::<i32>::new(0).unwrap_err(), QueueError::InvalidCapacity);
    }

    #[test]
    fn fresh_queue() {
        let q = Queue::<i32>::new(5).unwrap();
        assert_eq!(q.capacity(), 5);
        assert_eq!(q.capacity(), q.lock().capacity());
        assert_eq!(q.len(), 0);
        assert!(q.is_empty());
        assert!(!q.is_full());
        assert!(!q.is_shutdown());
        assert_eq!(q.state(), QueueState::Active);
    }

    #[test]
    fn cursors_wrap_and_keep_invariant() {
        let q = Queue::<usize>::new(3).unwrap();
        for round in 0..7 {
            q.enqueue(round).unwrap();
            q.enqueue(round + 100).unwrap();
            assert_eq!(q.dequeue(), Some(round));
            assert_eq!(q.dequeue(), Some(round + 100));

            let state = q.lock();
            assert_eq!(state.tail, (state.head + state.count) % state.capacity());
            assert!(state.buffer.iter().all(Option::is_none));
        }
    }

    #[test]
    fn try_variants() {
        let q = Queue::<i32>::new(2).unwrap();
        assert_eq!(q.try_dequeue(), Err(TryRecvError::Empty));
        q.try_enqueue(1).unwrap();
        q.try_enqueue(2).unwrap();
        assert!(q.try_enqueue(3).unwrap_err().is_full());

        q.shutdown();
        assert!(q.try_enqueue(4).unwrap_err().is_shutdown());
        assert_eq!(q.try_dequeue(), Ok(1));
        assert_eq!(q.try_dequeue(), Ok(2));
        assert_eq!(q.try_dequeue(), Err(TryRecvError::ShutDown));
    }

    #[test]
    fn state_machine() {
        let q = Queue::<i32>::new(2).unwrap();
        q.enqueue(1).unwrap();
        q.shutdown();
        assert_eq!(q.state(), QueueState::Draining);
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.state(), QueueState::ShutDown);
        q.shutdown();
        assert_eq!(q.state(), QueueState::ShutDown);
    }

    #[test]
    fn batch_stops_at_shutdown() {
        let q = Queue::<i32>::new(4).unwrap();
        assert!(q.enqueue_batch([1, 2, 3]).is_empty());
        q.shutdown();
        assert_eq!(q.enqueue_batch([4, 5]), vec![4, 5]);
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn shutdown_wakes_parked_producer() {
        let q = Arc::new(Queue::<i32>::new(1).unwrap());
        q.enqueue(1).unwrap();

        let producer = {
            let q = Arc::clone(&q);
            thread::spawn(move || q.enqueue(2))
        };

        thread::sleep(Duration::from_millis(50));
        q.shutdown();

        assert_eq!(producer.join().unwrap(), Err(SendError(2)));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn debug_does_not_need_item_debug() {
        struct Opaque;
        let q = Queue::<Opaque>::new(2).unwrap();
        q.enqueue(Opaque).ok();
        assert_eq!(
            format!("{q:?}"),
            "Queue { capacity: 2, len: 1, shutdown: false }"
        );
    }
}
