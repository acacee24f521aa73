//! Lock and condition variable types used by the queue monitor.
//!
//! Under `--cfg loom` these resolve to loom's model-checked versions so the
//! wait/notify protocol can be explored exhaustively:
//!
//! ```bash
//! RUSTFLAGS="--cfg loom" cargo test --test loom_tests --release
//! ```

#[cfg(loom)]
pub(crate) use loom::sync::{Condvar, Mutex, MutexGuard};

#[cfg(not(loom))]
pub(crate) use std::sync::{Condvar, Mutex, MutexGuard};
