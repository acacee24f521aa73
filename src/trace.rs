//! Tracing hooks for the queue monitor.
//!
//! Enable with `--features tracing`. Without the feature every macro below
//! expands to nothing, so parking and waking in the hot path costs nothing.

/// Install a `tracing-subscriber` fmt layer filtered by `RUST_LOG`.
///
/// Falls back to `blocking_mpmc=trace` when `RUST_LOG` is unset. Call it once
/// at the start of a test or demo binary. Does nothing without the `tracing`
/// feature.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("blocking_mpmc=trace"));

    // A second call (e.g. from another test in the same binary) keeps the
    // subscriber that is already installed.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_timer(fmt::time::uptime()),
        )
        .with(filter)
        .try_init();
}

/// No-op without the `tracing` feature.
#[cfg(not(feature = "tracing"))]
pub const fn init_tracing() {}

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! trace_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use debug_noop as debug;
#[cfg(not(feature = "tracing"))]
pub(crate) use trace_noop as trace;
