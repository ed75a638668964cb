//! Time sources for the scheduler.
//!
//! The scheduler asks a [`Clock`] for "now" instead of reading the OS clock,
//! so the same code runs on wall-clock time in the app and on hand-advanced
//! time in tests and benches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time since an arbitrary, fixed epoch
pub trait Clock: Send {
    fn now(&self) -> Duration;
}

/// Wall-clock time; the epoch is the moment of construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Hand-driven clock
///
/// Clones share the same counter: keep one clone to advance time and give
/// the other to the scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Start at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `by`
    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Jump to an absolute time; moving backwards is ignored
    pub fn set(&self, to: Duration) {
        self.nanos.fetch_max(to.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}
