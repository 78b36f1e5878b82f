//! Wall-clock sources for [`MonotonicClock`](super::MonotonicClock).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use super::TICKS_PER_MILLI;

/// A wall clock reporting nanoseconds since the Unix epoch.
///
/// Implementations need not be monotonic or high resolution; the clock
/// layered on top handles repeats and regressions.
pub trait TimeSource: Send {
    /// Current time in nanoseconds since the Unix epoch.
    fn now_nanos(&self) -> u128;
}

/// The operating system clock.
///
/// A clock set before 1970 reads as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_nanos(&self) -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    }
}

/// A manually driven clock. Clones share the same reading, so a test can
/// keep one handle while a generator owns another.
///
/// ```
/// use sortid::clock::{ManualTimeSource, MonotonicClock};
///
/// let time = ManualTimeSource::from_millis(1_000);
/// let mut clock = MonotonicClock::with_source(time.clone());
///
/// let a = clock.next();
/// time.set_millis(999); // clock goes backwards
/// let b = clock.next();
/// assert!(b > a);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    nanos: Arc<AtomicU64>,
}

impl ManualTimeSource {
    /// Start at `nanos` nanoseconds since the epoch.
    pub fn new(nanos: u64) -> Self {
        Self {
            nanos: Arc::new(AtomicU64::new(nanos)),
        }
    }

    /// Start at `millis` milliseconds since the epoch.
    pub fn from_millis(millis: u64) -> Self {
        Self::new(millis.saturating_mul(TICKS_PER_MILLI as u64))
    }

    /// Jump to `nanos`, forwards or backwards.
    pub fn set_nanos(&self, nanos: u64) {
        self.nanos.store(nanos, Ordering::SeqCst);
    }

    /// Jump to `millis`, forwards or backwards.
    pub fn set_millis(&self, millis: u64) {
        self.set_nanos(millis.saturating_mul(TICKS_PER_MILLI as u64));
    }

    /// Move forwards by `nanos`.
    pub fn advance(&self, nanos: u64) {
        self.nanos.fetch_add(nanos, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_nanos(&self) -> u128 {
        u128::from(self.nanos.load(Ordering::SeqCst))
    }
}
