//! Monotonic tick source for identifier prefixes.
//!
//! Ticks are nanosecond-equivalent integers: `millis * 1_000_000 + sub`.
//! A [`MonotonicClock`] keeps one high-water mark and every tick it hands
//! out is strictly greater than all earlier ones, whichever way it was
//! asked for:
//!
//! - **Wall clock** ([`MonotonicClock::next`]): the current time in
//!   nanoseconds, or `last + 1` whenever the reading does not move past the
//!   mark (coarse resolution, tight loops, clock set backwards).
//! - **Explicit milliseconds** ([`MonotonicClock::next_at`]): the start of
//!   the caller-supplied millisecond, or `last + 1` if the mark is already
//!   inside or beyond it. Repeating a millisecond therefore counts up
//!   through its sub-millisecond range, and a new, later millisecond starts
//!   again at its zero tick. Past one million repeats the count spills into
//!   the following millisecond rather than repeat a value.
//!
//! An explicit millisecond behind the mark (an earlier date, or a date
//! before IDs already minted from the wall clock) continues from the mark,
//! so its tick encodes a later time than requested. Use a separate
//! generator for back-dated IDs that must carry their own date.

mod source;

pub use self::source::{ManualTimeSource, SystemTimeSource, TimeSource};

/// Ticks per millisecond. The per-millisecond counter stays below this.
pub const TICKS_PER_MILLI: u128 = 1_000_000;

/// Strictly increasing tick generator.
///
/// Not synchronized; [`IdGenerator`](crate::IdGenerator) puts it behind a
/// mutex.
#[derive(Debug)]
pub struct MonotonicClock<S = SystemTimeSource> {
    source: S,
    last: u128,
    last_reading: u128,
}

impl MonotonicClock {
    /// A clock over the system wall clock.
    pub fn new() -> Self {
        Self::with_source(SystemTimeSource)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TimeSource> MonotonicClock<S> {
    /// A clock over an arbitrary time source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            last: 0,
            last_reading: 0,
        }
    }

    /// Next tick, with an optional caller-supplied millisecond.
    pub fn next_timestamp(&mut self, explicit_millis: Option<u64>) -> u128 {
        let ticks = self.candidate(explicit_millis);
        self.last = ticks;
        ticks
    }

    /// Like [`next_timestamp`](Self::next_timestamp), but refuses ticks
    /// above `max`. A refused tick is not recorded.
    pub fn try_next_timestamp(&mut self, explicit_millis: Option<u64>, max: u128) -> Option<u128> {
        let ticks = self.candidate(explicit_millis);
        if ticks > max {
            return None;
        }
        self.last = ticks;
        Some(ticks)
    }

    /// Next wall-clock tick. Strictly greater than every earlier result.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u128 {
        self.next_timestamp(None)
    }

    /// Next tick for the caller-supplied millisecond. Strictly greater than
    /// every earlier result.
    pub fn next_at(&mut self, millis: u64) -> u128 {
        self.next_timestamp(Some(millis))
    }

    fn candidate(&mut self, explicit_millis: Option<u64>) -> u128 {
        let floor = self.last + 1;
        match explicit_millis {
            None => {
                let reading = self.source.now_nanos();

                #[cfg(feature = "tracing")]
                if reading < self.last_reading {
                    tracing::warn!(
                        regressed_by_ns = %(self.last_reading - reading),
                        "wall clock went backwards; holding ticks monotonic"
                    );
                }
                self.last_reading = reading;

                reading.max(floor)
            }
            Some(millis) => {
                let base = u128::from(millis) * TICKS_PER_MILLI;
                let ticks = base.max(floor);

                #[cfg(feature = "tracing")]
                if ticks - base >= TICKS_PER_MILLI {
                    tracing::debug!(
                        millis,
                        "explicit millisecond is behind the clock; continuing past it"
                    );
                }

                ticks
            }
        }
    }

    /// Last tick handed out, if any.
    pub fn last(&self) -> Option<u128> {
        (self.last != 0).then_some(self.last)
    }

    /// The underlying time source.
    pub fn source(&self) -> &S {
        &self.source
    }
}
