//! The identifier generator.

use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone};

use crate::base62;
use crate::clock::{MonotonicClock, SystemTimeSource, TimeSource, TICKS_PER_MILLI};
use crate::config::IdConfig;
use crate::error::{IdError, Result};
use crate::id::Id;
use crate::random;

/// Per-call options for [`IdGenerator::generate_with`].
///
/// With no timestamp the wall clock is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdOptions {
    timestamp_ms: Option<i64>,
}

impl IdOptions {
    /// Use the current time.
    pub fn now() -> Self {
        Self::default()
    }

    /// Mint for a caller-supplied millisecond since the Unix epoch.
    ///
    /// If the generator has already passed that millisecond the identifier
    /// lands just after its last tick instead.
    pub fn at_millis(millis: i64) -> Self {
        Self {
            timestamp_ms: Some(millis),
        }
    }

    /// Mint for a date-time. Sub-millisecond precision is dropped.
    pub fn at_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self::at_millis(datetime.timestamp_millis())
    }

    /// Mint for a [`SystemTime`]. Times before the epoch map to negative
    /// milliseconds and are rejected at generation time.
    pub fn at_system_time(time: SystemTime) -> Self {
        let millis = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
            Err(before) => {
                let nanos = before.duration().as_nanos();
                let ms = (nanos + TICKS_PER_MILLI - 1) / TICKS_PER_MILLI;
                i64::try_from(ms).map_or(i64::MIN, |ms| -ms)
            }
        };
        Self::at_millis(millis)
    }

    /// The explicit timestamp, if any.
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.timestamp_ms
    }
}

impl From<i64> for IdOptions {
    fn from(millis: i64) -> Self {
        Self::at_millis(millis)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for IdOptions {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::at_datetime(&datetime)
    }
}

impl From<SystemTime> for IdOptions {
    fn from(time: SystemTime) -> Self {
        Self::at_system_time(time)
    }
}

/// Thread-safe generator of time-sortable identifiers.
///
/// Each instance owns its own monotonic clock. Identifiers from one instance
/// are strictly ordered by generation, explicit timestamps included: an
/// explicit millisecond behind the clock continues past it (see
/// [`clock`](crate::clock)). Identifiers from different instances (or
/// processes, or machines) are ordered by time but only collision-resistant,
/// through their random suffix, within the same tick.
///
/// # Example
///
/// ```
/// use sortid::{IdGenerator, IdOptions};
///
/// let generator = IdGenerator::new();
/// let old = generator.generate_with(IdOptions::at_millis(1_577_836_800_000)).unwrap();
/// assert_eq!(old.millis(), 1_577_836_800_000);
///
/// let a = generator.generate().unwrap();
/// let b = generator.generate().unwrap();
/// assert!(old < a);
/// assert!(a < b);
/// assert_eq!(a.as_str().len(), 20);
/// ```
#[derive(Debug)]
pub struct IdGenerator<S = SystemTimeSource> {
    config: IdConfig,
    clock: Mutex<MonotonicClock<S>>,
}

impl IdGenerator {
    /// A generator with the default 14 + 6 layout over the system clock.
    pub fn new() -> Self {
        Self {
            config: IdConfig::default(),
            clock: Mutex::new(MonotonicClock::new()),
        }
    }

    /// A generator with a custom layout over the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidConfig`] if the layout is unusable.
    pub fn with_config(config: IdConfig) -> Result<Self> {
        Self::with_source(config, SystemTimeSource)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TimeSource> IdGenerator<S> {
    /// A generator with a custom layout and time source.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidConfig`] if the layout is unusable.
    pub fn with_source(config: IdConfig, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock: Mutex::new(MonotonicClock::with_source(source)),
        })
    }

    /// The identifier layout.
    pub fn config(&self) -> &IdConfig {
        &self.config
    }

    /// Generate an identifier for the current time.
    ///
    /// # Errors
    ///
    /// - [`IdError::Random`] if the random source fails.
    /// - [`IdError::ValueTooWide`] if the wall clock has outgrown a narrow
    ///   prefix.
    pub fn generate(&self) -> Result<Id> {
        self.generate_with(IdOptions::now())
    }

    /// Generate an identifier with per-call options.
    ///
    /// # Errors
    ///
    /// As [`generate`](Self::generate), plus
    /// [`IdError::TimestampOutOfRange`] for a negative explicit timestamp or
    /// one the prefix cannot hold.
    pub fn generate_with(&self, options: IdOptions) -> Result<Id> {
        let ticks = self.next_ticks(options)?;

        let mut text = String::with_capacity(self.config.total_len());
        base62::encode_into(ticks, self.config.prefix_width, &mut text)?;
        random::fill_suffix(self.config.suffix_len, &mut text)?;

        Ok(Id::from_generated(text, self.config.prefix_width, ticks))
    }

    /// Resolve the tick for `options` and advance the clock.
    ///
    /// # Errors
    ///
    /// - [`IdError::TimestampOutOfRange`] for an explicit timestamp the
    ///   prefix cannot hold, including one pushed past the prefix range by
    ///   earlier ticks.
    /// - [`IdError::ValueTooWide`] if the next wall-clock tick does not fit.
    ///
    /// The clock is left untouched on error.
    pub fn next_ticks(&self, options: IdOptions) -> Result<u128> {
        let explicit = options
            .timestamp_ms
            .map(|ms| self.check_millis(ms))
            .transpose()?;

        let mut clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
        clock
            .try_next_timestamp(explicit, self.config.max_ticks())
            .ok_or(match options.timestamp_ms {
                Some(ms) => IdError::TimestampOutOfRange(ms),
                None => IdError::ValueTooWide {
                    width: self.config.prefix_width,
                    needed: self.config.prefix_width + 1,
                },
            })
    }

    fn check_millis(&self, ms: i64) -> Result<u64> {
        let millis = u64::try_from(ms).map_err(|_| IdError::TimestampOutOfRange(ms))?;
        match self.config.max_millis() {
            Some(max) if u128::from(millis) <= max => Ok(millis),
            _ => Err(IdError::TimestampOutOfRange(ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;
    use crate::clock::ManualTimeSource;
    use std::collections::HashSet;
    use std::time::Duration;

    #[test]
    fn test_shape() {
        let generator = IdGenerator::new();
        for _ in 0..100 {
            let id = generator.generate().unwrap();
            assert_eq!(id.as_str().len(), 20);
            assert_eq!(id.prefix().len(), 14);
            assert_eq!(id.suffix().len(), 6);
            assert!(alphabet::contains_only(id.as_str()));
        }
    }

    #[test]
    fn test_thousand_distinct_and_ordered() {
        let generator = IdGenerator::new();
        let ids: Vec<Id> = (0..1000).map(|_| generator.generate().unwrap()).collect();

        let unique: HashSet<&str> = ids.iter().map(Id::as_str).collect();
        assert_eq!(unique.len(), 1000);

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_explicit_repeats_stay_ordered() {
        let generator = IdGenerator::new();
        let ids: Vec<Id> = (0..300)
            .map(|_| {
                generator
                    .generate_with(IdOptions::at_millis(1_770_050_716_465))
                    .unwrap()
            })
            .collect();

        for (i, id) in ids.iter().enumerate() {
            assert_eq!(id.millis(), 1_770_050_716_465);
            assert_eq!(id.parts().sub_millis, i as u32);
        }
        for pair in ids.windows(2) {
            assert!(pair[0].as_str() < pair[1].as_str());
        }
    }

    #[test]
    fn test_out_of_range_timestamps() {
        let generator = IdGenerator::new();
        assert!(matches!(
            generator.generate_with(IdOptions::at_millis(-1)),
            Err(IdError::TimestampOutOfRange(-1))
        ));
        assert!(matches!(
            generator.generate_with(IdOptions::at_millis(i64::MIN)),
            Err(IdError::TimestampOutOfRange(i64::MIN))
        ));
        assert!(generator.generate_with(IdOptions::at_millis(i64::MAX)).is_ok());
        assert!(generator.generate_with(IdOptions::at_millis(0)).is_ok());

        // 62^10 ticks ends in 1996.
        let narrow = IdGenerator::with_config(IdConfig::default().with_prefix_width(10)).unwrap();
        assert!(narrow.generate_with(IdOptions::at_millis(800_000_000_000)).is_ok());
        assert!(matches!(
            narrow.generate_with(IdOptions::at_millis(1_770_050_712_496)),
            Err(IdError::TimestampOutOfRange(1_770_050_712_496))
        ));
    }

    #[test]
    fn test_narrow_prefix_rejects_wall_clock() {
        let narrow = IdGenerator::with_config(IdConfig::default().with_prefix_width(10)).unwrap();
        assert!(matches!(
            narrow.generate(),
            Err(IdError::ValueTooWide { width: 10, .. })
        ));
    }

    #[test]
    fn test_rejected_timestamp_leaves_clock_untouched() {
        let generator =
            IdGenerator::with_source(IdConfig::default(), ManualTimeSource::new(0)).unwrap();
        generator.next_ticks(IdOptions::at_millis(5)).unwrap();
        assert!(generator.next_ticks(IdOptions::at_millis(-5)).is_err());
        assert_eq!(
            generator.next_ticks(IdOptions::at_millis(5)).unwrap(),
            5 * TICKS_PER_MILLI + 1
        );
    }

    #[test]
    fn test_prefix_exhaustion_leaves_clock_untouched() {
        // 62^4 - 1 ticks: the last value a 4-digit prefix holds.
        let max = 14_776_335u64;
        let time = ManualTimeSource::new(max);
        let config = IdConfig::default().with_prefix_width(4);
        let generator = IdGenerator::with_source(config, time).unwrap();

        let last = generator.generate().unwrap();
        assert_eq!(last.prefix(), "zzzz");

        assert!(matches!(
            generator.generate(),
            Err(IdError::ValueTooWide { width: 4, needed: 5 })
        ));
        // Millisecond 13 is in range, but the clock is already past it.
        assert!(matches!(
            generator.generate_with(IdOptions::at_millis(13)),
            Err(IdError::TimestampOutOfRange(13))
        ));
        assert!(matches!(
            generator.next_ticks(IdOptions::now()),
            Err(IdError::ValueTooWide { .. })
        ));
    }

    #[test]
    fn test_explicit_then_wall_clock_never_collide() {
        let time = ManualTimeSource::from_millis(1_770_050_712_496);
        let generator = IdGenerator::with_source(IdConfig::default(), time).unwrap();

        let explicit = generator
            .generate_with(IdOptions::at_millis(1_770_050_712_496))
            .unwrap();
        let wall = generator.generate().unwrap();
        assert_ne!(explicit.prefix(), wall.prefix());
        assert!(explicit < wall);

        let future = generator.generate_with(IdOptions::at_millis(9_000_000)).unwrap();
        let after = generator.generate().unwrap();
        assert!(future < after);
        assert_eq!(after.ticks(), future.ticks() + 1);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            IdGenerator::with_config(IdConfig::default().with_prefix_width(30)),
            Err(IdError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_custom_layout() {
        let config = IdConfig::default().with_prefix_width(16).with_suffix_len(0);
        let generator = IdGenerator::with_config(config).unwrap();
        let id = generator.generate().unwrap();
        assert_eq!(id.as_str().len(), 16);
        assert_eq!(id.suffix(), "");
    }

    #[test]
    fn test_manual_clock_drives_prefix() {
        let time = ManualTimeSource::from_millis(1_770_050_712_496);
        let generator = IdGenerator::with_source(IdConfig::default(), time.clone()).unwrap();

        let a = generator.generate().unwrap();
        assert_eq!(a.prefix(), "00026kqlPADEOW");

        let b = generator.generate().unwrap();
        assert_eq!(b.ticks(), a.ticks() + 1);

        time.set_millis(1_770_050_722_663);
        let c = generator.generate().unwrap();
        assert_eq!(c.prefix(), "00026kqlaGGvXU");
        assert!(b < c);
    }

    #[test]
    fn test_options_conversions() {
        assert_eq!(IdOptions::now().timestamp_ms(), None);
        assert_eq!(IdOptions::from(42).timestamp_ms(), Some(42));

        let dt = DateTime::parse_from_rfc3339("2024-01-15T12:00:00.000Z").unwrap();
        assert_eq!(IdOptions::from(dt).timestamp_ms(), Some(1_705_320_000_000));

        let st = UNIX_EPOCH + Duration::from_millis(1_705_320_000_000);
        assert_eq!(IdOptions::from(st).timestamp_ms(), Some(1_705_320_000_000));

        let before = UNIX_EPOCH - Duration::from_micros(1);
        assert_eq!(IdOptions::at_system_time(before).timestamp_ms(), Some(-1));
    }

    #[test]
    fn test_datetime_option_round_trips() {
        let generator = IdGenerator::new();
        let dt = DateTime::parse_from_rfc3339("2024-01-15T12:00:00.000Z").unwrap();
        let id = generator.generate_with(IdOptions::at_datetime(&dt)).unwrap();
        assert_eq!(id.datetime().unwrap(), dt);
    }
}
