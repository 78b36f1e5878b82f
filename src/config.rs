//! Identifier layout configuration.

use crate::base62::{self, MAX_WIDTH};
use crate::clock::TICKS_PER_MILLI;
use crate::error::{IdError, Result};

/// Default width of the encoded timestamp prefix.
pub const DEFAULT_PREFIX_WIDTH: usize = 14;

/// Default length of the random suffix.
pub const DEFAULT_SUFFIX_LEN: usize = 6;

/// Layout of generated identifiers: `prefix_width` timestamp digits followed
/// by `suffix_len` random symbols.
///
/// The default (14 + 6) holds nanosecond ticks far beyond any realistic
/// wall clock; narrower prefixes trade range for length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdConfig {
    /// Digits used for the encoded timestamp.
    pub prefix_width: usize,
    /// Random symbols appended after the timestamp.
    pub suffix_len: usize,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            prefix_width: DEFAULT_PREFIX_WIDTH,
            suffix_len: DEFAULT_SUFFIX_LEN,
        }
    }
}

impl IdConfig {
    /// Set the timestamp prefix width.
    #[must_use]
    pub fn with_prefix_width(mut self, width: usize) -> Self {
        self.prefix_width = width;
        self
    }

    /// Set the random suffix length.
    #[must_use]
    pub fn with_suffix_len(mut self, len: usize) -> Self {
        self.suffix_len = len;
        self
    }

    /// Total identifier length.
    pub fn total_len(&self) -> usize {
        self.prefix_width + self.suffix_len
    }

    /// Largest tick value the prefix can hold.
    pub fn max_ticks(&self) -> u128 {
        base62::max_value(self.prefix_width).unwrap_or(0)
    }

    /// Largest millisecond whose whole per-millisecond range fits the prefix,
    /// or `None` if not even millisecond zero fits.
    pub fn max_millis(&self) -> Option<u128> {
        let max = self.max_ticks();
        if max < TICKS_PER_MILLI - 1 {
            return None;
        }
        Some((max - (TICKS_PER_MILLI - 1)) / TICKS_PER_MILLI)
    }

    /// Check that this layout can produce identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidConfig`] if the prefix width is outside
    /// `1..=21` or cannot hold even one millisecond of ticks.
    pub fn validate(&self) -> Result<()> {
        if self.prefix_width == 0 || self.prefix_width > MAX_WIDTH {
            return Err(IdError::InvalidConfig(format!(
                "prefix width {} not in 1..={}",
                self.prefix_width, MAX_WIDTH
            )));
        }
        if self.max_millis().is_none() {
            return Err(IdError::InvalidConfig(format!(
                "prefix width {} cannot hold one millisecond of ticks",
                self.prefix_width
            )));
        }
        Ok(())
    }
}
