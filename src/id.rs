//! The identifier type and helpers for taking identifiers apart.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::alphabet;
use crate::base62;
use crate::clock::TICKS_PER_MILLI;
use crate::config::IdConfig;
use crate::error::{IdError, Result};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// A generated identifier: an encoded tick prefix followed by a random suffix.
///
/// Ordering, equality and hashing follow the text, so sorting `Id`s (or their
/// strings, byte-wise) sorts them by generation time whenever their ticks
/// differ. Identifiers sharing a tick order by suffix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id {
    text: String,
    prefix_width: usize,
    ticks: u128,
}

/// The decoded fields of an [`Id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParts<'a> {
    /// Milliseconds since the Unix epoch.
    pub millis: u128,
    /// Sub-millisecond ticks (nanoseconds, or the per-millisecond counter
    /// for explicitly timestamped IDs). Always below one million.
    pub sub_millis: u32,
    /// The random suffix.
    pub suffix: &'a str,
}

impl Id {
    pub(crate) fn from_generated(text: String, prefix_width: usize, ticks: u128) -> Self {
        Self {
            text,
            prefix_width,
            ticks,
        }
    }

    /// Parse and validate an identifier laid out according to `config`.
    ///
    /// # Errors
    ///
    /// - [`IdError::InvalidConfig`] if `config` is not a usable layout.
    /// - [`IdError::InvalidLength`] if `s` is not `config.total_len()` long.
    /// - [`IdError::InvalidCharacter`] for any non-alphabet character.
    pub fn parse(s: &str, config: &IdConfig) -> Result<Self> {
        config.validate()?;

        if let Some((position, character)) = s
            .chars()
            .enumerate()
            .find(|&(_, c)| !u8::try_from(c).is_ok_and(|b| alphabet::index_of(b).is_some()))
        {
            return Err(IdError::InvalidCharacter {
                character,
                position,
            });
        }

        // All ASCII from here on, so bytes and chars agree.
        if s.len() != config.total_len() {
            return Err(IdError::InvalidLength {
                expected: config.total_len(),
                got: s.len(),
            });
        }

        let ticks = base62::decode(&s[..config.prefix_width])?;
        Ok(Self {
            text: s.to_string(),
            prefix_width: config.prefix_width,
            ticks,
        })
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the identifier, returning its text.
    pub fn into_string(self) -> String {
        self.text
    }

    /// The encoded timestamp prefix.
    pub fn prefix(&self) -> &str {
        &self.text[..self.prefix_width]
    }

    /// The random suffix.
    pub fn suffix(&self) -> &str {
        &self.text[self.prefix_width..]
    }

    /// The decoded prefix in ticks.
    pub fn ticks(&self) -> u128 {
        self.ticks
    }

    /// Milliseconds since the Unix epoch encoded in the prefix.
    pub fn millis(&self) -> u128 {
        self.ticks / TICKS_PER_MILLI
    }

    /// Split into millisecond, sub-millisecond and suffix fields.
    pub fn parts(&self) -> IdParts<'_> {
        IdParts {
            millis: self.millis(),
            sub_millis: (self.ticks % TICKS_PER_MILLI) as u32,
            suffix: self.suffix(),
        }
    }

    /// The prefix as a UTC date-time, or `None` if it lies outside chrono's
    /// representable range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.ticks / NANOS_PER_SEC).ok()?;
        let nanos = (self.ticks % NANOS_PER_SEC) as u32;
        DateTime::from_timestamp(secs, nanos)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Id {
    type Err = IdError;

    /// Parse with the default 14 + 6 layout.
    fn from_str(s: &str) -> Result<Self> {
        Id::parse(s, &IdConfig::default())
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.text
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Id {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Id {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Index of the first adjacent pair whose byte-wise order disagrees with
/// their tick order, or `None` if `ids` is consistent.
///
/// Pairs sharing a tick are skipped; their relative order is unspecified.
pub fn first_out_of_order(ids: &[Id]) -> Option<usize> {
    first_out_of_order_by(ids, str::cmp)
}

/// Like [`first_out_of_order`], but compares identifier text with `cmp`.
///
/// Use this to check that a downstream comparison (a database collation, a
/// locale-aware sort) preserves generation order. Case-insensitive
/// comparisons do not.
///
/// ```
/// use sortid::{first_out_of_order_by, IdGenerator, IdOptions};
///
/// let generator = IdGenerator::new();
/// // Within these 40 ticks the last prefix digit steps from 'Z' to 'a'.
/// let ms = 1_770_050_716_465;
/// let ids: Vec<_> = (0..40)
///     .map(|_| generator.generate_with(IdOptions::at_millis(ms)).unwrap())
///     .collect();
///
/// assert_eq!(first_out_of_order_by(&ids, str::cmp), None);
///
/// let case_insensitive = |a: &str, b: &str| a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase());
/// assert!(first_out_of_order_by(&ids, case_insensitive).is_some());
/// ```
pub fn first_out_of_order_by<F>(ids: &[Id], mut cmp: F) -> Option<usize>
where
    F: FnMut(&str, &str) -> Ordering,
{
    ids.windows(2)
        .position(|pair| {
            let by_ticks = pair[0].ticks.cmp(&pair[1].ticks);
            by_ticks != Ordering::Equal && cmp(pair[0].as_str(), pair[1].as_str()) != by_ticks
        })
        .map(|i| i + 1)
}
