//! # sortid
//!
//! Monotonic, lexicographically time-sortable unique identifiers.
//!
//! An identifier is a fixed-width base62 timestamp prefix followed by a
//! random suffix, 14 + 6 = 20 characters by default:
//!
//! ```text
//! 00026kqlPADEOW0VPmeB
//! └─ prefix ───┘└sfx─┘
//! ```
//!
//! ## Features
//!
//! - Prefix counts nanosecond ticks; a per-process monotonic clock makes
//!   every identifier strictly greater than the previous one, even when the
//!   wall clock stalls or steps backwards
//! - Ordinal-sorted alphabet (`0-9A-Za-z`): byte-wise string order equals
//!   numeric order, checked at compile time
//! - Random suffix from the operating system CSPRNG
//! - Explicit timestamps (milliseconds, `chrono` date-times, `SystemTime`)
//!   with a per-millisecond counter for repeated values
//! - Decoding back to ticks and date-times for diagnostics
//!
//! ## Ordering contract
//!
//! Identifiers sort by generation time under **ordinal** comparison (Rust
//! `str` ordering, `memcmp`, a binary or `"C"` collation). Case-insensitive
//! or locale-aware comparisons do not preserve it.
//!
//! Within one process (one [`IdGenerator`]) order is strict, for wall-clock
//! and explicit timestamps alike. An explicit millisecond behind the last
//! tick continues past it rather than going back in time. Across
//! processes and machines, identifiers from different ticks are ordered by
//! time, and identifiers sharing a tick are unordered and kept apart only by
//! their random suffix.
//!
//! ## Quick Start
//!
//! ```rust
//! use sortid::{generate_id, generate_id_with, IdOptions};
//!
//! let earlier = generate_id_with(IdOptions::at_millis(1_770_050_712_496)).unwrap();
//! let later = generate_id_with(IdOptions::at_millis(1_770_050_722_663)).unwrap();
//! assert!(earlier.as_str() < later.as_str());
//! assert_eq!(earlier.millis(), 1_770_050_712_496);
//!
//! let a = generate_id();
//! let b = generate_id();
//! assert!(later < a);
//! assert!(a < b);
//! assert_eq!(a.as_str().len(), 20);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use std::sync::OnceLock;

use crate::error::Result;

pub mod alphabet;
pub mod base62;
pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
pub mod id;
pub mod random;

pub use self::config::IdConfig;
pub use self::error::IdError;
pub use self::generator::{IdGenerator, IdOptions};
pub use self::id::{first_out_of_order, first_out_of_order_by, Id, IdParts};
pub use self::random::{random_string, try_random_string};

static DEFAULT_GENERATOR: OnceLock<IdGenerator> = OnceLock::new();

/// The process-wide generator behind [`generate_id`] and friends.
pub fn default_generator() -> &'static IdGenerator {
    DEFAULT_GENERATOR.get_or_init(IdGenerator::new)
}

/// Generate an identifier for the current time from the process-wide
/// generator.
///
/// # Panics
///
/// Panics if the operating system random source fails. Use
/// [`try_generate_id`] to handle that case.
pub fn generate_id() -> Id {
    match try_generate_id() {
        Ok(id) => id,
        Err(e) => panic!("{}", e),
    }
}

/// Fallible form of [`generate_id`].
///
/// # Errors
///
/// Returns [`IdError::Random`] if the random source fails.
pub fn try_generate_id() -> Result<Id> {
    default_generator().generate()
}

/// Generate an identifier from the process-wide generator with options.
///
/// # Errors
///
/// Returns [`IdError::TimestampOutOfRange`] for a negative explicit
/// timestamp, or [`IdError::Random`] if the random source fails.
pub fn generate_id_with(options: impl Into<IdOptions>) -> Result<Id> {
    default_generator().generate_with(options.into())
}
