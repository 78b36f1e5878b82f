//! Error types for ID generation and decoding.
//!
//! Generation itself only fails on caller input (an explicit timestamp the
//! configured prefix cannot represent) or on random source failure. The
//! decoding errors are reachable from [`crate::base62::decode`] and
//! [`crate::Id::parse`].

use thiserror::Error;

/// Convenience type alias for Results using [`IdError`].
pub type Result<T, E = IdError> = std::result::Result<T, E>;

/// Errors produced while generating, encoding or decoding identifiers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdError {
    /// A character outside the base62 alphabet was found while decoding.
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Character position within the input.
        position: usize,
    },

    /// Decoding was asked to handle an empty string.
    #[error("empty input")]
    Empty,

    /// A value needs more digits than the requested width provides.
    #[error("value needs {needed} digits but width is {width}")]
    ValueTooWide {
        /// The fixed width that was requested.
        width: usize,
        /// Digits the value actually needs.
        needed: usize,
    },

    /// An explicit timestamp is negative or beyond what the prefix can hold.
    #[error("timestamp out of range: {0} ms")]
    TimestampOutOfRange(i64),

    /// An identifier had the wrong number of characters.
    #[error("invalid length: expected {expected}, got {got}")]
    InvalidLength {
        /// Length implied by the configuration.
        expected: usize,
        /// Length of the input.
        got: usize,
    },

    /// The generator configuration cannot produce valid identifiers.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The operating system random source failed.
    #[error("random source failure: {0}")]
    Random(#[from] getrandom::Error),
}
