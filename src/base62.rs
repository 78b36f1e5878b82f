//! Fixed-width base62 encoding over the ordinal-sorted [`ALPHABET`].
//!
//! Because the alphabet is in ascending byte order and every value is padded
//! to the same width with the zero symbol, `a < b` implies
//! `encode(a, w) < encode(b, w)` under byte-wise string comparison.
//!
//! [`ALPHABET`]: crate::alphabet::ALPHABET

use crate::alphabet::{self, BASE, ZERO};
use crate::error::{IdError, Result};

const BASE_U128: u128 = BASE as u128;

/// Widest prefix whose full range still fits in a `u128` (62^21 < 2^128).
pub const MAX_WIDTH: usize = 21;

/// Number of base62 digits needed to represent `value`. Zero needs one digit.
pub fn digits_needed(mut value: u128) -> usize {
    let mut digits = 1;
    while value >= BASE_U128 {
        value /= BASE_U128;
        digits += 1;
    }
    digits
}

/// Largest value representable in `width` digits.
///
/// Widths past [`MAX_WIDTH`] cover the whole `u128` range. Width zero
/// represents nothing and returns `None`.
pub fn max_value(width: usize) -> Option<u128> {
    if width == 0 {
        return None;
    }
    let exp = u32::try_from(width).ok()?;
    Some(match BASE_U128.checked_pow(exp) {
        Some(limit) => limit - 1,
        None => u128::MAX,
    })
}

/// Encode `value` as exactly `width` base62 digits, left-padded with `'0'`.
///
/// # Errors
///
/// Returns [`IdError::ValueTooWide`] if `value` needs more than `width`
/// digits. The value is never truncated.
///
/// # Examples
///
/// ```
/// use sortid::base62::encode;
///
/// assert_eq!(encode(0, 4).unwrap(), "0000");
/// assert_eq!(encode(61, 4).unwrap(), "000z");
/// assert_eq!(encode(62, 4).unwrap(), "0010");
/// assert!(encode(62, 1).is_err());
/// ```
pub fn encode(value: u128, width: usize) -> Result<String> {
    let mut out = String::with_capacity(width);
    encode_into(value, width, &mut out)?;
    Ok(out)
}

/// Like [`encode`], but appends to an existing buffer.
///
/// On error nothing is written to `out`.
pub fn encode_into(mut value: u128, width: usize, out: &mut String) -> Result<()> {
    let needed = digits_needed(value);
    if needed > width {
        return Err(IdError::ValueTooWide { width, needed });
    }

    // u128::MAX needs 22 digits.
    let mut digits = [ZERO; MAX_WIDTH + 1];
    // Least significant digit first, written right to left.
    for slot in digits[..needed].iter_mut().rev() {
        *slot = alphabet::symbol((value % BASE_U128) as usize);
        value /= BASE_U128;
    }

    out.reserve(width);
    out.extend(std::iter::repeat(ZERO as char).take(width - needed));
    out.extend(digits[..needed].iter().map(|&b| b as char));
    Ok(())
}

/// Decode a base62 string into its numeric value.
///
/// Leading zero symbols are accepted, so the inverse of [`encode`] holds
/// for any width.
///
/// # Errors
///
/// - [`IdError::Empty`] for an empty string.
/// - [`IdError::InvalidCharacter`] for any character outside the alphabet.
/// - [`IdError::ValueTooWide`] if the value overflows `u128`.
pub fn decode(s: &str) -> Result<u128> {
    if s.is_empty() {
        return Err(IdError::Empty);
    }

    let mut value: u128 = 0;
    for (position, character) in s.chars().enumerate() {
        let digit = u8::try_from(character)
            .ok()
            .and_then(alphabet::index_of)
            .ok_or(IdError::InvalidCharacter {
                character,
                position,
            })?;

        value = value
            .checked_mul(BASE_U128)
            .and_then(|v| v.checked_add(u128::from(digit)))
            .ok_or_else(|| IdError::ValueTooWide {
                width: MAX_WIDTH + 1,
                needed: s.chars().count(),
            })?;
    }
    Ok(value)
}
