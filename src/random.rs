//! Random base62 strings from the operating system CSPRNG.
//!
//! Each output symbol consumes one random byte mapped with `byte % 62`.
//! Since 256 is not a multiple of 62 the first eight symbols (`'0'..='7'`)
//! are slightly more likely (5/256 versus 4/256). The suffix exists for
//! collision resistance, not uniformity, so the bias is accepted.

use crate::alphabet::{self, BASE};
use crate::error::Result;

/// Append `len` random symbols to `out`.
///
/// # Errors
///
/// Returns [`IdError::Random`](crate::IdError::Random) if the OS random
/// source fails. There is no fallback to a weaker generator.
pub fn fill_suffix(len: usize, out: &mut String) -> Result<()> {
    if len == 0 {
        return Ok(());
    }

    let mut bytes = vec![0u8; len];
    getrandom::getrandom(&mut bytes)?;

    out.reserve(len);
    out.extend(
        bytes
            .iter()
            .map(|&b| alphabet::symbol(usize::from(b) % BASE) as char),
    );
    Ok(())
}

/// A random base62 string of exactly `len` symbols.
///
/// # Errors
///
/// Returns [`IdError::Random`](crate::IdError::Random) if the OS random
/// source fails.
pub fn try_random_string(len: usize) -> Result<String> {
    let mut out = String::with_capacity(len);
    fill_suffix(len, &mut out)?;
    Ok(out)
}

/// A random base62 string of `length` symbols. Zero or negative lengths
/// produce an empty string.
///
/// # Panics
///
/// Panics if the operating system random source fails. Use
/// [`try_random_string`] to handle that case.
///
/// # Examples
///
/// ```
/// use sortid::random_string;
///
/// assert_eq!(random_string(10).len(), 10);
/// assert_eq!(random_string(0), "");
/// assert_eq!(random_string(-5), "");
/// ```
pub fn random_string(length: isize) -> String {
    let Ok(len) = usize::try_from(length) else {
        return String::new();
    };
    match try_random_string(len) {
        Ok(s) => s,
        Err(e) => panic!("{}", e),
    }
}
