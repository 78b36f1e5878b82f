//! The base62 alphabet shared by the encoder, decoder and random suffix.
//!
//! Identifiers are meant to be compared with plain ordinal comparison
//! (`str::cmp`, `memcmp`, `ORDER BY ... COLLATE "C"`). A fixed-width base62
//! number only sorts correctly under that comparison if the alphabet itself
//! is in ascending byte order, so digit value `i` maps to the `i`-th smallest
//! byte. `0-9A-Za-z` satisfies this (`'0'..='9'` is 48..=57, `'A'..='Z'` is
//! 65..=90, `'a'..='z'` is 97..=122) and the property is checked at compile
//! time below.
//!
//! Locale-aware collations (case-insensitive or "natural" ordering) do NOT
//! preserve this order. Sort identifiers byte-wise.

/// Number of symbols in the alphabet.
pub const BASE: usize = 62;

/// Digit symbols, indexed by digit value. Strictly ascending byte order.
pub const ALPHABET: &[u8; BASE] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// The symbol for digit value zero, used for left padding.
pub const ZERO: u8 = ALPHABET[0];

const INVALID: u8 = u8::MAX;

const DECODE_TABLE: [u8; 256] = build_decode_table();

const _: () = assert!(is_ordinal_sorted(ALPHABET), "alphabet must be in ordinal order");

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < BASE {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Digit value of `byte`, or `None` if it is not an alphabet symbol.
#[inline]
pub fn index_of(byte: u8) -> Option<u8> {
    match DECODE_TABLE[byte as usize] {
        INVALID => None,
        v => Some(v),
    }
}

/// Symbol for digit value `digit`.
///
/// # Panics
///
/// Panics if `digit >= 62`.
#[inline]
pub fn symbol(digit: usize) -> u8 {
    ALPHABET[digit]
}

/// Returns true if every character of `s` is an alphabet symbol.
pub fn contains_only(s: &str) -> bool {
    s.bytes().all(|b| index_of(b).is_some())
}

/// Returns true if `candidate` is strictly ascending under byte comparison.
///
/// Strictly ascending also implies the symbols are distinct.
pub const fn is_ordinal_sorted(candidate: &[u8]) -> bool {
    let mut i = 1;
    while i < candidate.len() {
        if candidate[i - 1] >= candidate[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Index of the first symbol in `candidate` that does not sort after its
/// predecessor, or `None` if the candidate is safe to use as a sortable
/// digit alphabet.
///
/// ```
/// use sortid::alphabet::first_unsorted;
///
/// assert_eq!(first_unsorted(b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz"), None);
/// // Lowercase-first breaks at the first uppercase letter.
/// assert_eq!(first_unsorted(b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ"), Some(36));
/// ```
pub fn first_unsorted(candidate: &[u8]) -> Option<usize> {
    candidate
        .windows(2)
        .position(|w| w[0] >= w[1])
        .map(|i| i + 1)
}
