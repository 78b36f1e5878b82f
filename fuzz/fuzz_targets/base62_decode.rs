//! Fuzz target for base62 decoding
//!
//! Decoding arbitrary input must never panic; decoded values must encode
//! back to the input at the input's width.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sortid::base62;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if let Ok(value) = base62::decode(input) {
            let encoded = base62::encode(value, input.len()).expect("decoded value fits");
            assert_eq!(encoded, input);
        }
    }
});
