//! Fuzz target for identifier parsing
//!
//! Feeds arbitrary strings to `Id` parsing under the default and a narrow
//! layout. Parsing must never panic, and anything accepted must re-encode
//! to the same text.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sortid::{base62, Id, IdConfig};
use std::str;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = str::from_utf8(data) else {
        return;
    };

    for config in [
        IdConfig::default(),
        IdConfig::default().with_prefix_width(4).with_suffix_len(0),
    ] {
        if let Ok(id) = Id::parse(input, &config) {
            let prefix = base62::encode(id.ticks(), config.prefix_width)
                .expect("parsed ticks fit their own width");
            assert_eq!(prefix, id.prefix());
            let _ = id.datetime();
        }
    }
});
