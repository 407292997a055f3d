//! Fuzz target: decimal string parsing
//!
//! Feeds arbitrary strings to parse_amount() and parse_units() to ensure:
//! 1. No panics on any input
//! 2. Accepted amounts format back to the same value
//!
//! Run: cargo +nightly fuzz run fuzz_parse_amount -- -max_len=128

#![no_main]
use cyclo_core::{format_units, parse_amount, parse_units};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(value) = parse_amount(s) {
        assert_eq!(parse_amount(&value.to_string()).ok(), Some(value));
    }

    let decimals = data.first().copied().unwrap_or(0) % 37;
    if let Ok(value) = parse_units(s, decimals) {
        let text = format_units(value, decimals);
        assert_eq!(
            parse_units(&text, decimals).ok(),
            Some(value),
            "format_units output must parse back: {}",
            text
        );
    }
});
