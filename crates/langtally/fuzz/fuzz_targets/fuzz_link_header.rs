#![no_main]

//! Fuzz target for Link header parsing
//!
//! Arbitrary header values must never panic.

use libfuzzer_sys::fuzz_target;

use langtally::pagination::parse_link_header;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = std::str::from_utf8(data) {
        let _ = parse_link_header(header);
    }
});
