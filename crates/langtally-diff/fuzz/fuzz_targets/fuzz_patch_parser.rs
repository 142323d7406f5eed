#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(hunks) = langtally_diff::parse_patch(text) {
            let _ = langtally_diff::added_chars(&hunks);
        }
        let _ = langtally_diff::detect_language(text);
    }
});
