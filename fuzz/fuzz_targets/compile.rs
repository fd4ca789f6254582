#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let report = lark::compile_source("fuzz.lark", s);
        assert_eq!(report.succeeded(), !report.diagnostics.has_errors());
    }
});
