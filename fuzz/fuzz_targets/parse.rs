#![no_main]

use libfuzzer_sys::fuzz_target;
use lark::diagnostics::Diagnostics;
use lark::{parser, scanner};

fuzz_target!(|data: &[u8]| {
    // Raw bytes go through the same decoder as files on disk (BOM sniffing included)
    let Ok(chars) = lark::source::decode("fuzz.lark", data) else {
        return;
    };

    let mut diagnostics = Diagnostics::new("fuzz.lark");
    let _ = scanner::lex(&chars, &mut diagnostics);

    let mut diagnostics = Diagnostics::new("fuzz.lark");
    if parser::parse(&chars, &mut diagnostics).is_err() {
        assert!(diagnostics.has_errors(), "parse failed without reporting");
    }
});
