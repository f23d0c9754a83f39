#![no_main]

use cmm::frontend::{analyzer, lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let tokens = lexer::lex(s);
        // Call sites are only analyzed after a clean parse
        if let Ok(unit) = parser::parse(&tokens) {
            let _ = analyzer::check_calls(&unit.program, &unit.symbols);
        }
    }
});
