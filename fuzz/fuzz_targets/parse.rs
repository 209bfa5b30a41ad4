#![no_main]

use libfuzzer_sys::fuzz_target;
use markup::{deparse, parse};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    match parse(input) {
        Ok(root) => {
            let text = deparse(&root);
            // Deparsed output always starts a tag, so it is never rejected as
            // non-markup; other failures are allowed for lossy values.
            if let Err(err) = parse(&text) {
                assert_ne!(err.code, markup::ParseErrorCode::NotMarkup, "{text:?}");
            }
        }
        Err(err) => {
            assert!(err.position <= input.len(), "{err} past end of input");
        }
    }
});
