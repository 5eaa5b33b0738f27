#![no_main]

use header_guard::{GuardFixer, HeaderGuard};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let Some(guard) = HeaderGuard::compute("/fuzz/input.h", "") else {
        return;
    };
    let mut fixer = GuardFixer::new();
    // Any accepted header must be accepted again, unchanged
    if let Ok(once) = fixer.rewrite(Cursor::new(data), &guard) {
        let twice = fixer.rewrite(Cursor::new(&once[..]), &guard).unwrap();
        assert_eq!(once, twice);
    }
});
