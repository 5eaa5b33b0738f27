// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Property tests: rewriting is idempotent and never touches the body.

use header_guard::{GuardFixer, HeaderGuard};
use proptest::prelude::*;
use std::io::Cursor;

fn header(guard_line: &str, body: &[String], endif_line: &str) -> Vec<u8> {
    let mut content = format!("#ifndef {guard_line}\n#define {guard_line}\n");
    for line in body {
        content.push_str(line);
        content.push('\n');
    }
    content.push_str(endif_line);
    content.into_bytes()
}

proptest! {
    #[test]
    fn rewrite_is_idempotent(
        body in prop::collection::vec("[ -~\t]{0,40}", 0..20),
        old in "[A-Z_]{1,12}",
        path in "[a-z]{1,8}(/[a-z]{1,8}){0,3}\\.h",
    ) {
        let guard = HeaderGuard::compute(&format!("/{path}"), "").unwrap();
        let mut fixer = GuardFixer::new();
        let input = header(&old, &body, &format!("#endif /* {old} */\n"));

        let once = fixer.rewrite(Cursor::new(&input[..]), &guard).unwrap();
        let twice = fixer.rewrite(Cursor::new(&once[..]), &guard).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn rewrite_preserves_body(
        body in prop::collection::vec("[ -~\t]{0,40}(\r)?", 0..20),
        old in "[A-Z_]{1,12}",
    ) {
        let guard = HeaderGuard::compute("/dir/file.h", "").unwrap();
        let input = header(&old, &body, "#endif // old");

        let out = GuardFixer::new().rewrite(Cursor::new(&input[..]), &guard).unwrap();

        let prefix = b"#ifndef DIR_FILE_H\n#define DIR_FILE_H\n";
        let suffix = b"#endif // DIR_FILE_H\n";
        prop_assert!(out.starts_with(prefix));
        prop_assert!(out.ends_with(suffix));
        let middle = &out[prefix.len()..out.len() - suffix.len()];
        let expected: Vec<u8> = body.iter().flat_map(|l| format!("{l}\n").into_bytes()).collect();
        prop_assert_eq!(middle, &expected[..]);
    }
}
