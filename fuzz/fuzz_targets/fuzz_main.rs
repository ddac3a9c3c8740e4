// SPDX-License-Identifier: AGPL-3.0-or-later
#![no_main]

use docmark_core::{anchor, create_dialect, DialectConfig, DialectKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let slug = anchor::generate(text);
    assert!(!slug.is_empty());
    assert!(slug
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_'));
    assert!(slug.starts_with(|c: char| c.is_alphabetic() || c == anchor::ID_PREFIX));

    for kind in DialectKind::ALL {
        let dialect = create_dialect(kind, &DialectConfig::default());
        let escaped = dialect.escape(text);
        let header = dialect.header(1, text).expect("level 1 is valid");
        if text.trim().is_empty() {
            assert!(header.is_empty());
        } else {
            assert!(header.contains(&escaped));
            assert!(dialect.local_href(&escaped).contains(&anchor::generate(&escaped)));
        }
        let _ = dialect.code_block("", text);
        let _ = dialect.accordion(text, text);
    }
});
