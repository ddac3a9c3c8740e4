// SPDX-License-Identifier: AGPL-3.0-or-later
//! Dialect implementations for each supported markup syntax

pub mod asciidoc;
pub mod markdown;

pub use asciidoc::Asciidoc;
pub use markdown::GithubMarkdown;

/// Prefix every character in `reserved` with a backslash
pub(crate) fn backslash_escape(text: &str, reserved: &[char]) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if reserved.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Length of the longest run of `needle` in `text`
pub(crate) fn longest_run(text: &str, needle: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == needle {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Returns `None` for empty or whitespace-only text
pub(crate) fn non_blank(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
