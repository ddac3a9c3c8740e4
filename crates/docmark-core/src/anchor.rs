// SPDX-License-Identifier: AGPL-3.0-or-later
//! Anchor (slug) generation shared by every dialect
//!
//! Headers and same-document links both derive their target from the header
//! text through [`generate`], so a link always resolves to the anchor its
//! header emitted, whichever dialect rendered them.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Replaces each run of whitespace in a slug
pub const SEPARATOR: char = '-';

/// Slug used when the header text has no letter or digit left after
/// normalization
pub const EMPTY_ANCHOR: &str = "section";

/// Prepended when a slug would not start with a letter or `_`, which
/// Asciidoctor requires of block anchor ids
pub const ID_PREFIX: char = '_';

// Each pattern first matches a backslash escape (group 1) so escaped
// characters never open a link or tag; group 2 is the visible label.

// `[label](href)` and `![alt](src)`
static RE_MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\\.)|!?\[((?:\\.|[^\]\\])*)\]\([^)]*\)").unwrap());

// `xref:id[label]`, `link:path[label]`, `https://host/path[label]`
static RE_ASCIIDOC_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\\.)|(?:xref:|link:|mailto:|[A-Za-z][A-Za-z0-9+.\-]*://)[^\s\[]*\[((?:\\.|[^\]\\])*)\]",
    )
    .unwrap()
});

static RE_HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\\.)|</?[A-Za-z][^<>]*>").unwrap());

// Asciidoc character references `{asterisk}` and passthroughs `++_++`
static RE_ASCIIDOC_CHAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\\.)|\{(asterisk|backtick|plus|caret|tilde|lt|gt)\}|\+\+(.+?)\+\+").unwrap()
});

static RE_BACKSLASH_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(.)").unwrap());

/// Strip link syntax, tags and backslash escapes, keeping the visible text.
pub fn plain_text(text: &str) -> String {
    let text = keep_labels(&RE_MARKDOWN_LINK, text);
    let text = keep_labels(&RE_ASCIIDOC_LINK, &text);
    let text = keep_labels(&RE_HTML_TAG, &text);
    let text = decode_asciidoc_chars(&text);
    RE_BACKSLASH_ESCAPE.replace_all(&text, "$1").into_owned()
}

fn keep_labels(re: &Regex, text: &str) -> String {
    re.replace_all(text, |caps: &Captures<'_>| match caps.get(1) {
        Some(escaped) => escaped.as_str().to_string(),
        None => caps.get(2).map_or("", |label| label.as_str()).to_string(),
    })
    .into_owned()
}

fn decode_asciidoc_chars(text: &str) -> String {
    RE_ASCIIDOC_CHAR
        .replace_all(text, |caps: &Captures<'_>| {
            if let Some(escaped) = caps.get(1) {
                return escaped.as_str().to_string();
            }
            if let Some(passed) = caps.get(3) {
                return passed.as_str().to_string();
            }
            let c = match caps.get(2).map_or("", |name| name.as_str()) {
                "asterisk" => "*",
                "backtick" => "`",
                "plus" => "+",
                "caret" => "^",
                "tilde" => "~",
                "lt" => "<",
                "gt" => ">",
                _ => "",
            };
            c.to_string()
        })
        .into_owned()
}

/// Derive the anchor for a header whose (possibly formatted) text is `text`.
///
/// Lower-cases the plain text, trims it, collapses whitespace runs into
/// [`SEPARATOR`] and then drops everything except letters, digits, `-` and
/// `_`. The result always starts with a letter or [`ID_PREFIX`], so it is a
/// valid id in every dialect.
pub fn generate(text: &str) -> String {
    let plain = plain_text(text).to_lowercase();

    let mut slug = String::with_capacity(plain.len());
    let mut in_whitespace = false;
    for c in plain.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push(SEPARATOR);
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if is_anchor_char(c) {
            slug.push(c);
        }
    }

    if !slug.chars().any(char::is_alphanumeric) {
        return EMPTY_ANCHOR.to_string();
    }
    if !slug.starts_with(|c: char| c.is_alphabetic() || c == ID_PREFIX) {
        slug.insert(0, ID_PREFIX);
    }
    slug
}

fn is_anchor_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_simple() {
        assert_eq!(generate("My Function"), "my-function");
    }

    #[test]
    fn test_trims_and_collapses_whitespace() {
        assert_eq!(generate("  Hello \t  World\n"), "hello-world");
    }

    #[test]
    fn test_whitespace_collapses_before_removal() {
        // The period disappears after the separators are placed
        assert_eq!(generate("a . b"), "a--b");
    }

    #[test]
    fn test_method_title() {
        assert_eq!(generate("func (c *Client) Do"), "func-c-client-do");
    }

    #[test]
    fn test_keeps_underscore_and_hyphen() {
        assert_eq!(generate("func read_all-now"), "func-read_all-now");
    }

    #[test]
    fn test_strips_markdown_link() {
        assert_eq!(
            generate("[func Open](https://github.com/o/r/blob/main/f.go#L3)"),
            "func-open"
        );
    }

    #[test]
    fn test_strips_link_with_escaped_label() {
        assert_eq!(
            generate(r"[func \(c \*Client\) Do](https://x.test/a%28b%29)"),
            "func-c-client-do"
        );
    }

    #[test]
    fn test_strips_asciidoc_macros() {
        assert_eq!(generate("xref:func-open[func Open]"), "func-open");
        assert_eq!(generate("https://example.com/f.go[type Client]"), "type-client");
        assert_eq!(generate("link:docs/f.adoc[Guide]"), "guide");
    }

    #[test]
    fn test_strips_html_but_not_escaped_angles() {
        assert_eq!(generate(r#"<a name="x"></a>Title"#), "title");
        assert_eq!(generate(r"type List\<T\>"), "type-listt");
    }

    #[test]
    fn test_unescapes_before_slugging() {
        assert_eq!(generate(r"func read\_all"), generate("func read_all"));
    }

    #[test]
    fn test_unicode_letters_survive() {
        assert_eq!(generate("Über Straße"), "über-straße");
    }

    #[test]
    fn test_degenerate_text_falls_back() {
        assert_eq!(generate(""), EMPTY_ANCHOR);
        assert_eq!(generate("   "), EMPTY_ANCHOR);
        assert_eq!(generate("*** ..."), EMPTY_ANCHOR);
        assert_eq!(generate("***"), EMPTY_ANCHOR);
        assert_eq!(generate("- _ -"), EMPTY_ANCHOR);
    }

    #[test]
    fn test_prefixes_non_letter_start() {
        assert_eq!(generate("1.2 Overview"), "_12-overview");
        assert_eq!(generate("404"), "_404");
        assert_eq!(generate("- item"), "_--item");
        assert_eq!(generate("_private"), "_private");
    }

    #[test]
    fn test_decodes_asciidoc_replacements() {
        assert_eq!(generate("func (s {asterisk}Store) Get"), "func-s-store-get");
        assert_eq!(generate("type List++[++T++]++"), "type-listt");
        assert_eq!(generate("func read++_++all"), "func-read_all");
        assert_eq!(generate(r"\{asterisk\}"), "asterisk");
    }

    #[test]
    fn test_plain_text_keeps_prose() {
        assert_eq!(plain_text("see [the docs](x) and <b>more</b>"), "see the docs and more");
    }

    proptest! {
        // Property: anchors only contain identifier characters
        #[test]
        fn prop_anchor_charset(text in ".*") {
            let anchor = generate(&text);
            prop_assert!(!anchor.is_empty());
            prop_assert!(anchor.chars().all(is_anchor_char));
        }

        // Property: anchors start like an identifier
        #[test]
        fn prop_anchor_is_identifier(text in ".*") {
            let anchor = generate(&text);
            let first = anchor.chars().next().unwrap();
            prop_assert!(first.is_alphabetic() || first == ID_PREFIX);
        }

        // Property: generation is referentially transparent
        #[test]
        fn prop_anchor_deterministic(text in ".*") {
            prop_assert_eq!(generate(&text), generate(&text));
        }

        // Property: wrapping text in a link does not move the anchor
        #[test]
        fn prop_link_wrapper_transparent(text in "[a-zA-Z0-9 ]{1,24}", href in "https://[a-z]{1,8}\\.test/[a-z]{0,8}") {
            let linked = format!("[{}]({})", text, href);
            prop_assert_eq!(generate(&linked), generate(&text));
        }
    }
}
