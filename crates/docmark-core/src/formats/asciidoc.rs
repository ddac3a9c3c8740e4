// SPDX-License-Identifier: AGPL-3.0-or-later
//! Asciidoc dialect

use super::non_blank;
use crate::anchor;
use crate::ast::Location;
use crate::traits::{Dialect, DialectConfig, DialectKind, FormatError, Result};

/// Deepest section level rendered; `======` is the last one Asciidoctor knows
pub const MAX_HEADER_LEVEL: usize = 6;

/// Replacement for a reserved character.
///
/// Asciidoctor drops a backslash only in front of markup it would otherwise
/// apply, so an unpaired `\*` keeps its backslash. Marks whose built-in
/// attribute expands to an entity use that attribute; brackets and braces
/// would be reparsed by the macro and attribute passes, so they go through
/// an inline passthrough instead.
fn escape_char(c: char) -> Option<&'static str> {
    let replacement = match c {
        '*' => "{asterisk}",
        '`' => "{backtick}",
        '+' => "{plus}",
        '^' => "{caret}",
        '~' => "{tilde}",
        '<' => "{lt}",
        '>' => "{gt}",
        '_' => "++_++",
        '#' => "++#++",
        '[' => "++[++",
        ']' => "++]++",
        '{' => "++{++",
        '}' => "++}++",
        _ => return None,
    };
    Some(replacement)
}

/// Asciidoc dialect
///
/// Asciidoc has no notion of a repository, so [`Dialect::code_href`] always
/// degrades to the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asciidoc {
    default_language: String,
    accordion_title: String,
}

impl Asciidoc {
    pub const DEFAULT_LANGUAGE: &'static str = "go";
    pub const DEFAULT_ACCORDION_TITLE: &'static str = "Description";

    pub fn new() -> Self {
        Self::with_config(&DialectConfig::default())
    }

    pub fn with_config(config: &DialectConfig) -> Self {
        Self {
            default_language: config
                .default_language
                .clone()
                .unwrap_or_else(|| Self::DEFAULT_LANGUAGE.to_string()),
            accordion_title: config
                .accordion_title
                .clone()
                .unwrap_or_else(|| Self::DEFAULT_ACCORDION_TITLE.to_string()),
        }
    }
}

impl Default for Asciidoc {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for Asciidoc {
    fn kind(&self) -> DialectKind {
        DialectKind::Asciidoc
    }

    fn bold(&self, text: &str) -> String {
        match non_blank(text) {
            Some(text) => format!("*{}*", text),
            None => String::new(),
        }
    }

    fn code_block(&self, language: &str, code: &str) -> String {
        let Some(code) = non_blank(code) else {
            return String::new();
        };
        let language = if language.is_empty() {
            self.default_language.as_str()
        } else {
            language
        };
        let delimiter = "-".repeat(longest_dash_line(code).max(3) + 1);
        format!(
            "[source,{language}]\n{delimiter}\n{code}\n{delimiter}\n\n",
            code = code.trim_end_matches('\n')
        )
    }

    fn header(&self, level: usize, text: &str) -> Result<String> {
        self.raw_header(level, &self.escape(text))
    }

    fn raw_header(&self, level: usize, text: &str) -> Result<String> {
        if level < 1 {
            return Err(FormatError::InvalidLevel { level });
        }
        let Some(text) = non_blank(text) else {
            return Ok(String::new());
        };

        Ok(format!(
            "[[{}]]\n{} {}\n\n",
            anchor::generate(text),
            "=".repeat(level.min(MAX_HEADER_LEVEL)),
            text
        ))
    }

    fn local_href(&self, header_text: &str) -> String {
        match non_blank(header_text) {
            Some(text) => format!("xref:{}[{}]", anchor::generate(text), text),
            None => String::new(),
        }
    }

    fn code_href(&self, _location: &Location) -> String {
        String::new()
    }

    fn link(&self, text: &str, href: &str) -> String {
        if non_blank(text).is_none() {
            return String::new();
        }
        if href.is_empty() {
            return text.to_string();
        }
        if is_macro_target(href) {
            format!("{}[{}]", href, text)
        } else {
            format!("link:{}[{}]", href, text)
        }
    }

    fn list_entry(&self, depth: usize, text: &str) -> String {
        match non_blank(text) {
            Some(text) => format!("{} {}\n", "*".repeat(depth + 1), text),
            None => String::new(),
        }
    }

    fn accordion(&self, title: &str, body: &str) -> String {
        format!(
            "{}{}{}",
            self.accordion_header(title),
            body,
            self.accordion_terminator()
        )
    }

    fn accordion_header(&self, title: &str) -> String {
        let title = non_blank(title).unwrap_or(self.accordion_title.as_str());
        format!(".{}\n[%collapsible]\n====\n", self.escape(title))
    }

    fn accordion_terminator(&self) -> String {
        "\n====\n\n".to_string()
    }

    fn paragraph(&self, text: &str) -> String {
        match non_blank(text) {
            Some(text) => format!("{}\n\n", text.trim_end()),
            None => String::new(),
        }
    }

    fn escape(&self, text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match escape_char(c) {
                Some(replacement) => escaped.push_str(replacement),
                None => escaped.push(c),
            }
        }
        escaped
    }
}

/// Hrefs Asciidoc turns into links without the `link:` macro
fn is_macro_target(href: &str) -> bool {
    href.contains("://")
        || href.starts_with("link:")
        || href.starts_with("xref:")
        || href.starts_with("mailto:")
}

/// Length of the longest line made only of dashes
fn longest_dash_line(code: &str) -> usize {
    code.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && line.chars().all(|c| c == '-'))
        .map(str::len)
        .max()
        .unwrap_or(0)
}
