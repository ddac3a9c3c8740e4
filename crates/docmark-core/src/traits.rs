// SPDX-License-Identifier: AGPL-3.0-or-later
//! Dialect trait and the types shared by every markup syntax

use crate::ast::Location;
use crate::formats::{Asciidoc, GithubMarkdown};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for rendering
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("header level cannot be less than 1 (got {level})")]
    InvalidLevel { level: usize },
}

pub type Result<T> = std::result::Result<T, FormatError>;

/// Returned when a dialect name does not match any known dialect
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect: {0}. Use github or asciidoc")]
pub struct UnknownDialect(pub String);

/// Identifier for each supported output dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    Github,
    Asciidoc,
}

impl DialectKind {
    /// File extension for documents in this dialect
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Github => "md",
            Self::Asciidoc => "adoc",
        }
    }

    /// Short display name
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Github => "GFM",
            Self::Asciidoc => "ADOC",
        }
    }

    pub const ALL: [Self; 2] = [Self::Github, Self::Asciidoc];
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Github => f.write_str("github"),
            Self::Asciidoc => f.write_str("asciidoc"),
        }
    }
}

impl FromStr for DialectKind {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" | "gfm" | "markdown" | "md" => Ok(Self::Github),
            "asciidoc" | "adoc" => Ok(Self::Asciidoc),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

/// Per-dialect overrides
///
/// Every field falls back to the constant chosen by the dialect itself when
/// left unset, so an empty config reproduces each dialect's stock output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Label used for code blocks tagged with the empty language
    pub default_language: Option<String>,
    /// Title used for accordions opened without one
    pub accordion_title: Option<String>,
}

/// Formatting primitives every output dialect provides.
///
/// Inputs are plain, unescaped text unless a method says otherwise. Empty
/// or whitespace-only inputs produce the empty string instead of an empty
/// markup shell. Implementations hold no mutable state: the same call with
/// the same arguments always yields the same output.
pub trait Dialect: Send + Sync {
    /// The dialect this implementation renders
    fn kind(&self) -> DialectKind;

    /// Emphasize `text` in bold
    fn bold(&self, text: &str) -> String;

    /// Wrap `code` in a delimited block tagged with `language`, or with the
    /// dialect's default language when `language` is empty
    fn code_block(&self, language: &str, code: &str) -> String;

    /// Escape `text` and render it as a header of depth `level`
    fn header(&self, level: usize, text: &str) -> Result<String>;

    /// Render already-formatted `text` as a header of depth `level`, carrying
    /// the anchor derived from `text`. Levels above the deepest supported
    /// header are clamped.
    fn raw_header(&self, level: usize, text: &str) -> Result<String>;

    /// Same-document link to the header whose text is `header_text`
    fn local_href(&self, header_text: &str) -> String;

    /// Link to the source location, or the empty string when the dialect
    /// cannot express one or the location is unusable
    fn code_href(&self, location: &Location) -> String;

    /// Link `text` to `href`, leaving `text` unlinked when `href` is empty
    fn link(&self, text: &str, href: &str) -> String;

    /// Unordered list entry at the zero-indexed nesting `depth`
    fn list_entry(&self, depth: usize, text: &str) -> String;

    /// Collapsible block. `title` is plain text escaped for the title's
    /// context; `body` is inserted verbatim.
    fn accordion(&self, title: &str, body: &str) -> String;

    /// Opening half of [`Dialect::accordion`]
    fn accordion_header(&self, title: &str) -> String;

    /// Closing half of [`Dialect::accordion`]
    fn accordion_terminator(&self) -> String;

    /// Block-level paragraph
    fn paragraph(&self, text: &str) -> String;

    /// Neutralize the characters this dialect reserves.
    ///
    /// Escaping is not idempotent: callers escape raw text exactly once.
    fn escape(&self, text: &str) -> String;
}

/// Build the dialect for `kind` with the given overrides
pub fn create_dialect(kind: DialectKind, config: &DialectConfig) -> Box<dyn Dialect> {
    match kind {
        DialectKind::Github => Box::new(GithubMarkdown::with_config(config)),
        DialectKind::Asciidoc => Box::new(Asciidoc::with_config(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_from_str_aliases() {
        assert_eq!("gfm".parse::<DialectKind>(), Ok(DialectKind::Github));
        assert_eq!("Markdown".parse::<DialectKind>(), Ok(DialectKind::Github));
        assert_eq!("adoc".parse::<DialectKind>(), Ok(DialectKind::Asciidoc));
    }

    #[test]
    fn test_kind_from_str_unknown() {
        let err = "html".parse::<DialectKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown dialect: html. Use github or asciidoc");
    }

    #[test]
    fn test_kind_display_parses_back() {
        for kind in DialectKind::ALL {
            assert_eq!(kind.to_string().parse::<DialectKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_invalid_level_message() {
        let err = FormatError::InvalidLevel { level: 0 };
        assert_eq!(err.to_string(), "header level cannot be less than 1 (got 0)");
    }

    #[test]
    fn test_config_partial_json() {
        let config: DialectConfig =
            serde_json::from_str(r#"{ "default_language": "rust" }"#).unwrap();
        assert_eq!(config.default_language.as_deref(), Some("rust"));
        assert_eq!(config.accordion_title, None);
    }

    #[test]
    fn test_create_dialect_kind() {
        for kind in DialectKind::ALL {
            let dialect = create_dialect(kind, &DialectConfig::default());
            assert_eq!(dialect.kind(), kind);
        }
    }
}
