// SPDX-License-Identifier: AGPL-3.0-or-later
//! GitHub-flavored markdown dialect

use super::{backslash_escape, longest_run, non_blank};
use crate::anchor;
use crate::ast::Location;
use crate::traits::{Dialect, DialectConfig, DialectKind, FormatError, Result};
use std::path::{Component, Path};

/// Deepest header markdown can express
pub const MAX_HEADER_LEVEL: usize = 6;

const RESERVED: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '<', '>', '#', '+', '-', '!', '|', '~',
];

/// GitHub-flavored markdown dialect
///
/// Headers carry an explicit `<a name>` anchor so links keep resolving when
/// the header text itself contains a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubMarkdown {
    default_language: String,
    accordion_title: String,
}

impl GithubMarkdown {
    pub const DEFAULT_LANGUAGE: &'static str = "text";
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

impl Default for GithubMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for GithubMarkdown {
    fn kind(&self) -> DialectKind {
        DialectKind::Github
    }

    fn bold(&self, text: &str) -> String {
        match non_blank(text) {
            Some(text) => format!("**{}**", text),
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
        // The fence must outlast any backtick run inside the code
        let fence = "`".repeat(longest_run(code, '`').max(2) + 1);
        format!(
            "{fence}{language}\n{code}\n{fence}\n\n",
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
            "<a name=\"{}\"></a>\n{} {}\n\n",
            anchor::generate(text),
            "#".repeat(level.min(MAX_HEADER_LEVEL)),
            text
        ))
    }

    fn local_href(&self, header_text: &str) -> String {
        match non_blank(header_text) {
            Some(text) => format!("[{}](#{})", text, anchor::generate(text)),
            None => String::new(),
        }
    }

    fn code_href(&self, location: &Location) -> String {
        if location.is_empty() {
            return String::new();
        }
        let Some(repo) = location.repo.as_ref() else {
            return String::new();
        };
        if repo.remote.is_empty() || repo.default_branch.is_empty() {
            return String::new();
        }

        let filepath = Path::new(&location.filepath);
        let relative = if filepath.is_absolute() {
            let stripped = if location.workdir.is_empty() {
                None
            } else {
                filepath.strip_prefix(&location.workdir).ok()
            };
            match stripped {
                Some(relative) => relative,
                None => {
                    tracing::debug!(
                        file = %location.filepath,
                        workdir = %location.workdir,
                        "source file outside the work dir; skipping code link"
                    );
                    return String::new();
                }
            }
        } else {
            filepath
        };

        let path = url_path(&Path::new(&repo.path_from_root).join(relative));
        let lines = match (location.start.line, location.end.line) {
            (0, _) => String::new(),
            (start, end) if end <= start => format!("#L{}", start),
            (start, end) => format!("#L{}-L{}", start, end),
        };

        format!(
            "{}/blob/{}/{}{}",
            repo.remote.trim_end_matches('/'),
            repo.default_branch,
            path,
            lines
        )
    }

    fn link(&self, text: &str, href: &str) -> String {
        if non_blank(text).is_none() {
            return String::new();
        }
        if href.is_empty() {
            return text.to_string();
        }
        format!("[{}]({})", text, href.replace('(', "%28").replace(')', "%29"))
    }

    fn list_entry(&self, depth: usize, text: &str) -> String {
        match non_blank(text) {
            Some(text) => format!("{}- {}\n", "  ".repeat(depth), text),
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
        // The summary line opens an HTML block, where backslash escapes stay literal
        let title = non_blank(title).unwrap_or(self.accordion_title.as_str());
        format!("<details><summary>{}</summary>\n<p>\n\n", html_escape(title))
    }

    fn accordion_terminator(&self) -> String {
        "\n\n</p>\n</details>\n\n".to_string()
    }

    fn paragraph(&self, text: &str) -> String {
        match non_blank(text) {
            Some(text) => format!("{}\n\n", text.trim_end()),
            None => String::new(),
        }
    }

    fn escape(&self, text: &str) -> String {
        backslash_escape(text, RESERVED)
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Join the normal components of `path` with `/`, resolving `..`
fn url_path(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            _ => {}
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Position, Repo};
    use pretty_assertions::assert_eq;

    fn location(filepath: &str, start: usize, end: usize) -> Location {
        Location {
            start: Position { line: start, col: 1 },
            end: Position { line: end, col: 1 },
            filepath: filepath.to_string(),
            workdir: "/work/project".to_string(),
            repo: Some(Repo {
                remote: "https://github.com/acme/widgets".to_string(),
                default_branch: "main".to_string(),
                path_from_root: "pkg/widget".to_string(),
            }),
        }
    }

    #[test]
    fn test_header_with_anchor() {
        let md = GithubMarkdown::new();
        assert_eq!(
            md.header(2, "My Function").unwrap(),
            "<a name=\"my-function\"></a>\n## My Function\n\n"
        );
    }

    #[test]
    fn test_header_escapes_text() {
        let md = GithubMarkdown::new();
        assert_eq!(
            md.header(3, "func read_all").unwrap(),
            "<a name=\"func-read_all\"></a>\n### func read\\_all\n\n"
        );
    }

    #[test]
    fn test_header_clamps_deep_levels() {
        let md = GithubMarkdown::new();
        assert_eq!(
            md.raw_header(9, "Deep").unwrap(),
            "<a name=\"deep\"></a>\n###### Deep\n\n"
        );
    }

    #[test]
    fn test_code_block() {
        let md = GithubMarkdown::new();
        assert_eq!(
            md.code_block("go", "x := 1\n"),
            "```go\nx := 1\n```\n\n"
        );
    }

    #[test]
    fn test_code_block_default_language() {
        let md = GithubMarkdown::new();
        assert_eq!(md.code_block("", "plain"), "```text\nplain\n```\n\n");

        let config = DialectConfig {
            default_language: Some("go".to_string()),
            ..Default::default()
        };
        let md = GithubMarkdown::with_config(&config);
        assert_eq!(md.code_block("", "plain"), "```go\nplain\n```\n\n");
    }

    #[test]
    fn test_code_block_longer_fence() {
        let md = GithubMarkdown::new();
        assert_eq!(
            md.code_block("md", "```go\nx\n```"),
            "````md\n```go\nx\n```\n````\n\n"
        );
    }

    #[test]
    fn test_local_href() {
        let md = GithubMarkdown::new();
        assert_eq!(md.local_href("type Client"), "[type Client](#type-client)");
    }

    #[test]
    fn test_link() {
        let md = GithubMarkdown::new();
        assert_eq!(md.link("docs", "https://x.test/a"), "[docs](https://x.test/a)");
        assert_eq!(md.link("docs", "https://x.test/f(1)"), "[docs](https://x.test/f%281%29)");
        assert_eq!(md.link("docs", ""), "docs");
        assert_eq!(md.link("", "https://x.test"), "");
    }

    #[test]
    fn test_list_entry_depth() {
        let md = GithubMarkdown::new();
        assert_eq!(md.list_entry(0, "top"), "- top\n");
        assert_eq!(md.list_entry(2, "nested"), "    - nested\n");
    }

    #[test]
    fn test_accordion() {
        let md = GithubMarkdown::new();
        assert_eq!(
            md.accordion("Example", "body"),
            "<details><summary>Example</summary>\n<p>\n\nbody\n\n</p>\n</details>\n\n"
        );
        assert!(md.accordion_header("").contains("<summary>Description</summary>"));
    }

    #[test]
    fn test_accordion_title_is_entity_escaped() {
        let md = GithubMarkdown::new();
        assert_eq!(
            md.accordion_header("Example (Retry_fast) <T> & more"),
            "<details><summary>Example (Retry_fast) &lt;T&gt; &amp; more</summary>\n<p>\n\n"
        );
    }

    #[test]
    fn test_accordion_configured_title() {
        let config = DialectConfig {
            accordion_title: Some("Details".to_string()),
            ..Default::default()
        };
        let md = GithubMarkdown::with_config(&config);
        assert!(md.accordion_header(" ").contains("<summary>Details</summary>"));
    }

    #[test]
    fn test_paragraph_and_bold() {
        let md = GithubMarkdown::new();
        assert_eq!(md.paragraph("Some text.\n"), "Some text.\n\n");
        assert_eq!(md.bold("Output:"), "**Output:**");
    }

    #[test]
    fn test_escape() {
        let md = GithubMarkdown::new();
        assert_eq!(md.escape("a*b [c](d) <e>"), r"a\*b \[c\]\(d\) \<e\>");
    }

    #[test]
    fn test_code_href_relative_file() {
        let md = GithubMarkdown::new();
        assert_eq!(
            md.code_href(&location("widget.go", 10, 10)),
            "https://github.com/acme/widgets/blob/main/pkg/widget/widget.go#L10"
        );
    }

    #[test]
    fn test_code_href_absolute_file_range() {
        let md = GithubMarkdown::new();
        assert_eq!(
            md.code_href(&location("/work/project/sub/w.go", 3, 9)),
            "https://github.com/acme/widgets/blob/main/pkg/widget/sub/w.go#L3-L9"
        );
    }

    #[test]
    fn test_code_href_degrades() {
        let md = GithubMarkdown::new();
        assert_eq!(md.code_href(&location("/elsewhere/w.go", 1, 1)), "");
        assert_eq!(md.code_href(&Location::default()), "");

        // Without a work dir an absolute path cannot be placed in the repo
        let mut no_workdir = location("/home/dev/src/widgets/pkg/w.go", 3, 3);
        no_workdir.workdir = String::new();
        assert_eq!(md.code_href(&no_workdir), "");

        let mut no_repo = location("w.go", 1, 1);
        no_repo.repo = None;
        assert_eq!(md.code_href(&no_repo), "");
    }

    #[test]
    fn test_url_path_resolves_parent() {
        assert_eq!(url_path(Path::new("a/b/../c.go")), "a/c.go");
        assert_eq!(url_path(Path::new("./c.go")), "c.go");
    }
}
