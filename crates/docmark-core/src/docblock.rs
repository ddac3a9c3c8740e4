// SPDX-License-Identifier: AGPL-3.0-or-later
//! Splitting free-text doc comments into renderable blocks
//!
//! The rules follow the usual plain-text doc conventions:
//! - blank lines separate blocks
//! - a lone `# Title` line is a heading
//! - indented lines (outside a list) form a code block
//! - lines starting with `-`, `*` or `+` are list items, nested by their
//!   indentation; indented lines right after an item continue it

/// One block of doc text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocBlock {
    /// Prose, with its lines joined by single spaces
    Paragraph(String),
    Heading(String),
    /// Preformatted text with common indentation removed
    Code(String),
    List(Vec<ListItem>),
}

/// One entry of a doc list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Zero-indexed nesting
    pub depth: usize,
    pub text: String,
}

enum Pending {
    None,
    Paragraph(Vec<String>),
    Code(Vec<String>),
    List {
        items: Vec<ListItem>,
        // Indentation of each open nesting level
        indents: Vec<usize>,
    },
}

/// Split `doc` into blocks in source order
pub fn parse(doc: &str) -> Vec<DocBlock> {
    let mut blocks = Vec::new();
    let mut pending = Pending::None;

    for line in doc.lines() {
        let line = line.trim_end();

        if line.is_empty() {
            match &mut pending {
                // Blank lines inside code survive until the code ends
                Pending::Code(lines) => lines.push(String::new()),
                _ => flush(&mut blocks, std::mem::replace(&mut pending, Pending::None)),
            }
            continue;
        }

        let indented = line.starts_with(' ') || line.starts_with('\t');
        let trimmed = line.trim_start();

        if let Some(item) = list_item(trimmed) {
            if !matches!(pending, Pending::List { .. }) {
                flush(&mut blocks, std::mem::replace(&mut pending, Pending::None));
                pending = Pending::List {
                    items: Vec::new(),
                    indents: Vec::new(),
                };
            }
            if let Pending::List { items, indents } = &mut pending {
                items.push(ListItem {
                    depth: nesting(indents, line.len() - trimmed.len()),
                    text: item.to_string(),
                });
            }
            continue;
        }

        match &mut pending {
            Pending::List { items, .. } if indented => {
                if let Some(last) = items.last_mut() {
                    last.text.push(' ');
                    last.text.push_str(trimmed);
                }
            }
            Pending::Code(lines) if indented => lines.push(line.to_string()),
            Pending::Paragraph(lines) if !indented => lines.push(trimmed.to_string()),
            _ => {
                flush(&mut blocks, std::mem::replace(&mut pending, Pending::None));
                if indented {
                    pending = Pending::Code(vec![line.to_string()]);
                } else if let Some(title) = heading(trimmed) {
                    blocks.push(DocBlock::Heading(title.to_string()));
                } else {
                    pending = Pending::Paragraph(vec![trimmed.to_string()]);
                }
            }
        }
    }

    flush(&mut blocks, pending);
    blocks
}

fn flush(blocks: &mut Vec<DocBlock>, pending: Pending) {
    match pending {
        Pending::None => {}
        Pending::Paragraph(lines) => blocks.push(DocBlock::Paragraph(lines.join(" "))),
        Pending::Code(mut lines) => {
            while lines.last().is_some_and(|l| l.is_empty()) {
                lines.pop();
            }
            blocks.push(DocBlock::Code(unindent(&lines.join("\n"))));
        }
        Pending::List { items, .. } => blocks.push(DocBlock::List(items)),
    }
}

/// Depth of an item indented by `indent`, closing deeper levels first
fn nesting(indents: &mut Vec<usize>, indent: usize) -> usize {
    while indents.last().is_some_and(|&open| open > indent) {
        indents.pop();
    }
    if indents.last().map_or(true, |&open| open < indent) {
        indents.push(indent);
    }
    indents.len() - 1
}

fn list_item(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

fn heading(line: &str) -> Option<&str> {
    line.strip_prefix("# ")
        .map(str::trim)
        .filter(|title| !title.is_empty())
}

/// Remove common leading indentation from a multi-line string.
fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| l.get(min_indent..).unwrap_or_else(|| l.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}
