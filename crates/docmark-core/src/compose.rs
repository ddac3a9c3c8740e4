// SPDX-License-Identifier: AGPL-3.0-or-later
//! Recursive composition of a documentation tree into dialect text
//!
//! The composer only talks to the [`Dialect`] trait. Children render in a
//! fixed order and at the level the tree assigned them. A failing child
//! aborts the whole render: every builder below writes into a local buffer
//! that is returned only on success, so no partial node text escapes.

use crate::ast::{Example, Func, Location, Node, Package, Type, Value};
use crate::docblock::{self, DocBlock};
use crate::traits::{Dialect, Result};
use tracing::instrument;

/// Render `node` with `dialect`, using each dialect's default code language
pub fn render(node: &Node, dialect: &dyn Dialect) -> Result<String> {
    Composer::new(dialect).node(node)
}

/// Renders documentation nodes through a [`Dialect`]
#[derive(Clone, Copy)]
pub struct Composer<'a> {
    dialect: &'a dyn Dialect,
    language: &'a str,
}

impl<'a> Composer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            language: "",
        }
    }

    /// Tag declaration and doc code blocks with `language` instead of the
    /// dialect's default
    pub fn with_language(mut self, language: &'a str) -> Self {
        self.language = language;
        self
    }

    pub fn node(&self, node: &Node) -> Result<String> {
        match node {
            Node::Package(pkg) => self.package(pkg),
            Node::Type(ty) => self.type_doc(ty),
            Node::Func(func) => self.func(func),
            Node::Value(value) => self.value(value),
            Node::Example(example) => self.example(example),
        }
    }

    /// Header, doc, import, index, constants, variables, examples,
    /// functions, then types
    #[instrument(level = "debug", skip_all, fields(name = %pkg.name))]
    pub fn package(&self, pkg: &Package) -> Result<String> {
        let d = self.dialect;
        let mut out = self.heading(pkg.level, &pkg.title(), pkg.location.as_ref())?;
        out.push_str(&self.doc(&pkg.doc, pkg.level)?);
        out.push_str(&d.code_block(self.language, &pkg.decl));
        out.push_str(&self.index(pkg)?);

        if !pkg.consts.is_empty() {
            out.push_str(&d.header(pkg.level.saturating_add(1), "Constants")?);
            for value in &pkg.consts {
                out.push_str(&self.value(value)?);
            }
        }
        if !pkg.vars.is_empty() {
            out.push_str(&d.header(pkg.level.saturating_add(1), "Variables")?);
            for value in &pkg.vars {
                out.push_str(&self.value(value)?);
            }
        }
        for example in &pkg.examples {
            out.push_str(&self.example(example)?);
        }
        for func in &pkg.funcs {
            out.push_str(&self.func(func)?);
        }
        for ty in &pkg.types {
            out.push_str(&self.type_doc(ty)?);
        }

        Ok(out)
    }

    /// Header, doc, declaration, constants, variables, examples, functions,
    /// then methods
    #[instrument(level = "debug", skip_all, fields(name = %ty.name))]
    pub fn type_doc(&self, ty: &Type) -> Result<String> {
        let mut out = self.heading(ty.level, &ty.title(), ty.location.as_ref())?;
        out.push_str(&self.doc(&ty.doc, ty.level)?);
        out.push_str(&self.dialect.code_block(self.language, &ty.decl));

        for value in ty.consts.iter().chain(&ty.vars) {
            out.push_str(&self.value(value)?);
        }
        for example in &ty.examples {
            out.push_str(&self.example(example)?);
        }
        for func in ty.funcs.iter().chain(&ty.methods) {
            out.push_str(&self.func(func)?);
        }

        Ok(out)
    }

    /// Header, doc, declaration, then examples
    #[instrument(level = "debug", skip_all, fields(name = %func.name))]
    pub fn func(&self, func: &Func) -> Result<String> {
        let mut out = self.heading(func.level, &func.title(), func.location.as_ref())?;
        out.push_str(&self.doc(&func.doc, func.level)?);
        out.push_str(&self.dialect.code_block(self.language, &func.decl));

        for example in &func.examples {
            out.push_str(&self.example(example)?);
        }

        Ok(out)
    }

    /// Declaration followed by its doc; values carry no header of their own
    pub fn value(&self, value: &Value) -> Result<String> {
        tracing::trace!(name = %value.name, "rendering value");
        let mut out = self.dialect.code_block(self.language, &value.decl);
        out.push_str(&self.doc(&value.doc, value.level)?);
        Ok(out)
    }

    /// Collapsible section holding the doc, the code and the expected output
    pub fn example(&self, example: &Example) -> Result<String> {
        tracing::trace!(name = %example.name, "rendering example");
        let d = self.dialect;

        let mut body = self.doc(&example.doc, example.level)?;
        body.push_str(&d.code_block(self.language, &example.decl));
        if let Some(output) = example.output.as_deref().filter(|o| !o.trim().is_empty()) {
            body.push_str(&d.paragraph(&d.bold("Output:")));
            body.push_str(&d.code_block("text", output));
        }

        let mut out = d.accordion_header(&example.title());
        out.push_str(&body);
        out.push_str(&d.accordion_terminator());
        Ok(out)
    }

    /// Node header: the escaped title, linked to the source when possible
    fn heading(&self, level: usize, title: &str, location: Option<&Location>) -> Result<String> {
        let d = self.dialect;
        let href = location.map(|loc| d.code_href(loc)).unwrap_or_default();
        let text = d.link(&d.escape(title), &href);
        d.raw_header(level, &text).inspect_err(|err| {
            tracing::debug!(title, %err, "aborting render");
        })
    }

    /// Doc text as paragraphs, sub-headings, code and lists
    fn doc(&self, doc: &str, level: usize) -> Result<String> {
        let d = self.dialect;
        let mut out = String::new();

        for block in docblock::parse(doc) {
            match block {
                DocBlock::Paragraph(text) => out.push_str(&d.paragraph(&d.escape(&text))),
                DocBlock::Heading(text) => {
                    out.push_str(&d.header(level.saturating_add(1), &text)?)
                }
                DocBlock::Code(code) => out.push_str(&d.code_block(self.language, &code)),
                DocBlock::List(items) => {
                    for item in &items {
                        out.push_str(&d.list_entry(item.depth, &d.escape(&item.text)));
                    }
                    out.push('\n');
                }
            }
        }

        Ok(out)
    }

    /// Links to every function and type, methods nested under their type
    fn index(&self, pkg: &Package) -> Result<String> {
        if pkg.funcs.is_empty() && pkg.types.is_empty() {
            return Ok(String::new());
        }
        let d = self.dialect;

        let mut out = d.header(pkg.level.saturating_add(1), "Index")?;
        for func in &pkg.funcs {
            out.push_str(&d.list_entry(0, &d.local_href(&d.escape(&func.title()))));
        }
        for ty in &pkg.types {
            out.push_str(&d.list_entry(0, &d.local_href(&d.escape(&ty.title()))));
            for func in ty.funcs.iter().chain(&ty.methods) {
                out.push_str(&d.list_entry(1, &d.local_href(&d.escape(&func.title()))));
            }
        }
        out.push('\n');

        Ok(out)
    }
}
