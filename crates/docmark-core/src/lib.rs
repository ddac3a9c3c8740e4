// SPDX-License-Identifier: AGPL-3.0-or-later
//! Docmark Core - render documentation trees into markup dialects
//!
//! This crate provides:
//! - The documentation tree (packages, types, functions, values, examples)
//! - The [`Dialect`] trait with GitHub markdown and Asciidoc implementations
//! - Anchor generation shared by every dialect
//! - A [`Composer`] that walks a tree and assembles the final text

pub mod anchor;
pub mod ast;
pub mod compose;
pub mod docblock;
pub mod formats;
pub mod traits;

pub use ast::{Example, Func, Location, Node, Package, Position, Repo, Type, Value};
pub use compose::{render, Composer};
pub use formats::{Asciidoc, GithubMarkdown};
pub use traits::{
    create_dialect, Dialect, DialectConfig, DialectKind, FormatError, Result, UnknownDialect,
};
