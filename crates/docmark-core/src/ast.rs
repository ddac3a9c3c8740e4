// SPDX-License-Identifier: AGPL-3.0-or-later
//! Documentation tree handed over by the source parser
//!
//! Every node carries its display name, free-text doc, literal declaration,
//! heading level and an optional source location. Levels are assigned
//! upstream; rendering never adjusts them.

use serde::{Deserialize, Serialize};

/// Line/column position inside a source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    #[serde(default)]
    pub col: usize,
}

/// Repository the source tree lives in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    /// Browsable remote, e.g. `https://github.com/owner/project`
    pub remote: String,
    pub default_branch: String,
    /// Path of the working directory relative to the repository root
    #[serde(default)]
    pub path_from_root: String,
}

/// Where a construct is defined
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub start: Position,
    pub end: Position,
    pub filepath: String,
    /// Directory the parser ran in; absolute `filepath`s are made relative to it
    pub workdir: String,
    pub repo: Option<Repo>,
}

impl Location {
    /// An empty location never produces a code link
    pub fn is_empty(&self) -> bool {
        self.filepath.trim().is_empty()
    }
}

/// A documented package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    /// Import statement shown below the package doc
    #[serde(default)]
    pub decl: String,
    pub level: usize,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub consts: Vec<Value>,
    #[serde(default)]
    pub vars: Vec<Value>,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub funcs: Vec<Func>,
    #[serde(default)]
    pub types: Vec<Type>,
}

impl Package {
    pub fn title(&self) -> String {
        format!("package {}", self.name)
    }
}

/// A documented type with its associated values and functions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub decl: String,
    pub level: usize,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub consts: Vec<Value>,
    #[serde(default)]
    pub vars: Vec<Value>,
    #[serde(default)]
    pub examples: Vec<Example>,
    /// Constructors and other functions returning the type
    #[serde(default)]
    pub funcs: Vec<Func>,
    #[serde(default)]
    pub methods: Vec<Func>,
}

impl Type {
    pub fn title(&self) -> String {
        format!("type {}", self.name)
    }
}

/// A function, or a method when `receiver` is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Func {
    pub name: String,
    /// Receiver as written in the declaration, e.g. `c *Client`
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub decl: String,
    pub level: usize,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl Func {
    pub fn title(&self) -> String {
        match self.receiver.as_deref() {
            Some(receiver) if !receiver.is_empty() => {
                format!("func ({}) {}", receiver, self.name)
            }
            _ => format!("func {}", self.name),
        }
    }
}

/// A constant or variable declaration block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub decl: String,
    pub level: usize,
    #[serde(default)]
    pub location: Option<Location>,
}

impl Value {
    pub fn title(&self) -> String {
        self.name.clone()
    }
}

/// A runnable example attached to a package, type or function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Suffix distinguishing multiple examples; empty for the default one
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub doc: String,
    /// Example body
    #[serde(default)]
    pub decl: String,
    /// Expected output, when the example declares one
    #[serde(default)]
    pub output: Option<String>,
    pub level: usize,
    #[serde(default)]
    pub location: Option<Location>,
}

impl Example {
    pub fn title(&self) -> String {
        if self.name.is_empty() {
            "Example".to_string()
        } else {
            format!("Example ({})", self.name)
        }
    }
}

/// Any node of the documentation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Package(Package),
    Type(Type),
    Func(Func),
    Value(Value),
    Example(Example),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Self::Package(p) => &p.name,
            Self::Type(t) => &t.name,
            Self::Func(f) => &f.name,
            Self::Value(v) => &v.name,
            Self::Example(e) => &e.name,
        }
    }

    pub fn doc(&self) -> &str {
        match self {
            Self::Package(p) => &p.doc,
            Self::Type(t) => &t.doc,
            Self::Func(f) => &f.doc,
            Self::Value(v) => &v.doc,
            Self::Example(e) => &e.doc,
        }
    }

    pub fn decl(&self) -> &str {
        match self {
            Self::Package(p) => &p.decl,
            Self::Type(t) => &t.decl,
            Self::Func(f) => &f.decl,
            Self::Value(v) => &v.decl,
            Self::Example(e) => &e.decl,
        }
    }

    pub fn level(&self) -> usize {
        match self {
            Self::Package(p) => p.level,
            Self::Type(t) => t.level,
            Self::Func(f) => f.level,
            Self::Value(v) => v.level,
            Self::Example(e) => e.level,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Package(p) => p.location.as_ref(),
            Self::Type(t) => t.location.as_ref(),
            Self::Func(f) => f.location.as_ref(),
            Self::Value(v) => v.location.as_ref(),
            Self::Example(e) => e.location.as_ref(),
        }
    }

    /// Heading text shown for this node
    pub fn title(&self) -> String {
        match self {
            Self::Package(p) => p.title(),
            Self::Type(t) => t.title(),
            Self::Func(f) => f.title(),
            Self::Value(v) => v.title(),
            Self::Example(e) => e.title(),
        }
    }
}
