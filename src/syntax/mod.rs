//! Language-neutral declaration model and the parser boundary.
//!
//! A [`Frontend`] turns source text into a [`SourceFile`]: the top-level
//! declarations of one file with identifier positions and what the parser
//! knows about their comments. Everything downstream (the visitor, the
//! report) works on this model only and never touches a syntax tree.
//!
//! The only frontend shipped is [`GoFrontend`], built on tree-sitter.

mod comments;
mod go;

pub use comments::CommentGroup;
pub use go::GoFrontend;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ParseError;

/// 1-indexed line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Convert a tree-sitter point (0-indexed) into a position.
    pub fn from_point(point: tree_sitter::Point) -> Self {
        Self {
            line: point.row + 1,
            column: point.column + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A declared name and where it appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub position: Position,
}

impl Ident {
    /// Whether the name is visible outside its package (leading uppercase letter).
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Token that introduced a declaration group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupToken {
    Const,
    Var,
    Type,
}

/// Shape of the type on the right-hand side of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    Struct,
    Interface,
    FuncType,
    Other,
}

/// One spec inside a declaration group.
#[derive(Debug, Clone)]
pub enum Spec {
    /// `A, B = 1, 2` inside a const or var declaration.
    Value {
        names: Vec<Ident>,
        doc: Option<CommentGroup>,
    },
    /// `Name struct{...}` or `Name = Other` inside a type declaration.
    Type {
        name: Ident,
        shape: TypeShape,
        doc: Option<CommentGroup>,
    },
}

impl Spec {
    /// The spec's own doc comment.
    pub fn doc(&self) -> Option<&CommentGroup> {
        match self {
            Spec::Value { doc, .. } | Spec::Type { doc, .. } => doc.as_ref(),
        }
    }
}

/// A top-level declaration.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// `const`, `var` or `type`, with one spec or a parenthesized list.
    Group {
        token: GroupToken,
        specs: Vec<Spec>,
        /// Comment groups the association map hands to this declaration.
        comments: Vec<CommentGroup>,
    },
    /// A function, or a method when `receivers` is non-zero.
    Func {
        name: Ident,
        receivers: usize,
        doc: Option<CommentGroup>,
        comments: Vec<CommentGroup>,
    },
}

impl Declaration {
    /// Comment groups associated with the whole declaration.
    pub fn comments(&self) -> &[CommentGroup] {
        match self {
            Declaration::Group { comments, .. } | Declaration::Func { comments, .. } => comments,
        }
    }
}

/// The declarations of one parsed file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub declarations: Vec<Declaration>,
}

/// Parser boundary: source text in, declaration model out.
///
/// Implementations reject sources with syntax errors instead of returning a
/// partial model.
pub trait Frontend: Send + Sync {
    /// Language identifier (e.g. "go").
    fn language_id(&self) -> &'static str;

    /// File extension handled, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Parse `source` read from `path`.
    fn parse(&self, path: &Path, source: &[u8]) -> Result<SourceFile, ParseError>;
}
