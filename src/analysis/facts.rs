//! Export records produced by the declaration visitor.

use std::fmt;
use std::path::PathBuf;

use crate::syntax::TypeShape;

/// Kind of exported declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Variable,
    Constant,
    Type(TypeShape),
    Function,
    Method,
}

impl DeclarationKind {
    /// Convert to the label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Variable => "variable",
            DeclarationKind::Constant => "constant",
            DeclarationKind::Type(TypeShape::Struct) => "struct",
            DeclarationKind::Type(TypeShape::Interface) => "interface",
            DeclarationKind::Type(TypeShape::FuncType) => "func type",
            DeclarationKind::Type(TypeShape::Other) => "type",
            DeclarationKind::Function => "function",
            DeclarationKind::Method => "method",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One exported top-level name found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    /// The source file path.
    pub file: PathBuf,
    /// Line of the declared identifier (1-indexed).
    pub line: usize,
    /// The declared name.
    pub name: String,
    /// The kind of declaration.
    pub kind: DeclarationKind,
    /// Whether a doc comment covers this name.
    pub has_doc: bool,
}
