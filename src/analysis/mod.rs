//! Export analysis over the declaration model.
//!
//! The visitor walks the top-level declarations of one [`SourceFile`] and
//! produces an [`ExportRecord`] per exported name, flagging whether a doc
//! comment covers it.
//!
//! [`SourceFile`]: crate::syntax::SourceFile

mod facts;
mod visitor;

pub use facts::{DeclarationKind, ExportRecord};
pub use visitor::collect_exports;
