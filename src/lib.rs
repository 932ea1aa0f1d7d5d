//! doccheck - report exported Go declarations without doc comments.
//!
//! The pipeline is linear and single-threaded:
//!
//! ```text
//! discover ──▶ syntax (tree-sitter) ──▶ analysis ──▶ report
//!  .go files    declaration model       ExportRecords   text on stdout
//! ```
//!
//! - `discover`: recursive file listing by extension
//! - `syntax`: the parser boundary ([`Frontend`]) and the Go frontend
//! - `analysis`: the declaration visitor producing [`ExportRecord`]s
//! - `scan`: drives the above over a tree, skipping unparseable files
//! - `report`: text output
//! - `cli`: argument parsing and exit codes

pub mod analysis;
pub mod cli;
pub mod discover;
pub mod error;
pub mod report;
pub mod scan;
pub mod syntax;

pub use analysis::{collect_exports, DeclarationKind, ExportRecord};
pub use error::{DiscoverError, ParseError};
pub use scan::{FileResults, ScanOutcome, Scanner};
pub use syntax::{Frontend, GoFrontend, SourceFile, TypeShape};
