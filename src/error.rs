//! Error types for discovery and parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal error while enumerating the source tree.
#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("walking {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Per-file error. The scanner logs it and moves on to the next file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: source is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },
    #[error("loading grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("{}: parser gave up", path.display())]
    Aborted { path: PathBuf },
    #[error("{}:{line}:{column}: syntax error near {snippet:?}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
        snippet: String,
    },
}
