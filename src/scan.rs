//! Scan driver: read, parse and visit each discovered file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::analysis::{collect_exports, ExportRecord};
use crate::discover::collect_files;
use crate::error::{DiscoverError, ParseError};
use crate::syntax::Frontend;

/// Export records per file, ordered by path. Files without exports are absent.
pub type FileResults = BTreeMap<PathBuf, Vec<ExportRecord>>;

/// A file that was left out of the results.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: ParseError,
}

/// Everything a scan produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub results: FileResults,
    /// Files parsed successfully, with or without exports.
    pub files_scanned: usize,
    pub skipped: Vec<SkippedFile>,
}

impl ScanOutcome {
    /// Number of exported names without documentation across all files.
    pub fn undocumented_count(&self) -> usize {
        self.results
            .values()
            .flatten()
            .filter(|r| !r.has_doc)
            .count()
    }
}

/// Runs the discovery, parse and visit steps with one frontend.
pub struct Scanner {
    frontend: Box<dyn Frontend>,
}

impl Scanner {
    /// Create a scanner around the given parser frontend.
    pub fn new(frontend: Box<dyn Frontend>) -> Self {
        Self { frontend }
    }

    /// List the files under `root` this scanner's frontend handles.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
        collect_files(root, self.frontend.file_extension())
    }

    /// Read, parse and visit a single file.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<ExportRecord>, ParseError> {
        let source = std::fs::read(path).map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = self.frontend.parse(path, &source)?;
        Ok(collect_exports(&parsed))
    }

    /// Scan files one at a time. Files that fail to read or parse are logged
    /// and skipped.
    pub fn run(&self, files: &[PathBuf]) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        for path in files {
            match self.scan_file(path) {
                Ok(exports) => {
                    debug!(file = %path.display(), exports = exports.len(), "analyzed");
                    outcome.files_scanned += 1;
                    if !exports.is_empty() {
                        outcome.results.insert(path.clone(), exports);
                    }
                }
                Err(error) => {
                    warn!(file = %path.display(), "skipping file: {error}");
                    outcome.skipped.push(SkippedFile {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }

        outcome
    }

    /// Discover and scan everything under `root`.
    pub fn run_root(&self, root: &Path) -> Result<ScanOutcome, DiscoverError> {
        let files = self.discover(root)?;
        debug!(
            root = %root.display(),
            language = self.frontend.language_id(),
            files = files.len(),
            "discovered"
        );
        Ok(self.run(&files))
    }
}
