//! Text report of undocumented exports.
//!
//! One block per file that has at least one export:
//!
//! ```text
//!
//! File: pkg/server.go
//! 2. Serve (function) - line 14
//! ```
//!
//! The ordinal is the record's position among all exports of the file, so
//! documented records leave gaps in the numbering.

use std::io::{self, Write};

use colored::*;

use crate::scan::FileResults;

/// Write the report to `out`. Colour codes are only emitted when `color` is set.
pub fn write_text<W: Write>(out: &mut W, results: &FileResults, color: bool) -> io::Result<()> {
    for (path, exports) in results {
        if exports.is_empty() {
            continue;
        }

        let header = format!("File: {}", path.display());
        writeln!(out)?;
        if color {
            writeln!(out, "{}", header.bold())?;
        } else {
            writeln!(out, "{}", header)?;
        }

        for (i, export) in exports.iter().enumerate() {
            if export.has_doc {
                continue;
            }
            if color {
                writeln!(
                    out,
                    "{}. {} ({}) - line {}",
                    i + 1,
                    export.name.yellow(),
                    export.kind,
                    export.line
                )?;
            } else {
                writeln!(
                    out,
                    "{}. {} ({}) - line {}",
                    i + 1,
                    export.name,
                    export.kind,
                    export.line
                )?;
            }
        }
    }

    Ok(())
}

/// Print the report to standard output.
pub fn print_text(results: &FileResults, color: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_text(&mut out, results, color)?;
    out.flush()
}
