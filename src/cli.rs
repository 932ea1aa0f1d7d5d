//! Command-line interface for doccheck.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, Level};

use crate::report;
use crate::scan::Scanner;
use crate::syntax::GoFrontend;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Report exported Go declarations that have no doc comment.
///
/// Walks PATH recursively, parses every `.go` file and prints, per file, the
/// exported constants, variables, types, functions and methods that lack a
/// documentation comment. Files that fail to parse are skipped with a warning.
#[derive(Parser, Debug)]
#[command(name = "doccheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory (or single file) to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Log level selected by `--quiet` / `--verbose`.
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }

    /// Whether the report should use ANSI colours.
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }

    /// Whether log lines on stderr should use ANSI colours.
    pub fn log_ansi(&self) -> bool {
        !self.no_color && std::io::stderr().is_terminal()
    }
}

/// Run a scan and print the report.
///
/// Failing to walk the tree is an error; unparseable files are not.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let scanner = Scanner::new(Box::new(GoFrontend::new()));
    let outcome = scanner.run_root(&cli.path)?;

    report::print_text(&outcome.results, cli.use_color())?;

    info!(
        scanned = outcome.files_scanned,
        skipped = outcome.skipped.len(),
        undocumented = outcome.undocumented_count(),
        "scan complete"
    );

    Ok(EXIT_SUCCESS)
}
