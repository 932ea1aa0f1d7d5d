//! doccheck CLI entry point.

use clap::Parser;
use doccheck::cli::{self, Cli, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(cli.log_ansi())
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(EXIT_ERROR);
    }

    let exit_code = match cli::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
