//! schemagen CLI
//!
//! Runs the schemagen pipeline as configured in `schemagen.toml` and exits
//! non-zero when any artifact or document failed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::Path;

use clap::Parser;
use schemagen_cli::{execute, render_summary, Cli};

fn main() {
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(report) => {
            print!("{}", render_summary(&report, Path::new(".")));
            if !report.is_success() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("schemagen: {}", e);
            std::process::exit(1);
        }
    }
}
