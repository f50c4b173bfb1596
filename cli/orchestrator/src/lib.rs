#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Host-side driver for the schemagen pipeline.
//!
//! Loads the TOML configuration, installs logging, wires a local repository
//! resolver into the pipeline and runs it. The binary in `main.rs` only
//! parses arguments and maps the outcome to an exit status.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use config::Config;
use pipeline::{IncrementalFileSink, Pipeline, RunReport};
use repository::LocalRepositoryResolver;
use thiserror::Error;
use tracing::debug;

/// Errors that stop the CLI before or after a run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file problem.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// The loaded configuration cannot be run.
    #[error(transparent)]
    Configuration(#[from] pipeline::ConfigurationError),
    /// Logging could not be set up.
    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
    /// The JSON report could not be rendered.
    #[error("Failed to render report: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON report could not be written.
    #[error("Failed to write report {}: {source}", path.display())]
    Report {
        /// Report destination
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Command-line interface configuration for schemagen.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "schemagen",
    about = "Generate Rust sources from schema documents packaged in dependency archives",
    version
)]
pub struct Cli {
    /// Configuration file
    #[arg(long, short, default_value = "schemagen.toml")]
    pub config: PathBuf,
    /// Override the generated sources directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Override the local artifact repository
    #[arg(long)]
    pub repository: Option<PathBuf>,
    /// Override the log level (e.g. debug, info, warn)
    #[arg(long)]
    pub log_level: Option<String>,
    /// Write a JSON run report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Directory relative config paths are resolved against.
fn base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Load configuration, run the pipeline and write the report if requested.
pub fn execute(cli: &Cli) -> Result<RunReport> {
    let mut config = Config::load(&cli.config)?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(repository) = &cli.repository {
        config.repository.local = repository.clone();
    }
    logging::init(&config.logging.level)?;

    let base = base_dir(&cli.config);
    let mut run_config = config.pipeline_config(&base);
    if let Some(output_dir) = &cli.output_dir {
        run_config.output_directory = output_dir.clone();
    }
    let resolver = LocalRepositoryResolver::new(config.repository_root(&base));
    debug!(config = %cli.config.display(), items = run_config.artifact_items.len(), "configuration loaded");

    let report = Pipeline::builder()
        .resolver(Arc::new(resolver))
        .sink(Arc::new(IncrementalFileSink::new()))
        .build()?
        .run(&run_config)?;

    if let Some(path) = &cli.report {
        let json = report.summary().to_json()?;
        fs::write(path, json).map_err(|source| CliError::Report { path: path.clone(), source })?;
    }
    Ok(report)
}

/// Human-readable run summary for stdout.
pub fn render_summary(report: &RunReport, project_root: &Path) -> String {
    let mut out = format!(
        "Generated {} source file(s), {} document(s) failed\n",
        report.documents_generated, report.documents_failed
    );
    for failure in &report.failures {
        out.push_str(&format!("  {}\n", failure));
    }
    out.push_str("Output directories:\n");
    for dir in &report.output_directories {
        out.push_str(&format!("  {}\n", path::relative_display(project_root, dir)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir() {
        assert_eq!(base_dir(Path::new("schemagen.toml")), PathBuf::from("."));
        assert_eq!(base_dir(Path::new("proj/schemagen.toml")), PathBuf::from("proj"));
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from(["schemagen", "--config", "x.toml", "--log-level", "debug"]);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.report.is_none());
    }
}
