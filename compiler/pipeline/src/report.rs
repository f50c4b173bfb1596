//! Results of one pipeline run.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use types::ArtifactCoordinate;

use crate::state::{ItemState, Stage};
use crate::PipelineError;

/// One thing that went wrong, with enough context to act on.
#[derive(Debug)]
pub struct StageFailure {
    /// Item the failure belongs to
    pub coordinate: ArtifactCoordinate,
    /// Stage that failed
    pub stage: Stage,
    /// Schema file involved, for document-level failures
    pub source: Option<PathBuf>,
    /// The error
    pub error: PipelineError,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.coordinate)?;
        if let Some(source) = &self.source {
            write!(f, " ({})", source.display())?;
        }
        write!(f, ": {}", self.error)
    }
}

/// Final state of one artifact item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// Item coordinate
    pub coordinate: ArtifactCoordinate,
    /// Terminal state
    pub state: ItemState,
}

/// Everything a run produced and everything that failed.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Generated files written (or confirmed unchanged)
    pub documents_generated: usize,
    /// Documents that failed to parse or emit
    pub documents_failed: usize,
    /// Paths of the generated files, in generation order
    pub generated: Vec<PathBuf>,
    /// Every failure, item-level and document-level, in order of occurrence
    pub failures: Vec<StageFailure>,
    /// Terminal state per configured item, in configuration order
    pub items: Vec<ItemOutcome>,
    /// Generated-sources directory followed by each successfully extracted item directory
    pub output_directories: Vec<PathBuf>,
}

impl RunReport {
    /// Whether nothing failed.
    pub fn is_success(&self) -> bool { self.failures.is_empty() }

    /// Failures recorded for `stage`.
    pub fn failures_at(&self, stage: Stage) -> impl Iterator<Item = &StageFailure> {
        self.failures.iter().filter(move |f| f.stage == stage)
    }

    pub(crate) fn record(
        &mut self,
        coordinate: &ArtifactCoordinate,
        stage: Stage,
        source: Option<PathBuf>,
        error: impl Into<PipelineError>,
    ) {
        if !stage.is_item_level() {
            self.documents_failed += 1;
        }
        self.failures.push(StageFailure {
            coordinate: coordinate.clone(),
            stage,
            source,
            error: error.into(),
        });
    }

    /// Serialisable view stamped with the current time.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            completed_at: Utc::now(),
            success: self.is_success(),
            documents_generated: self.documents_generated,
            documents_failed: self.documents_failed,
            generated: self.generated.clone(),
            output_directories: self.output_directories.clone(),
            items: self
                .items
                .iter()
                .map(|i| ItemSummary { coordinate: i.coordinate.to_string(), state: i.state })
                .collect(),
            failures: self
                .failures
                .iter()
                .map(|f| FailureSummary {
                    coordinate: f.coordinate.to_string(),
                    stage: f.stage,
                    source: f.source.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
        }
    }
}

/// JSON-friendly form of a [`RunReport`].
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// When the summary was taken
    pub completed_at: DateTime<Utc>,
    /// Whether nothing failed
    pub success: bool,
    /// Generated file count
    pub documents_generated: usize,
    /// Failed document count
    pub documents_failed: usize,
    /// Generated file paths
    pub generated: Vec<PathBuf>,
    /// Directories to register as compile roots
    pub output_directories: Vec<PathBuf>,
    /// Per-item terminal states
    pub items: Vec<ItemSummary>,
    /// Failures with rendered error messages
    pub failures: Vec<FailureSummary>,
}

/// One item in a [`RunSummary`].
#[derive(Debug, Clone, Serialize)]
pub struct ItemSummary {
    /// Coordinate in `group:name:type[:classifier]:version` form
    pub coordinate: String,
    /// Terminal state
    pub state: ItemState,
}

/// One failure in a [`RunSummary`].
#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    /// Coordinate in `group:name:type[:classifier]:version` form
    pub coordinate: String,
    /// Failed stage
    pub stage: Stage,
    /// Schema file, for document-level failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Rendered error
    pub error: String,
}

impl RunSummary {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string_pretty(self) }
}
