use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ArtifactItem;

/// Fully populated input for one pipeline run.
///
/// Built by the host (the CLI, or a build script) and passed by reference to
/// the orchestrator; nothing in the pipeline mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory all generated sources are written to.
    pub output_directory: PathBuf,
    /// Base for relative paths in log output.
    pub project_root: PathBuf,
    /// Dependencies to process, in order.
    pub artifact_items: Vec<ArtifactItem>,
}

impl PipelineConfig {
    /// Create a config with the project root set to the current directory.
    pub fn new(output_directory: impl Into<PathBuf>, artifact_items: Vec<ArtifactItem>) -> Self {
        Self {
            output_directory: output_directory.into(),
            project_root: PathBuf::from("."),
            artifact_items,
        }
    }

    /// Set the project root.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    /// Generated sources directory.
    pub fn output_directory(&self) -> &Path { &self.output_directory }
}
