#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns declared dependencies into generated sources.
//!
//! For every configured artifact item the orchestrator runs
//! **locate → extract → discover → (parse → emit)\*** and writes each generated
//! file through a [`SourceSink`]. Failures are collected in the [`RunReport`]
//! rather than aborting the run: an item-level failure (locate, extract,
//! discover) ends that item, a document-level failure (parse, emit) ends only
//! that document.
//!
//! ## Module Organization
//!
//! - `orchestration` - [`Pipeline`], its builder and the [`run`] entry point
//! - `sink` - output sink and compile-root registration capabilities
//! - `report` - per-run results
//! - `state` - item state machine and stage names

use std::path::PathBuf;

use thiserror::Error;

pub mod orchestration;
pub mod report;
pub mod sink;
pub mod state;

pub use orchestration::{run, Pipeline, PipelineBuilder};
pub use report::{ItemOutcome, RunReport, RunSummary, StageFailure};
pub use sink::{CompileRootRegistrar, IncrementalFileSink, SourceSink};
pub use state::{ItemState, Stage};

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The run cannot start: the configuration or the pipeline wiring is unusable.
///
/// Raised before any stage runs and before anything is written.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The item list is empty.
    #[error("No artifact items configured: nothing to generate sources from")]
    NoArtifactItems,
    /// The generated-sources directory is empty.
    #[error("The output directory must not be empty")]
    EmptyOutputDirectory,
    /// An item's coordinate lacks a required part.
    #[error("Artifact item #{index} ({coordinate}) has an empty `{field}`")]
    IncompleteCoordinate {
        /// Position in the configured list
        index: usize,
        /// Coordinate as written
        coordinate: String,
        /// Missing part
        field: &'static str,
    },
    /// An item has no extraction directory.
    #[error("Artifact item #{index} ({coordinate}) has an empty output directory")]
    EmptyItemDirectory {
        /// Position in the configured list
        index: usize,
        /// Coordinate as written
        coordinate: String,
    },
    /// The generated-sources directory cannot be created.
    #[error("Unable to create output directory {}: {source}", path.display())]
    OutputDirectory {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The pipeline was built without a required component.
    #[error("{0} is required")]
    MissingComponent(&'static str),
}

/// Errors that can occur while running the pipeline, recorded per failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Run-level configuration problem.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The coordinate could not be resolved to a file.
    #[error(transparent)]
    Resolution(#[from] resolver::ResolutionError),
    /// The archive could not be unpacked.
    #[error(transparent)]
    Extraction(#[from] archive::ExtractionError),
    /// The extracted tree could not be walked.
    #[error(transparent)]
    Discovery(#[from] discovery::DiscoveryError),
    /// A schema document was rejected.
    #[error(transparent)]
    Parse(#[from] schema::SchemaParseError),
    /// A document could not be rendered or written.
    #[error(transparent)]
    Emit(#[from] codegen::EmitError),
}
