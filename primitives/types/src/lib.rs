#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Core types shared by every stage of the schemagen pipeline.
//!
//! This crate defines the configuration-side data model: the coordinate that
//! identifies a fetchable dependency, the per-dependency work item handed to the
//! pipeline, and the version type used both for repository version selection and
//! for schema format compatibility checks.

/// Artifact coordinates and configured artifact items.
pub mod coordinate;
/// Input handed to a pipeline run
pub mod pipeline_config;
/// Version representation and parsing
pub mod version;

pub use coordinate::{ArtifactCoordinate, ArtifactItem, OverwritePolicy, DEFAULT_ARTIFACT_TYPE};
pub use pipeline_config::PipelineConfig;
pub use version::{Version, VersionError};
