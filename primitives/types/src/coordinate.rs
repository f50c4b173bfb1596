//! Artifact coordinates and the work items built from configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Package kind assumed when configuration does not name one.
pub const DEFAULT_ARTIFACT_TYPE: &str = "jar";

/// Identifies a dependency to fetch.
///
/// Coordinates are supplied entirely by configuration and never change once
/// constructed; fields are private and exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    group: String,
    name: String,
    version: String,
    #[serde(rename = "type")]
    kind: String,
    classifier: Option<String>,
}

impl ArtifactCoordinate {
    /// Create a coordinate with the default package kind and no classifier.
    ///
    /// An empty `version` means "unspecified"; it is up to the resolver to pick one.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            kind: DEFAULT_ARTIFACT_TYPE.to_string(),
            classifier: None,
        }
    }

    /// Set the package kind (`jar`, `zip`, `tar.gz`, ...).
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the classifier (`sources`, `schemas`, ...). Empty strings mean no classifier.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        let classifier = classifier.into();
        self.classifier = if classifier.is_empty() { None } else { Some(classifier) };
        self
    }

    /// Group identifier, e.g. `com.example.api`.
    pub fn group(&self) -> &str { &self.group }

    /// Artifact name within the group.
    pub fn name(&self) -> &str { &self.name }

    /// Requested version; empty when unspecified.
    pub fn version(&self) -> &str { &self.version }

    /// Declared package kind.
    pub fn kind(&self) -> &str { &self.kind }

    /// Optional classifier.
    pub fn classifier(&self) -> Option<&str> { self.classifier.as_deref() }

    /// Whether the version was left for the resolver to choose.
    pub fn has_version(&self) -> bool { !self.version.trim().is_empty() }

    /// Returns the name of the first required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.group.trim().is_empty() {
            Some("group")
        } else if self.name.trim().is_empty() {
            Some("name")
        } else if self.kind.trim().is_empty() {
            Some("type")
        } else {
            None
        }
    }
}

impl fmt::Display for ArtifactCoordinate {
    /// Renders `group:name:type[:classifier]:version`, with `?` for an unspecified version.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.kind)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        if self.has_version() {
            write!(f, ":{}", self.version)
        } else {
            write!(f, ":?")
        }
    }
}

/// What extraction does when a member already exists on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Replace existing files.
    #[default]
    Always,
    /// Keep existing files untouched.
    Never,
}

impl OverwritePolicy {
    /// Map the boolean configuration flag onto a policy.
    pub fn from_flag(overwrite: bool) -> Self {
        if overwrite {
            OverwritePolicy::Always
        } else {
            OverwritePolicy::Never
        }
    }

    /// Whether an existing file may be replaced.
    pub fn allows_overwrite(self) -> bool { matches!(self, OverwritePolicy::Always) }
}

/// One configured dependency: where to fetch it from and where to unpack it.
///
/// Built once from configuration, consumed once by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactItem {
    /// Dependency coordinate.
    pub coordinate: ArtifactCoordinate,
    /// Directory the archive contents are extracted into.
    pub output_directory: PathBuf,
    /// Behaviour for members that already exist in `output_directory`.
    #[serde(default)]
    pub overwrite: OverwritePolicy,
}

impl ArtifactItem {
    /// Create an item that overwrites existing files.
    pub fn new(coordinate: ArtifactCoordinate, output_directory: impl Into<PathBuf>) -> Self {
        Self { coordinate, output_directory: output_directory.into(), overwrite: OverwritePolicy::Always }
    }

    /// Set the overwrite policy.
    pub fn with_overwrite(mut self, overwrite: OverwritePolicy) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Declared package kind of the underlying coordinate.
    pub fn kind(&self) -> &str { self.coordinate.kind() }

    /// Extraction directory.
    pub fn output_directory(&self) -> &Path { &self.output_directory }
}
