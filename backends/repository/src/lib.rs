#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `schemagen-repository`: local repository backend
//!
//! This crate provides a concrete [`resolver::ArtifactResolver`] over a
//! directory laid out the way Maven lays out a local repository:
//!
//! ```text
//! <root>/<group with '.' replaced by '/'>/<name>/<version>/<name>-<version>[-<classifier>].<extension>
//! ```
//!
//! ## Overview
//!
//! - Resolves fully specified requests by probing the expected file
//! - Picks the highest available version when none is requested
//! - Offers [`LocalRepositoryResolver::install`] to place files into the layout
//!
//! ## Example
//! ```no_run
//! use resolver::{ArtifactRequest, ArtifactResolver};
//! use schemagen_repository::LocalRepositoryResolver;
//!
//! let repo = LocalRepositoryResolver::new("/home/user/.schemagen/repository");
//! let request = ArtifactRequest {
//!     group: "com.example".into(),
//!     name: "widget-api".into(),
//!     version: "1.0.0".into(),
//!     classifier: None,
//!     extension: "jar".into(),
//! };
//! let path = repo.resolve(&request)?;
//! println!("{}", path.display());
//! # Ok::<(), resolver::ResolutionError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use resolver::{ArtifactRequest, ArtifactResolver, ResolutionError};
use types::Version;

/// An [`ArtifactResolver`] backed by a local directory tree.
///
/// Resolution performs no network I/O; an artifact either exists in the tree or
/// resolution fails with [`ResolutionError::NotFound`].
#[derive(Debug, Clone)]
pub struct LocalRepositoryResolver {
    /// Repository root directory.
    root: PathBuf,
}

impl LocalRepositoryResolver {
    /// Constructs a resolver rooted at `root`.
    ///
    /// The directory does not need to exist yet; lookups against a missing root
    /// simply fail to find anything.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        logging::trace("REPO", &format!("→ local repository at {}", root.display()));
        Self { root }
    }

    /// Repository root directory.
    pub fn root(&self) -> &Path { &self.root }

    /// Directory holding every version of `group:name`.
    pub fn artifact_dir(&self, group: &str, name: &str) -> PathBuf {
        let mut dir = self.root.clone();
        for segment in group.split('.').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }
        dir.join(name)
    }

    /// File name of an artifact, e.g. `widget-api-1.0.0-schemas.zip`.
    pub fn file_name(request: &ArtifactRequest) -> String {
        match &request.classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                request.name, request.version, classifier, request.extension
            ),
            None => format!("{}-{}.{}", request.name, request.version, request.extension),
        }
    }

    /// Expected location of a versioned request.
    pub fn artifact_path(&self, request: &ArtifactRequest) -> PathBuf {
        self.artifact_dir(&request.group, &request.name)
            .join(&request.version)
            .join(Self::file_name(request))
    }

    /// Highest version under the artifact directory that actually holds the requested file.
    ///
    /// Version directories that do not parse as a [`Version`] are ignored.
    pub fn latest_version(&self, request: &ArtifactRequest) -> Result<String, ResolutionError> {
        let dir = self.artifact_dir(&request.group, &request.name);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ResolutionError::NoVersionAvailable { request: request.clone() });
            }
            Err(source) => return Err(ResolutionError::Io { request: request.clone(), source }),
        };

        let mut best: Option<Version> = None;
        for entry in entries {
            let entry =
                entry.map_err(|source| ResolutionError::Io { request: request.clone(), source })?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(dir_name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let Ok(version) = Version::from_string(&dir_name) else {
                continue;
            };
            if !self.artifact_path(&request.with_version(dir_name)).is_file() {
                continue;
            }
            if best.as_ref().map_or(true, |b| version > *b) {
                best = Some(version);
            }
        }

        best.map(|v| v.version_string)
            .ok_or_else(|| ResolutionError::NoVersionAvailable { request: request.clone() })
    }

    /// Copy `source` into the repository at the location `request` resolves to.
    ///
    /// # Errors
    /// Returns any I/O error from creating directories or copying the file.
    pub fn install(&self, request: &ArtifactRequest, source: &Path) -> std::io::Result<PathBuf> {
        let target = self.artifact_path(request);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, &target)?;
        Ok(target)
    }
}

impl ArtifactResolver for LocalRepositoryResolver {
    /// Resolves a request to an existing file in the repository.
    ///
    /// # Errors
    /// - [`ResolutionError::NoVersionAvailable`] if no version was requested and none is installed
    /// - [`ResolutionError::NotFound`] if the expected file does not exist
    fn resolve(&self, request: &ArtifactRequest) -> Result<PathBuf, ResolutionError> {
        let request = if request.has_version() {
            request.clone()
        } else {
            let version = self.latest_version(request)?;
            tracing::debug!(%request, %version, "defaulted unspecified version");
            request.with_version(version)
        };

        let path = self.artifact_path(&request);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ResolutionError::NotFound { request, probed: path })
        }
    }

    fn describe(&self) -> String { format!("local repository {}", self.root.display()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(version: &str, classifier: Option<&str>) -> ArtifactRequest {
        ArtifactRequest {
            group: "com.example.api".to_string(),
            name: "widget".to_string(),
            version: version.to_string(),
            classifier: classifier.map(str::to_string),
            extension: "zip".to_string(),
        }
    }

    #[test]
    fn test_artifact_path_layout() {
        let repo = LocalRepositoryResolver::new("/repo");
        assert_eq!(
            repo.artifact_path(&request("1.0.0", None)),
            PathBuf::from("/repo/com/example/api/widget/1.0.0/widget-1.0.0.zip")
        );
        assert_eq!(
            repo.artifact_path(&request("1.0.0", Some("schemas"))),
            PathBuf::from("/repo/com/example/api/widget/1.0.0/widget-1.0.0-schemas.zip")
        );
    }
}
