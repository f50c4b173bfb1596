#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `schemagen-resolver`: artifact location
//!
//! This crate turns a configured [`ArtifactCoordinate`] into a local file path.
//! The fetch itself is delegated to an injected [`ArtifactResolver`] capability;
//! how bytes are downloaded or cached is the resolver's business.
//!
//! ## Core Concepts
//!
//! ### `ArtifactResolver` Trait
//! Maps a fully specified [`ArtifactRequest`] (coordinate plus storage
//! extension) to a local path. Backends such as `schemagen-repository`
//! implement it.
//!
//! ### `ArtifactLocator`
//! Translates the declared artifact type into a storage extension through a
//! [`HandlerLookup`]. When no handler is registered, the declared type string
//! is used verbatim as the extension so custom archive kinds still resolve.
//!
//! ### `ResolutionError`
//! Enumerates the ways a coordinate can fail to map to a retrievable artifact.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use registry::HandlerRegistry;
//! use resolver::{ArtifactLocator, DynResolver};
//! use types::ArtifactCoordinate;
//!
//! fn demo(resolver: DynResolver) -> Result<(), resolver::ResolutionError> {
//!     let locator = ArtifactLocator::new(resolver, Arc::new(HandlerRegistry::with_defaults()));
//!     let path = locator.locate(&ArtifactCoordinate::new("com.example", "widget-api", "1.0"))?;
//!     println!("archive at {}", path.display());
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use registry::HandlerLookup;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::ArtifactCoordinate;

/// Type alias for results of resolution operations.
pub type Result<T> = std::result::Result<T, ResolutionError>;

/// Canonical error type for artifact resolution.
#[derive(thiserror::Error, Debug)]
pub enum ResolutionError {
    /// The coordinate does not name any artifact the resolver can retrieve.
    #[error("Unable to find/resolve artifact {request}: nothing at {probed}")]
    NotFound {
        /// Request that failed
        request: ArtifactRequest,
        /// Location the resolver checked
        probed: PathBuf,
    },

    /// No version was given and the resolver could not pick one.
    #[error("Unable to resolve artifact {request}: no version specified and none available")]
    NoVersionAvailable {
        /// Request that failed
        request: ArtifactRequest,
    },

    /// The coordinate itself is malformed.
    #[error("Invalid coordinate {coordinate}: {reason}")]
    InvalidCoordinate {
        /// Offending coordinate
        coordinate: ArtifactCoordinate,
        /// What is wrong with it
        reason: String,
    },

    /// An I/O failure while fetching or probing.
    #[error("I/O error while resolving {request}: {source}")]
    Io {
        /// Request that failed
        request: ArtifactRequest,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Any other resolver-specific failure.
    #[error("Unable to resolve artifact {request}: {message}")]
    Other {
        /// Request that failed
        request: ArtifactRequest,
        /// Resolver supplied detail
        message: String,
    },
}

/// A coordinate with its type translated into a storage extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactRequest {
    /// Group identifier
    pub group: String,
    /// Artifact name
    pub name: String,
    /// Requested version; empty when unspecified
    pub version: String,
    /// Optional classifier
    pub classifier: Option<String>,
    /// File extension the artifact is stored with
    pub extension: String,
}

impl ArtifactRequest {
    /// Whether a version was requested.
    pub fn has_version(&self) -> bool { !self.version.trim().is_empty() }

    /// Copy of this request pinned to `version`.
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self { version: version.into(), ..self.clone() }
    }
}

impl fmt::Display for ArtifactRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.extension)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        let version = if self.has_version() { self.version.as_str() } else { "?" };
        write!(f, ":{}", version)
    }
}

/// Capability that fetches an artifact and returns its local path.
///
/// Implementations may touch the network or a cache; they must be safe to call
/// from several threads against distinct requests.
pub trait ArtifactResolver: Send + Sync {
    /// Resolve a request to a local file path.
    fn resolve(&self, request: &ArtifactRequest) -> Result<PathBuf>;

    /// Short description of where artifacts come from, for log output.
    fn describe(&self) -> String { "artifact resolver".to_string() }
}

/// Shared, type-erased resolver.
pub type DynResolver = Arc<dyn ArtifactResolver>;

/// Maps configured coordinates to local archive paths.
#[derive(Clone)]
pub struct ArtifactLocator {
    resolver: DynResolver,
    handlers: Arc<dyn HandlerLookup>,
}

impl ArtifactLocator {
    /// Create a locator over a resolver and a handler lookup.
    pub fn new(resolver: DynResolver, handlers: Arc<dyn HandlerLookup>) -> Self {
        Self { resolver, handlers }
    }

    /// Build the request the resolver sees for `coordinate`.
    ///
    /// The extension comes from the registered handler for the declared type, or
    /// is the declared type itself when no handler exists. A handler's implied
    /// classifier applies only when the coordinate has none.
    pub fn request_for(&self, coordinate: &ArtifactCoordinate) -> ArtifactRequest {
        let handler = self.handlers.handler(coordinate.kind());
        let extension = match handler {
            Some(handler) => handler.extension.clone(),
            None => {
                debug!(kind = coordinate.kind(), "no artifact handler registered, using type as extension");
                coordinate.kind().to_string()
            }
        };
        let classifier = coordinate
            .classifier()
            .map(str::to_string)
            .or_else(|| handler.and_then(|h| h.classifier.clone()));

        ArtifactRequest {
            group: coordinate.group().to_string(),
            name: coordinate.name().to_string(),
            version: coordinate.version().to_string(),
            classifier,
            extension,
        }
    }

    /// Resolve `coordinate` to a local file path.
    pub fn locate(&self, coordinate: &ArtifactCoordinate) -> Result<PathBuf> {
        if let Some(field) = coordinate.missing_field() {
            return Err(ResolutionError::InvalidCoordinate {
                coordinate: coordinate.clone(),
                reason: format!("`{}` must not be empty", field),
            });
        }
        let request = self.request_for(coordinate);
        debug!(%request, resolver = %self.resolver.describe(), "resolving artifact");
        self.resolver.resolve(&request)
    }
}

impl fmt::Debug for ArtifactLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactLocator")
            .field("resolver", &self.resolver.describe())
            .field("handlers", &self.handlers.list_kinds())
            .finish()
    }
}
