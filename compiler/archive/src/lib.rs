#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Archive extraction for resolved artifacts.
//!
//! An [`ArchiveExtractor`] owns a [`StrategyRegistry`] and unpacks one archive
//! into one destination directory. The strategy is chosen by the artifact's
//! declared type first and by the archive's file extension second.
//!
//! ## Module Organization
//!
//! - `strategy` - the [`UnpackStrategy`] capability and its registry
//! - `zip_strategy` - zip-family archives (`zip`, `jar`, `war`, `ear`)
//! - `tar_strategy` - plain and gzip-compressed tarballs

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use types::OverwritePolicy;

pub mod strategy;
pub mod tar_strategy;
pub mod zip_strategy;

pub use strategy::{NoSuchStrategy, StrategyRegistry, UnpackError, UnpackStrategy, Unpacked};
pub use tar_strategy::{TarGzStrategy, TarStrategy};
pub use zip_strategy::ZipStrategy;

/// Convenient result type for extraction.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors raised while unpacking an artifact.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The artifact path is a directory: the dependency was never packaged.
    #[error(
        "Artifact has not been packaged yet: {} is a directory. \
         Build the dependency into an archive before generating sources from it",
        path.display()
    )]
    NotPackaged {
        /// Offending path
        path: PathBuf,
    },

    /// Neither the declared type nor the file extension selects a strategy.
    #[error("Unknown archive type '{kind}' for {}", archive.display())]
    UnknownArchiveType {
        /// Archive that could not be unpacked
        archive: PathBuf,
        /// Declared artifact type
        kind: String,
    },

    /// An I/O failure while reading the archive or writing members.
    #[error("Error unpacking file {} to {}: {source}", archive.display(), destination.display())]
    Io {
        /// Archive being unpacked
        archive: PathBuf,
        /// Destination directory
        destination: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The archive is corrupt or uses an unsupported feature.
    #[error("Error unpacking file {} to {}: {message}", archive.display(), destination.display())]
    Archive {
        /// Archive being unpacked
        archive: PathBuf,
        /// Destination directory
        destination: PathBuf,
        /// Decoder message
        message: String,
    },

    /// A member path would land outside the destination directory.
    #[error("Refusing to unpack entry '{entry}' from {}: path escapes the destination", archive.display())]
    UnsafeEntry {
        /// Archive being unpacked
        archive: PathBuf,
        /// Member name as stored in the archive
        entry: String,
    },
}

impl ExtractionError {
    fn from_unpack(error: UnpackError, archive: &Path, destination: &Path) -> Self {
        let archive = archive.to_path_buf();
        let destination = destination.to_path_buf();
        match error {
            UnpackError::Io(source) => Self::Io { archive, destination, source },
            UnpackError::Archive(message) => Self::Archive { archive, destination, message },
            UnpackError::UnsafeEntry(entry) => Self::UnsafeEntry { archive, entry },
        }
    }
}

/// Archive members placed under an item's destination by one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Destination directory the archive was unpacked into
    pub destination: PathBuf,
    /// Files written, in archive order
    pub files: Vec<PathBuf>,
    /// Archive members that already existed and were kept as they were
    pub kept: Vec<PathBuf>,
}

impl ExtractionResult {
    /// Number of files written.
    pub fn len(&self) -> usize { self.files.len() }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool { self.files.is_empty() }

    /// Every file of the archive now on disk, written or kept.
    pub fn members(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().chain(&self.kept).map(PathBuf::as_path)
    }

    /// Whether `file` came from this archive.
    ///
    /// Files already in the destination that the archive does not contain,
    /// e.g. leftovers from an older artifact version, are not members.
    pub fn contains(&self, file: &Path) -> bool { self.members().any(|member| member == file) }
}

/// Unpacks artifacts into destination directories.
#[derive(Debug, Clone)]
pub struct ArchiveExtractor {
    strategies: StrategyRegistry,
}

impl Default for ArchiveExtractor {
    fn default() -> Self { Self::new(StrategyRegistry::with_defaults()) }
}

impl ArchiveExtractor {
    /// Create an extractor over `strategies`.
    pub fn new(strategies: StrategyRegistry) -> Self { Self { strategies } }

    /// The strategy registry in use.
    pub fn strategies(&self) -> &StrategyRegistry { &self.strategies }

    /// Extract `archive` into `destination`.
    ///
    /// # Arguments
    ///
    /// * `archive` - Local archive file; a directory here is an error
    /// * `kind` - Declared artifact type, tried before the file extension
    /// * `destination` - Directory to unpack into; created when missing
    /// * `overwrite` - Whether existing files may be replaced
    ///
    /// # Errors
    ///
    /// [`ExtractionError::NotPackaged`] for directory input (nothing is created),
    /// [`ExtractionError::UnknownArchiveType`] when no strategy matches, and
    /// [`ExtractionError::Io`]/[`ExtractionError::Archive`] for unpack failures.
    pub fn extract(
        &self,
        archive: &Path,
        kind: &str,
        destination: &Path,
        overwrite: OverwritePolicy,
    ) -> Result<ExtractionResult> {
        if archive.is_dir() {
            return Err(ExtractionError::NotPackaged { path: archive.to_path_buf() });
        }

        fs::create_dir_all(destination).map_err(|source| ExtractionError::Io {
            archive: archive.to_path_buf(),
            destination: destination.to_path_buf(),
            source,
        })?;

        let strategy = match self.strategies.for_type(kind) {
            Ok(strategy) => {
                debug!(kind, strategy = strategy.name(), "Found unpacker by type");
                strategy
            }
            Err(_) => match self.strategies.for_file(archive) {
                Ok(strategy) => {
                    debug!(kind, strategy = strategy.name(), "Found unpacker by extension");
                    strategy
                }
                Err(_) => {
                    return Err(ExtractionError::UnknownArchiveType {
                        archive: archive.to_path_buf(),
                        kind: kind.to_string(),
                    })
                }
            },
        };

        info!("Unpacking {} to {}", archive.display(), destination.display());
        let unpacked = strategy
            .unpack(archive, destination, overwrite)
            .map_err(|e| ExtractionError::from_unpack(e, archive, destination))?;

        Ok(ExtractionResult {
            destination: destination.to_path_buf(),
            files: unpacked.written,
            kept: unpacked.kept,
        })
    }
}
