//! Unpack strategies and the registry that selects them.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use types::OverwritePolicy;

use crate::tar_strategy::{TarGzStrategy, TarStrategy};
use crate::zip_strategy::ZipStrategy;

/// Failure inside a strategy, before the extractor adds archive context.
#[derive(Debug, Error)]
pub enum UnpackError {
    /// Read or write failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Corrupt or unsupported archive.
    #[error("{0}")]
    Archive(String),
    /// Member path escapes the destination.
    #[error("unsafe entry {0}")]
    UnsafeEntry(String),
}

/// No strategy is registered under the requested type or extension.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No unpack strategy registered for '{0}'")]
pub struct NoSuchStrategy(pub String);

/// Archive members one unpack touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unpacked {
    /// Files written, in archive order
    pub written: Vec<PathBuf>,
    /// Files that already existed and were left alone under [`OverwritePolicy::Never`]
    pub kept: Vec<PathBuf>,
}

/// A way of unpacking one family of archive formats.
pub trait UnpackStrategy: Send + Sync {
    /// Short name for log output.
    fn name(&self) -> &str;

    /// Unpack every member of `archive` under `destination`.
    ///
    /// With [`OverwritePolicy::Never`], files that already existed are left
    /// alone and reported as kept instead of written.
    fn unpack(
        &self,
        archive: &Path,
        destination: &Path,
        overwrite: OverwritePolicy,
    ) -> Result<Unpacked, UnpackError>;
}

/// Maps type tags and file extensions to strategies.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    by_type: BTreeMap<String, Arc<dyn UnpackStrategy>>,
    by_extension: BTreeMap<String, Arc<dyn UnpackStrategy>>,
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("types", &self.by_type.keys().collect::<Vec<_>>())
            .field("extensions", &self.by_extension.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl StrategyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self { Self::default() }

    /// Registry with the built-in zip, tar and tar.gz strategies.
    pub fn with_defaults() -> Self {
        let zip: Arc<dyn UnpackStrategy> = Arc::new(ZipStrategy);
        let tar: Arc<dyn UnpackStrategy> = Arc::new(TarStrategy);
        let tar_gz: Arc<dyn UnpackStrategy> = Arc::new(TarGzStrategy);

        let mut registry = Self::new();
        for kind in [
            "zip",
            "jar",
            "war",
            "ear",
            "test-jar",
            "ejb",
            "maven-plugin",
            "java-source",
            "javadoc",
        ] {
            registry.register_type(kind, zip.clone());
        }
        for ext in ["zip", "jar", "war", "ear"] {
            registry.register_extension(ext, zip.clone());
        }
        registry.register_type("tar", tar.clone());
        registry.register_extension("tar", tar);
        for tag in ["tar.gz", "tgz", "crate"] {
            registry.register_type(tag, tar_gz.clone());
            registry.register_extension(tag, tar_gz.clone());
        }
        registry
    }

    /// Register `strategy` for a declared artifact type.
    pub fn register_type(&mut self, kind: impl Into<String>, strategy: Arc<dyn UnpackStrategy>) {
        self.by_type.insert(kind.into(), strategy);
    }

    /// Register `strategy` for a file extension (without the leading dot).
    pub fn register_extension(
        &mut self,
        extension: impl Into<String>,
        strategy: Arc<dyn UnpackStrategy>,
    ) {
        self.by_extension.insert(extension.into().to_ascii_lowercase(), strategy);
    }

    /// Strategy registered for the declared type `kind`.
    pub fn for_type(&self, kind: &str) -> Result<Arc<dyn UnpackStrategy>, NoSuchStrategy> {
        self.by_type.get(kind).cloned().ok_or_else(|| NoSuchStrategy(kind.to_string()))
    }

    /// Strategy for `file` by its extension.
    ///
    /// Matching ignores case and prefers the longest registered extension, so
    /// `bundle.tar.gz` selects `tar.gz` even if `gz` is also registered.
    pub fn for_file(&self, file: &Path) -> Result<Arc<dyn UnpackStrategy>, NoSuchStrategy> {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        self.by_extension
            .iter()
            .filter(|(ext, _)| file_name.ends_with(&format!(".{}", ext)))
            .max_by_key(|(ext, _)| ext.len())
            .map(|(_, strategy)| strategy.clone())
            .ok_or(NoSuchStrategy(file_name))
    }

    /// Registered type tags, sorted.
    pub fn types(&self) -> Vec<&str> { self.by_type.keys().map(String::as_str).collect() }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        self.by_extension.keys().map(String::as_str).collect()
    }
}

/// Resolve `entry` under `destination`, rejecting paths that escape it.
pub(crate) fn member_target(
    destination: &Path,
    entry: &Path,
    display_name: &str,
) -> Result<PathBuf, UnpackError> {
    if !path::is_contained_relative(entry) {
        return Err(UnpackError::UnsafeEntry(display_name.to_string()));
    }
    Ok(destination.join(entry))
}

/// Prepare `target` for writing; `Ok(false)` means leave the existing file alone.
pub(crate) fn prepare_target(
    target: &Path,
    overwrite: OverwritePolicy,
) -> Result<bool, UnpackError> {
    if target.exists() && !overwrite.allows_overwrite() {
        tracing::debug!(file = %target.display(), "keeping existing file");
        return Ok(false);
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(true)
}
