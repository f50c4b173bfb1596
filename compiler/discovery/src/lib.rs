#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Finds schema documents inside an extracted artifact tree.
//!
//! [`discover`] walks a directory recursively and lazily yields regular files
//! whose extension is exactly one of the given schema suffixes. Symlinks are
//! never followed or yielded, and entries that cannot be read are skipped with
//! a warning so that one bad file does not hide its siblings.
//!
//! ```no_run
//! let found: Vec<_> = discovery::discover("target/unpacked/widget-api", &["yml", "yaml"])?
//!     .collect();
//! # Ok::<(), discovery::DiscoveryError>(())
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Errors that prevent discovery from starting.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The root is missing or is not a directory.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
}

/// Lazy, single-pass sequence of discovered schema files.
///
/// Files are yielded in a stable order (entries sorted by file name at each
/// level). Once exhausted it yields nothing further.
pub struct Discovered {
    walker: walkdir::IntoIter,
    suffixes: Vec<String>,
}

impl Discovered {
    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.suffixes.iter().any(|s| s == ext))
    }
}

impl Iterator for Discovered {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Failed to read directory entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            if !self.matches(&path) {
                continue;
            }
            if let Err(err) = File::open(&path) {
                warn!("Skipping unreadable schema file {}: {}", path.display(), err);
                continue;
            }

            debug!("Discovered schema document: {}", path.display());
            return Some(path);
        }
    }
}

/// Recursively discover files under `root` whose extension is one of `suffixes`.
///
/// Suffixes are compared case-sensitively against the whole extension; a
/// leading `.` on a suffix is ignored. `widget.yml` matches `yml`, while
/// `widget.yml.bak` and `widget.YML` do not.
///
/// # Errors
///
/// Returns [`DiscoveryError::DirectoryNotFound`] when `root` is not a directory.
pub fn discover<S: AsRef<str>>(
    root: impl AsRef<Path>,
    suffixes: &[S],
) -> Result<Discovered, DiscoveryError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(DiscoveryError::DirectoryNotFound(root.to_path_buf()));
    }

    let suffixes = suffixes
        .iter()
        .map(|s| s.as_ref().trim_start_matches('.').to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(Discovered {
        walker: WalkDir::new(root).follow_links(false).sort_by_file_name().into_iter(),
        suffixes,
    })
}
