// SPDX-License-Identifier: CC0-1.0

//! Path utility functions for finding project roots and naming pipeline outputs.

use std::path::{Component, Path, PathBuf};

use types::ArtifactCoordinate;

/// Find the project root by looking for the nearest `Cargo.toml` or `schemagen.toml`
///
/// This function walks up the directory tree from `start` until it finds a
/// directory containing either file.
///
/// # Returns
///
/// Returns `Some(PathBuf)` containing the project root, or `None` when the walk
/// reaches the filesystem root without a match.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join("Cargo.toml").is_file() || current.join("schemagen.toml").is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Render `path` relative to `base` for log output
///
/// Falls back to the path as given when no relative form exists (e.g. different
/// drive prefixes on Windows).
pub fn relative_display(base: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, base)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

/// File name for a generated source unit, e.g. `Widget.rs`
///
/// # Examples
///
/// ```
/// use schemagen_path::source_file_name;
/// assert_eq!(source_file_name("Widget", "rs"), "Widget.rs");
/// assert_eq!(source_file_name("Widget", ".java"), "Widget.java");
/// ```
pub fn source_file_name(type_name: &str, extension: &str) -> String {
    format!("{}.{}", type_name, extension.trim_start_matches('.'))
}

/// Default extraction directory for an artifact: `<base>/<group>/<name>`
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use schemagen_path::default_unpack_directory;
/// use types::ArtifactCoordinate;
///
/// let coordinate = ArtifactCoordinate::new("com.example", "widget-api", "1.0");
/// assert_eq!(
///     default_unpack_directory(Path::new("target/unpacked"), &coordinate),
///     PathBuf::from("target/unpacked/com.example/widget-api"),
/// );
/// ```
pub fn default_unpack_directory(base: &Path, coordinate: &ArtifactCoordinate) -> PathBuf {
    let mut dir = base.join(coordinate.group()).join(coordinate.name());
    if let Some(classifier) = coordinate.classifier() {
        dir = dir.join(classifier);
    }
    dir
}

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Whether a relative archive member path stays inside its destination
///
/// Rejects absolute paths, drive prefixes and any `..` component.
pub fn is_contained_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
