#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! schemagen Configuration
//!
//! This crate provides configuration management for schemagen.
//! It handles loading, saving, and defaulting configuration files that specify:
//! - Where generated sources and unpacked artifacts go
//! - The local artifact repository
//! - Logging configuration
//! - The artifact items to generate sources from
//!
//! Configuration is stored in TOML format. [`Config::pipeline_config`] turns it
//! into the immutable [`PipelineConfig`] a pipeline run consumes.
//!
//! ```toml
//! output_directory = "target/generated-sources/schemagen"
//!
//! [repository]
//! local = "/home/me/.schemagen/repository"
//!
//! [[artifact_items]]
//! group = "com.example"
//! name = "widget-api"
//! version = "1.0.0"
//! type = "zip"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::{ArtifactCoordinate, ArtifactItem, OverwritePolicy, PipelineConfig, DEFAULT_ARTIFACT_TYPE};

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Configuration file was not found at the specified path
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where generated sources are written
    #[serde(default = "Config::default_output_dir")]
    pub output_directory: PathBuf,
    /// Base directory for items without their own output directory
    #[serde(default = "Config::default_unpack_dir")]
    pub unpack_directory: PathBuf,
    /// Artifact repository settings
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Dependencies to generate sources from
    #[serde(default)]
    pub artifact_items: Vec<ArtifactItemConfig>,
}

/// Artifact repository configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Root of the local directory repository
    #[serde(default = "Config::default_repository_dir")]
    pub local: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,
}

/// One `[[artifact_items]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactItemConfig {
    /// Group identifier
    pub group: String,
    /// Artifact name
    pub name: String,
    /// Version; empty picks the latest available
    #[serde(default)]
    pub version: String,
    /// Package kind
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Optional classifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    /// Extraction directory; defaults to `<unpack_directory>/<group>/<name>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,
    /// Whether existing extracted files are replaced
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

fn default_kind() -> String { DEFAULT_ARTIFACT_TYPE.to_string() }

fn default_overwrite() -> bool { true }

fn default_level() -> String { "info".to_string() }

impl ArtifactItemConfig {
    /// Coordinate described by this entry.
    pub fn coordinate(&self) -> ArtifactCoordinate {
        let coordinate = ArtifactCoordinate::new(&self.group, &self.name, &self.version)
            .with_kind(&self.kind);
        match &self.classifier {
            Some(classifier) => coordinate.with_classifier(classifier),
            None => coordinate,
        }
    }

    /// Work item with paths resolved against `base_dir`.
    pub fn to_item(&self, base_dir: &Path, unpack_directory: &Path) -> ArtifactItem {
        let coordinate = self.coordinate();
        let output_directory = match &self.output_directory {
            Some(dir) => path::resolve_against(base_dir, dir),
            None => path::default_unpack_directory(
                &path::resolve_against(base_dir, unpack_directory),
                &coordinate,
            ),
        };
        ArtifactItem::new(coordinate, output_directory)
            .with_overwrite(OverwritePolicy::from_flag(self.overwrite))
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self { Self { local: Config::default_repository_dir() } }
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: default_level() } }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fail with [`ConfigError::NotFound`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::from_file(path)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/schemagen/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("schemagen");
        Ok(config_dir.join("config.toml"))
    }

    /// Get the default output directory for generated code
    ///
    /// Inside a build script this is `$OUT_DIR/schemagen`.
    pub fn default_output_dir() -> PathBuf {
        Self::default_output_dir_internal(std::env::var("OUT_DIR").ok())
    }

    /// Internal function for testing - allows injection of environment values
    fn default_output_dir_internal(out_dir: Option<String>) -> PathBuf {
        match out_dir {
            Some(out_dir) => PathBuf::from(out_dir).join("schemagen"),
            None => PathBuf::from("target/generated-sources/schemagen"),
        }
    }

    /// Default base directory for unpacked artifacts
    pub fn default_unpack_dir() -> PathBuf { PathBuf::from("target/schemagen/unpacked") }

    /// Default local repository: `{home_dir()}/.schemagen/repository`
    pub fn default_repository_dir() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".schemagen").join("repository")
    }

    /// Local repository root, resolved against `base_dir`
    pub fn repository_root(&self, base_dir: &Path) -> PathBuf {
        path::resolve_against(base_dir, &self.repository.local)
    }

    /// Build the run input, resolving relative paths against `base_dir`
    pub fn pipeline_config(&self, base_dir: &Path) -> PipelineConfig {
        let artifact_items = self
            .artifact_items
            .iter()
            .map(|item| item.to_item(base_dir, &self.unpack_directory))
            .collect();
        PipelineConfig::new(path::resolve_against(base_dir, &self.output_directory), artifact_items)
            .with_project_root(base_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_directory: Self::default_output_dir(),
            unpack_directory: Self::default_unpack_dir(),
            repository: RepositoryConfig::default(),
            logging: LoggingConfig::default(),
            artifact_items: Vec::new(),
        }
    }
}
