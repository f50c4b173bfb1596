#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Schema document parsing.
//!
//! A [`SchemaFormat`] turns the bytes of one discovered file into a validated
//! [`SchemaDocument`]. Parsing performs no I/O and is deterministic: the same
//! bytes always produce the same descriptor, with fields in document order.
//!
//! The built-in format is [`YamlSchemaFormat`] (`.yml` / `.yaml`):
//!
//! ```yaml
//! name: Widget
//! formatVersion: "1.0"
//! description: a widget
//! version: 2.3.0
//! fields:
//!   - name: id
//!     type: string
//!   - name: tags
//!     type: list<string>
//!     description: Free-form labels
//! ```

use std::path::{Path, PathBuf};

use ir::SchemaDocument;
use thiserror::Error;

pub mod validator;
pub mod yaml;

pub use validator::{validate_document, SUPPORTED_FORMAT_MAJOR};
pub use yaml::YamlSchemaFormat;

/// Why a schema document was rejected.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// The bytes are not a well-formed document of the expected shape.
    #[error("malformed document: {0}")]
    Syntax(String),
    /// The file could not be read.
    #[error("unable to read file: {0}")]
    Read(#[from] std::io::Error),
    /// The required `name` key is absent.
    #[error("missing required field `name`")]
    MissingName,
    /// The required field list is absent.
    #[error("missing required field list `fields` (or `entities`)")]
    MissingFields,
    /// `name` is empty or not a valid identifier.
    #[error("invalid type name '{0}': expected a non-keyword identifier")]
    InvalidName(String),
    /// Two fields share a name.
    #[error("duplicate field name '{0}'")]
    DuplicateField(String),
    /// A field record has an empty name.
    #[error("field #{0} has an empty name")]
    EmptyFieldName(usize),
    /// A field record has an empty type.
    #[error("field '{0}' has an empty type")]
    EmptyFieldType(String),
    /// `formatVersion` is newer than this parser understands.
    #[error("unsupported formatVersion '{found}' (supported major version: {supported})")]
    UnsupportedFormatVersion {
        /// Version found in the document
        found: String,
        /// Highest supported major version
        supported: u32,
    },
    /// `formatVersion` is not a version string.
    #[error("invalid formatVersion '{0}'")]
    InvalidFormatVersion(String),
    /// No registered schema format handles the file's extension.
    #[error("no schema format accepts this file")]
    NoFormat,
}

/// A schema document failed to parse; carries the offending file.
#[derive(Debug, Error)]
#[error("Failed to parse schema {}: {kind}", path.display())]
pub struct SchemaParseError {
    /// Schema file the bytes came from
    pub path: PathBuf,
    /// Underlying cause
    #[source]
    pub kind: ParseErrorKind,
}

impl SchemaParseError {
    /// Create an error for `path`.
    pub fn new(path: impl Into<PathBuf>, kind: ParseErrorKind) -> Self {
        Self { path: path.into(), kind }
    }

    /// The offending file.
    pub fn path(&self) -> &Path { &self.path }

    /// The underlying cause.
    pub fn kind(&self) -> &ParseErrorKind { &self.kind }
}

/// A structured document format that yields [`SchemaDocument`]s.
pub trait SchemaFormat: Send + Sync {
    /// Format name for log output.
    fn name(&self) -> &str;

    /// Exact file extensions this format reads; a leading dot is ignored.
    fn suffixes(&self) -> &[&str];

    /// Parse `bytes` read from `origin` into a validated document.
    ///
    /// `origin` is only used to label errors.
    fn parse(&self, bytes: &[u8], origin: &Path) -> Result<SchemaDocument, SchemaParseError>;

    /// Whether `path` carries one of this format's extensions.
    ///
    /// Suffixes match with or without a leading dot, as in discovery.
    fn accepts(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()).is_some_and(|ext| {
            self.suffixes().iter().any(|suffix| suffix.trim_start_matches('.') == ext)
        })
    }
}

/// Read `path` and parse it with `format`.
///
/// A read failure is reported as a [`SchemaParseError`] so that it stays
/// attached to the document rather than the artifact.
pub fn parse_file(format: &dyn SchemaFormat, path: &Path) -> Result<SchemaDocument, SchemaParseError> {
    let bytes = std::fs::read(path).map_err(|e| SchemaParseError::new(path, e.into()))?;
    format.parse(&bytes, path)
}
