//! Schema descriptors and generated output.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One field/entity declaration of a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Field name as written in the schema
    pub name: String,
    /// Schema type name (a primitive such as `string`, or a reference to another type)
    #[serde(rename = "type")]
    pub field_type: String,
    /// Field description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl FieldDeclaration {
    /// Create a field without a description
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self { name: name.into(), field_type: field_type.into(), description: String::new() }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Parsed form of one discovered schema file.
///
/// `name` becomes the identifier of the generated type. Field order is the
/// order of declaration in the source document and is preserved by emitters.
/// Parsers only hand out documents whose field names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Generated type identifier
    pub name: String,
    /// Schema format version, if the document declared one
    #[serde(rename = "formatVersion", skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,
    /// Free text description; may be empty
    #[serde(default)]
    pub description: String,
    /// Version of the API being described; may be empty
    #[serde(default)]
    pub version: String,
    /// Ordered field declarations
    pub fields: Vec<FieldDeclaration>,
}

impl SchemaDocument {
    /// Create a document with no fields and empty metadata
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format_version: None,
            description: String::new(),
            version: String::new(),
            fields: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the API version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Append a field declaration
    pub fn with_field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }

    /// Get a field by name
    pub fn get_field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> Vec<&str> { self.fields.iter().map(|f| f.name.as_str()).collect() }

    /// First field name that appears more than once, in declaration order
    pub fn first_duplicate_field(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.fields.iter().map(|f| f.name.as_str()).find(|name| !seen.insert(*name))
    }
}

/// Output of an emitter: a target path and the rendered text.
///
/// Produced once per successfully parsed document and written once by the
/// pipeline; the in-memory copy is dropped after the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    /// Target file path
    pub path: PathBuf,
    /// Rendered source text
    pub content: String,
}

impl GeneratedSource {
    /// Create a generated source
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self { path: path.into(), content: content.into() }
    }

    /// Target file path
    pub fn path(&self) -> &Path { &self.path }

    /// Rendered content as bytes
    pub fn as_bytes(&self) -> &[u8] { self.content.as_bytes() }
}
