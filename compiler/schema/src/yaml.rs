//! YAML schema documents.

use std::path::Path;

use ir::{FieldDeclaration, SchemaDocument};
use serde::Deserialize;

use crate::validator::validate_document;
use crate::{ParseErrorKind, SchemaFormat, SchemaParseError};

/// A YAML scalar that may be written quoted or bare (`1.0` vs `"1.0"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_yaml::Number),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: Option<String>,
    #[serde(rename = "formatVersion")]
    format_version: Option<Scalar>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    version: Option<Scalar>,
    #[serde(alias = "entities")]
    fields: Option<Vec<RawField>>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    field_type: String,
    #[serde(default)]
    description: Option<String>,
}

/// The YAML schema format (`.yml`, `.yaml`).
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlSchemaFormat;

impl YamlSchemaFormat {
    /// Create the format.
    pub fn new() -> Self { Self }

    fn parse_kind(bytes: &[u8]) -> Result<SchemaDocument, ParseErrorKind> {
        let raw: RawDocument =
            serde_yaml::from_slice(bytes).map_err(|e| ParseErrorKind::Syntax(e.to_string()))?;

        let name = raw.name.ok_or(ParseErrorKind::MissingName)?;
        let fields = raw.fields.ok_or(ParseErrorKind::MissingFields)?;

        let doc = SchemaDocument {
            name,
            format_version: raw.format_version.map(Scalar::into_string),
            description: raw.description.unwrap_or_default(),
            version: raw.version.map(Scalar::into_string).unwrap_or_default(),
            fields: fields
                .into_iter()
                .map(|f| {
                    FieldDeclaration::new(f.name, f.field_type)
                        .with_description(f.description.unwrap_or_default())
                })
                .collect(),
        };

        validate_document(&doc)?;
        Ok(doc)
    }
}

impl SchemaFormat for YamlSchemaFormat {
    fn name(&self) -> &str { "yaml" }

    fn suffixes(&self) -> &[&str] { &["yml", "yaml"] }

    fn parse(&self, bytes: &[u8], origin: &Path) -> Result<SchemaDocument, SchemaParseError> {
        Self::parse_kind(bytes).map_err(|kind| SchemaParseError::new(origin, kind))
    }
}
