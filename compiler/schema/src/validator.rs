//! Checks applied to every parsed document, whatever its on-disk format.

use std::collections::HashSet;
use std::sync::OnceLock;

use ir::SchemaDocument;
use regex::Regex;
use registry::keywords::is_rust_keyword;
use types::Version;

use crate::ParseErrorKind;

/// Highest `formatVersion` major component this parser accepts.
pub const SUPPORTED_FORMAT_MAJOR: u32 = 1;

fn identifier_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").ok()).as_ref()
}

fn is_valid_type_name(name: &str) -> bool {
    name != "_"
        && !is_rust_keyword(name)
        && identifier_pattern().is_some_and(|re| re.is_match(name))
}

/// Validate a freshly deserialized document.
///
/// Checks, in order: the type name, the format version, then each field
/// (non-empty name and type, names unique within the document).
pub fn validate_document(doc: &SchemaDocument) -> Result<(), ParseErrorKind> {
    if !is_valid_type_name(&doc.name) {
        return Err(ParseErrorKind::InvalidName(doc.name.clone()));
    }

    if let Some(raw) = &doc.format_version {
        let version = Version::from_string(raw)
            .map_err(|_| ParseErrorKind::InvalidFormatVersion(raw.clone()))?;
        if version.major() > SUPPORTED_FORMAT_MAJOR {
            return Err(ParseErrorKind::UnsupportedFormatVersion {
                found: raw.clone(),
                supported: SUPPORTED_FORMAT_MAJOR,
            });
        }
    }

    let mut seen = HashSet::new();
    for (index, field) in doc.fields.iter().enumerate() {
        if field.name.trim().is_empty() {
            return Err(ParseErrorKind::EmptyFieldName(index));
        }
        if field.field_type.trim().is_empty() {
            return Err(ParseErrorKind::EmptyFieldType(field.name.clone()));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(ParseErrorKind::DuplicateField(field.name.clone()));
        }
    }

    Ok(())
}
