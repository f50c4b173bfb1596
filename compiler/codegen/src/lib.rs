#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Code generation for parsed schema documents.
//!
//! An [`Emitter`] renders one [`SchemaDocument`] into one [`GeneratedSource`]:
//! a target path plus deterministic source text. Emitters never touch the
//! filesystem; writing is the caller's job.
//!
//! The built-in emitter is [`RustEmitter`], which renders a `pub struct` with
//! one member per schema field and an `impl` block carrying the schema metadata.

pub mod doc_comment;
pub mod rust_emitter;
pub mod utils;

use std::path::PathBuf;

use ir::{GeneratedSource, SchemaDocument};
use thiserror::Error;

pub use rust_emitter::RustEmitter;

/// Error type for rendering and writing generated sources.
#[derive(Debug, Error)]
pub enum EmitError {
    /// A field type is neither a mapped primitive, a supported container, nor a type reference.
    #[error("Unsupported type '{type_name}' for field '{field}' of schema '{schema}'")]
    UnsupportedType {
        /// Schema type name
        schema: String,
        /// Field carrying the type
        field: String,
        /// Offending type expression
        type_name: String,
    },
    /// A field name cannot be turned into a member identifier.
    #[error("Field '{field}' of schema '{schema}' does not yield a valid identifier")]
    InvalidIdentifier {
        /// Schema type name
        schema: String,
        /// Offending field name
        field: String,
    },
    /// Two fields render to the same member name.
    #[error("Fields '{first}' and '{second}' of schema '{schema}' both map to member '{member}'")]
    DuplicateMember {
        /// Schema type name
        schema: String,
        /// Generated member name
        member: String,
        /// First field claiming the member
        first: String,
        /// Second field claiming the member
        second: String,
    },
    /// Another document already generated the same file in this run.
    #[error(
        "Generated file {} from {} collides with output already generated from {}",
        path.display(), second.display(), first.display()
    )]
    Collision {
        /// Contested output path
        path: PathBuf,
        /// Schema file that produced the path first
        first: PathBuf,
        /// Schema file that was rejected
        second: PathBuf,
    },
    /// Writing the generated file failed.
    #[error("Failed to write generated file {}: {source}", path.display())]
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// Formatting error when building generated source.
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

/// Convenient result type for emitters.
pub type Result<T> = std::result::Result<T, EmitError>;

/// Renders schema documents into output-language source files.
pub trait Emitter: Send + Sync {
    /// Output language, for log output.
    fn language(&self) -> &str;

    /// Source file extension without the dot, e.g. `rs`.
    fn extension(&self) -> &str;

    /// Render `document`.
    ///
    /// Implementations must be deterministic: the same document always yields
    /// byte-identical content and the same path.
    fn emit(&self, document: &SchemaDocument) -> Result<GeneratedSource>;
}

/// Trim trailing whitespace from each line and drop trailing blank lines.
/// Always ensures the returned string ends with a single newline when not empty.
pub fn clean_generated_source(src: &str) -> String {
    let mut lines: Vec<&str> = src.lines().map(str::trim_end).collect();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_generated_source() {
        assert_eq!(clean_generated_source("a  \n\tb\t\n\n\n"), "a\n\tb\n");
        assert_eq!(clean_generated_source("\n \n"), "");
        assert_eq!(clean_generated_source("x"), "x\n");
    }
}
