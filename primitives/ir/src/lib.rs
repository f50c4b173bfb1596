#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! schemagen Intermediate Representation (IR)
//!
//! This crate defines the in-memory descriptors that sit between the schema
//! parser and the code emitters: the parsed [`SchemaDocument`] with its ordered
//! [`FieldDeclaration`]s, and the [`GeneratedSource`] an emitter renders from it.
//! Every format parser produces these types and every emitter consumes them, so
//! new format/emitter pairs plug in without touching the pipeline.

pub mod schema_document;

pub use schema_document::*;
