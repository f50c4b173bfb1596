#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Lookup tables consulted during a pipeline run.
//!
//! This crate provides small in-memory registries that are populated once and
//! queried by the stages:
//!
//! - [`HandlerRegistry`] maps a declared artifact type (`jar`, `test-jar`, ...)
//!   to the file extension it is stored under.
//! - [`TypeMappingRegistry`] maps schema primitive type names to target-language
//!   type names for the emitters.
//! - [`keywords`] lists the reserved words of the Rust output language.

pub mod keywords;
pub mod type_mapping;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Storage information for one artifact type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHandler {
    /// Declared type, e.g. `test-jar`
    pub kind: String,
    /// Extension the artifact file is stored with, e.g. `jar`
    pub extension: String,
    /// Classifier implied by the type, e.g. `tests` for `test-jar`
    pub classifier: Option<String>,
}

impl ArtifactHandler {
    /// Create a handler without an implied classifier.
    pub fn new(kind: impl Into<String>, extension: impl Into<String>) -> Self {
        Self { kind: kind.into(), extension: extension.into(), classifier: None }
    }

    /// Set the implied classifier.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }
}

/// A registry of artifact handlers keyed by declared type.
#[derive(Debug, Default, Clone)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, ArtifactHandler>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self { Self::default() }

    /// Create a registry holding the conventional handlers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (kind, extension) in [
            ("jar", "jar"),
            ("ejb", "jar"),
            ("maven-plugin", "jar"),
            ("war", "war"),
            ("ear", "ear"),
            ("zip", "zip"),
            ("pom", "pom"),
            ("tgz", "tgz"),
            ("crate", "crate"),
        ] {
            registry.insert(ArtifactHandler::new(kind, extension));
        }
        registry.insert(ArtifactHandler::new("test-jar", "jar").with_classifier("tests"));
        registry.insert(ArtifactHandler::new("java-source", "jar").with_classifier("sources"));
        registry.insert(ArtifactHandler::new("javadoc", "jar").with_classifier("javadoc"));
        registry
    }

    /// Add or replace a handler.
    pub fn insert(&mut self, handler: ArtifactHandler) {
        self.handlers.insert(handler.kind.clone(), handler);
    }
}

/// Read-only interface to a handler registry.
///
/// The locator only needs this view; tests and hosts can supply their own.
pub trait HandlerLookup: Send + Sync {
    /// Get the handler for a declared type.
    fn handler(&self, kind: &str) -> Option<&ArtifactHandler>;

    /// Get the storage extension for a declared type, if a handler is registered.
    fn lookup_extension(&self, kind: &str) -> Option<&str> {
        self.handler(kind).map(|h| h.extension.as_str())
    }

    /// Get all registered types.
    fn list_kinds(&self) -> Vec<&str>;
}

impl HandlerLookup for HandlerRegistry {
    fn handler(&self, kind: &str) -> Option<&ArtifactHandler> { self.handlers.get(kind) }

    fn list_kinds(&self) -> Vec<&str> { self.handlers.keys().map(|s| s.as_str()).collect() }
}

pub use type_mapping::{TypeMappingRegistry, TypeMappingRegistryReader};
