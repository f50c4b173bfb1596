//! Schema type name to target-language type name mapping.

use std::collections::BTreeMap;

/// Maps schema primitive type names (`string`, `integer`, ...) to target-language types.
///
/// Lookups are case-insensitive; keys are stored lowercased.
#[derive(Debug, Default, Clone)]
pub struct TypeMappingRegistry {
    mappings: BTreeMap<String, String>,
}

impl TypeMappingRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self { Self::default() }

    /// Registry with the Rust mappings for the schema primitives.
    pub fn rust_defaults() -> Self {
        let mut registry = Self::new();
        for (schema, rust) in [
            ("string", "String"),
            ("str", "String"),
            ("int", "i64"),
            ("integer", "i64"),
            ("long", "i64"),
            ("int32", "i32"),
            ("int64", "i64"),
            ("number", "f64"),
            ("double", "f64"),
            ("float", "f32"),
            ("boolean", "bool"),
            ("bool", "bool"),
            ("bytes", "Vec<u8>"),
        ] {
            registry.insert(schema, rust);
        }
        registry
    }

    /// Add or replace a mapping.
    pub fn insert(&mut self, schema_type: &str, target_type: &str) {
        self.mappings.insert(schema_type.to_ascii_lowercase(), target_type.to_string());
    }
}

/// Read-only interface to the `TypeMappingRegistry`.
pub trait TypeMappingRegistryReader {
    /// Target type for a schema primitive, if one is registered.
    fn resolve(&self, schema_type: &str) -> Option<&str>;

    /// Number of registered mappings.
    fn mapping_count(&self) -> usize;
}

impl TypeMappingRegistryReader for TypeMappingRegistry {
    fn resolve(&self, schema_type: &str) -> Option<&str> {
        self.mappings.get(&schema_type.trim().to_ascii_lowercase()).map(|s| s.as_str())
    }

    fn mapping_count(&self) -> usize { self.mappings.len() }
}
