//! Rust source emitter.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use ir::{GeneratedSource, SchemaDocument};
use registry::{TypeMappingRegistry, TypeMappingRegistryReader};

use crate::doc_comment::{single_line, write_doc_lines};
use crate::utils::{field_member_name, is_type_reference};
use crate::{clean_generated_source, EmitError, Emitter, Result};

/// Container forms recognized in field types, with the Rust type they wrap into.
const CONTAINERS: &[(&str, &str)] = &[("list", "Vec"), ("array", "Vec"), ("optional", "Option")];

/// Where a resolved type ends up relative to the struct being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Stored directly in the struct
    Inline,
    /// Inside an `Option` stored in the struct
    Optional,
    /// Behind a heap allocation such as `Vec`
    Heap,
}

/// Emits one `<name>.rs` file per schema document.
#[derive(Debug, Clone)]
pub struct RustEmitter {
    output_dir: PathBuf,
    types: TypeMappingRegistry,
}

impl RustEmitter {
    /// Emitter writing under `output_dir` with the default Rust type mappings.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_types(output_dir, TypeMappingRegistry::rust_defaults())
    }

    /// Emitter with a custom type mapping registry.
    pub fn with_types(output_dir: impl Into<PathBuf>, types: TypeMappingRegistry) -> Self {
        Self { output_dir: output_dir.into(), types }
    }

    /// Directory generated files are placed in.
    pub fn output_dir(&self) -> &Path { &self.output_dir }

    /// Rust type for a schema type expression.
    ///
    /// Mapped primitives first, then `list<T>`/`array<T>`/`optional<T>`, then a
    /// bare identifier taken as a reference to another generated type.
    pub fn rust_type(&self, type_expr: &str) -> Option<String> {
        self.resolve_type(type_expr, "", Placement::Heap)
    }

    /// Rust type for a member of the generated type `owner`.
    ///
    /// A reference back to `owner` must go through indirection: inside a list it
    /// is used as is, inside `optional<..>` it is boxed, and inline it is rejected.
    pub fn member_type(&self, type_expr: &str, owner: &str) -> Option<String> {
        self.resolve_type(type_expr, owner, Placement::Inline)
    }

    fn resolve_type(&self, type_expr: &str, owner: &str, placement: Placement) -> Option<String> {
        let expr = type_expr.trim();
        if let Some(mapped) = self.types.resolve(expr) {
            return Some(mapped.to_string());
        }

        for (container, rust) in CONTAINERS {
            let Some(rest) = strip_prefix_ignore_case(expr, container) else {
                continue;
            };
            if let Some(inner) = rest.trim_start().strip_prefix('<').and_then(|r| r.strip_suffix('>'))
            {
                let inner_placement = match (*rust, placement) {
                    ("Vec", _) | (_, Placement::Heap) => Placement::Heap,
                    _ => Placement::Optional,
                };
                return self
                    .resolve_type(inner, owner, inner_placement)
                    .map(|inner| format!("{rust}<{inner}>"));
            }
        }

        if !is_type_reference(expr) {
            return None;
        }
        match placement {
            _ if expr != owner => Some(expr.to_string()),
            Placement::Heap => Some(expr.to_string()),
            Placement::Optional => Some(format!("Box<{expr}>")),
            Placement::Inline => None,
        }
    }

    fn render(&self, doc: &SchemaDocument) -> Result<String> {
        // member name -> originating field, to report clashes after snake_casing
        let mut members: BTreeMap<String, &str> = BTreeMap::new();
        let mut rendered_fields = Vec::with_capacity(doc.fields.len());

        for field in &doc.fields {
            let member = field_member_name(&field.name);
            if member.is_empty() {
                return Err(EmitError::InvalidIdentifier {
                    schema: doc.name.clone(),
                    field: field.name.clone(),
                });
            }
            if let Some(first) = members.insert(member.clone(), &field.name) {
                return Err(EmitError::DuplicateMember {
                    schema: doc.name.clone(),
                    member,
                    first: first.to_string(),
                    second: field.name.clone(),
                });
            }
            let ty = self.member_type(&field.field_type, &doc.name).ok_or_else(|| EmitError::UnsupportedType {
                schema: doc.name.clone(),
                field: field.name.clone(),
                type_name: field.field_type.clone(),
            })?;
            rendered_fields.push((field, member, ty));
        }

        let mut out = String::new();
        writeln!(out, "// @generated by schemagen from schema `{}`. Do not edit.", doc.name)?;
        writeln!(out)?;

        if doc.description.trim().is_empty() {
            writeln!(out, "/// Generated from schema `{}`.", doc.name)?;
        } else {
            write_doc_lines(&mut out, &doc.description, "")?;
        }
        if !doc.version.is_empty() {
            writeln!(out, "///")?;
            writeln!(out, "/// API version: {}", single_line(&doc.version))?;
        }
        writeln!(out, "#[derive(Debug, Clone, PartialEq)]")?;
        writeln!(out, "pub struct {} {{", doc.name)?;
        for (field, member, ty) in &rendered_fields {
            write_doc_lines(&mut out, &field.description, "    ")?;
            if !field.description.trim().is_empty() {
                writeln!(out, "    ///")?;
            }
            writeln!(
                out,
                "    /// Generated from field `{}` (`{}`).",
                single_line(&field.name),
                single_line(&field.field_type)
            )?;
            writeln!(out, "    pub {member}: {ty},")?;
        }
        writeln!(out, "}}")?;
        writeln!(out)?;

        writeln!(out, "impl {} {{", doc.name)?;
        writeln!(out, "    /// Name of the schema this type was generated from.")?;
        writeln!(out, "    pub const SCHEMA_NAME: &'static str = {:?};", doc.name)?;
        writeln!(out, "    /// Version of the API described by the schema.")?;
        writeln!(out, "    pub const API_VERSION: &'static str = {:?};", doc.version)?;
        writeln!(out, "    /// Description carried by the schema.")?;
        writeln!(out, "    pub const DESCRIPTION: &'static str = {:?};", doc.description)?;
        writeln!(out)?;
        writeln!(out, "    /// Greeting naming the type and its description.")?;
        writeln!(out, "    pub fn greeting() -> String {{")?;
        writeln!(out, "        format!(\"Hello from {{}}: {{}}\", Self::SCHEMA_NAME, Self::DESCRIPTION)")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;

        Ok(clean_generated_source(&out))
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

impl Emitter for RustEmitter {
    fn language(&self) -> &str { "rust" }

    fn extension(&self) -> &str { "rs" }

    fn emit(&self, document: &SchemaDocument) -> Result<GeneratedSource> {
        let content = self.render(document)?;
        let file_name = path::source_file_name(&document.name, self.extension());
        Ok(GeneratedSource::new(self.output_dir.join(file_name), content))
    }
}
