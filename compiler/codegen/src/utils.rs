// codegen/src/utils.rs

use registry::keywords::{is_raw_forbidden, is_rust_keyword};

/// Convert camelCase or PascalCase to snake_case
///
/// Acronyms stay together: `userID` becomes `user_id`, `HTTPServer` becomes
/// `http_server`.
///
/// ```
/// use codegen::utils::camel_to_snake_case;
/// assert_eq!(camel_to_snake_case("displayName"), "display_name");
/// assert_eq!(camel_to_snake_case("HTTPServer"), "http_server");
/// assert_eq!(camel_to_snake_case("already_snake"), "already_snake");
/// ```
pub fn camel_to_snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 && !result.ends_with('_') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Sanitizes external identifiers (schema field names) to be valid Rust identifiers
///
/// Hyphens, dots and spaces become underscores and other invalid characters are
/// dropped. Keywords are written as raw identifiers (`type` → `r#type`) except
/// those rustc refuses as raw identifiers, which get a trailing underscore.
pub fn sanitize_external_identifier(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if matches!(c, '-' | '.' | ' ') { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if replaced.is_empty() {
        return replaced;
    }
    if replaced.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{}", replaced);
    }
    if is_raw_forbidden(&replaced) {
        return format!("{}_", replaced);
    }
    if is_rust_keyword(&replaced) {
        return format!("r#{}", replaced);
    }
    replaced
}

/// Member name for a schema field: snake_case, then sanitized.
pub fn field_member_name(field: &str) -> String {
    sanitize_external_identifier(&camel_to_snake_case(field.trim()))
}

/// Whether `s` is a plain identifier usable as a type reference.
pub fn is_type_reference(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && s != "_"
        && !is_rust_keyword(s)
}
