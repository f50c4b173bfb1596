//! Reserved words of the Rust output language.

/// Strict and reserved Rust keywords (2021 edition).
pub const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Whether `word` is a Rust keyword.
pub fn is_rust_keyword(word: &str) -> bool { RUST_KEYWORDS.contains(&word) }

/// Keywords that cannot be written as raw identifiers (`r#self` is rejected by rustc).
pub fn is_raw_forbidden(word: &str) -> bool {
    matches!(word, "self" | "Self" | "super" | "crate")
}
