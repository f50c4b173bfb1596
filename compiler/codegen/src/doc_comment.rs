//! Doc comment rendering for generated items.

use std::fmt::Write;

/// Collapse `text` onto one line for use inside a single `///` line.
///
/// Runs of whitespace and control characters become one space.
pub fn single_line(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write `text` as `///` lines at `indent`; blank input writes nothing.
pub fn write_doc_lines(out: &mut String, text: &str, indent: &str) -> std::fmt::Result {
    for line in text.trim().lines() {
        // a stray `\r` is not allowed inside a doc comment
        let line: String = line.chars().map(|c| if c.is_control() { ' ' } else { c }).collect();
        let line = line.trim_end();
        if line.is_empty() {
            writeln!(out, "{indent}///")?;
        } else {
            writeln!(out, "{indent}/// {line}")?;
        }
    }
    Ok(())
}
