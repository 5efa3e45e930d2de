//! Conservative minifier for the generated bootstrap.
//!
//! The input is always our own template output, so a line-oriented squeeze
//! is enough: drop blank lines and whole-line comments, strip indentation.
//! A line the scanner cannot prove safe is an error, letting callers fall
//! back to the unminified source instead of serving corrupted script.

use crate::error::{CoreError, Result};

pub fn minify_script(source: &str) -> Result<String> {
    let mut kept = Vec::new();
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        if has_unterminated_string(trimmed) {
            return Err(CoreError::Minify(format!(
                "unterminated string literal in: {trimmed}"
            )));
        }
        kept.push(trimmed);
    }
    Ok(kept.join("\n"))
}

/// Scans a single line for a string literal left open at end of line.
/// Statements in the generated bootstrap never span lines, so an open
/// quote means the input is not something this minifier understands.
fn has_unterminated_string(line: &str) -> bool {
    let mut open: Option<char> = None;
    let mut escaped = false;
    for c in line.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match open {
            Some(q) => match c {
                '\\' => escaped = true,
                _ if c == q => open = None,
                _ => {}
            },
            None => {
                if c == '\'' || c == '"' {
                    open = Some(c);
                }
            }
        }
    }
    open.is_some()
}
