//! Text Normalization Utilities
//!
//! Helpers shared by the page reader and the Markdown writer:
//!
//! - whitespace collapsing the way a browser renders text (`innerText`)
//! - escaping of cell text for GitHub Flavored Markdown tables
//! - splitting a pipe-table line back into its cells
//!
//! # Example
//! ```ignore
//! use crate::string_utils::{collapse_whitespace, split_row_cells};
//!
//! assert_eq!(collapse_whitespace("  a \n\t b "), " a b ");
//! assert_eq!(split_row_cells("| a | b |"), vec!["a", "b"]);
//! ```

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Whitespace
// ─────────────────────────────────────────────────────────────────────────────

/// ASCII whitespace as defined by the HTML standard (space, tab, LF, FF, CR).
fn html_whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\n\x0C\r]+").expect("static regex is valid"))
}

/// Replace every run of HTML whitespace with a single space.
///
/// Leading and trailing whitespace is collapsed but not removed; callers
/// trim once they know where the text ends.
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    html_whitespace().replace_all(text, " ")
}

/// Collapse whitespace and trim both ends.
pub fn normalize_text(text: &str) -> String {
    collapse_whitespace(text).trim().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Cell Escaping
// ─────────────────────────────────────────────────────────────────────────────

/// Escape cell text so it stays inside one GFM table cell.
///
/// `\` becomes `\\`, `|` becomes `\|` and line breaks become `<br>`. Text
/// that needs no escaping is returned borrowed.
pub fn escape_table_cell(text: &str) -> Cow<'_, str> {
    if !text.contains(['|', '\n', '\\']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '|' => escaped.push_str("\\|"),
            '\n' => escaped.push_str("<br>"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Escape text so Markdown renders it literally inside a table cell.
///
/// Every ASCII punctuation character gets a backslash, so no emphasis,
/// link, entity or inline HTML can form. Line breaks become `<br>`, the
/// only raw HTML left in the output.
pub fn escape_literal_cell(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        if ch == '\n' {
            escaped.push_str("<br>");
        } else if ch.is_ascii_punctuation() {
            escaped.push('\\');
            escaped.push(ch);
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

// ─────────────────────────────────────────────────────────────────────────────
// Row Splitting
// ─────────────────────────────────────────────────────────────────────────────

/// Split a pipe-table line into trimmed cell texts.
///
/// The leading and trailing pipes are optional. A pipe preceded by a
/// backslash is part of the cell, not a boundary. `"|  |"` yields a single
/// empty cell.
pub fn split_row_cells(line: &str) -> Vec<&str> {
    let line = line.trim();
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = if inner.ends_with('|') && !inner.ends_with("\\|") {
        &inner[..inner.len() - 1]
    } else {
        inner
    };

    let mut cells = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (idx, ch) in inner.char_indices() {
        match ch {
            '\\' => escaped = !escaped,
            '|' if !escaped => {
                cells.push(inner[start..idx].trim());
                start = idx + 1;
            }
            _ => escaped = false,
        }
    }
    cells.push(inner[start..].trim());
    cells
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace_runs() {
        assert_eq!(collapse_whitespace("a  \n\t b"), "a b");
        assert_eq!(collapse_whitespace("\n  a\n"), " a ");
    }

    #[test]
    fn test_collapse_keeps_non_breaking_space() {
        assert_eq!(collapse_whitespace("a\u{a0}\u{a0}b"), "a\u{a0}\u{a0}b");
    }

    #[test]
    fn test_normalize_text_trims() {
        assert_eq!(normalize_text("   Book   Name  "), "Book Name");
        assert_eq!(normalize_text(" \n "), "");
    }

    #[test]
    fn test_escape_table_cell_borrowed_when_clean() {
        assert!(matches!(escape_table_cell("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_table_cell_pipes_and_breaks() {
        assert_eq!(escape_table_cell("a|b"), "a\\|b");
        assert_eq!(escape_table_cell("line1\nline2"), "line1<br>line2");
    }

    #[test]
    fn test_escape_table_cell_backslash_before_pipe() {
        let escaped = escape_table_cell("C:\\|x");
        assert_eq!(escaped, "C:\\\\\\|x");
        assert_eq!(split_row_cells(&format!("| {} | 1 |", escaped)).len(), 2);
    }

    #[test]
    fn test_escape_literal_cell() {
        assert_eq!(escape_literal_cell("<b>*x*</b>"), "\\<b\\>\\*x\\*\\<\\/b\\>");
        assert_eq!(escape_literal_cell("a\nb"), "a<br>b");
        assert_eq!(escape_literal_cell("plain text"), "plain text");
    }

    #[test]
    fn test_split_row_cells_basic() {
        assert_eq!(split_row_cells("| A | B |"), vec!["A", "B"]);
        assert_eq!(split_row_cells("| --- | --- | --- |").len(), 3);
    }

    #[test]
    fn test_split_row_cells_empty_row() {
        assert_eq!(split_row_cells("|  |"), vec![""]);
    }

    #[test]
    fn test_split_row_cells_unescaped_pipe_splits() {
        assert_eq!(split_row_cells("| 1 | a|b |"), vec!["1", "a", "b"]);
    }

    #[test]
    fn test_split_row_cells_escaped_pipe_stays() {
        assert_eq!(split_row_cells("| 1 | a\\|b |"), vec!["1", "a\\|b"]);
        assert_eq!(split_row_cells("| x \\|"), vec!["x \\|"]);
    }

    #[test]
    fn test_split_row_cells_without_outer_pipes() {
        assert_eq!(split_row_cells("a | b"), vec!["a", "b"]);
    }
}
