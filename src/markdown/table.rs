//! Markdown pipe-table rendering
//!
//! Converts a [`Table`] read from a report page into a GitHub Flavored
//! Markdown pipe-table. Rendering is a pure function of the table value.

use crate::string_utils::escape_table_cell;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// ─────────────────────────────────────────────────────────────────────────────
// Table Model
// ─────────────────────────────────────────────────────────────────────────────

/// Tabular data: header labels plus body rows of cell text.
///
/// Rows are not required to have as many cells as there are headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Header labels in document order
    pub headers: Vec<String>,
    /// Body rows in document order
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from headers and rows.
    pub fn new<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Number of header labels.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Whether any cell or header contains text that breaks a pipe-table row.
    pub fn needs_escaping(&self) -> bool {
        self.headers
            .iter()
            .chain(self.rows.iter().flatten())
            .any(|text| text.contains(['|', '\n']))
    }

    /// Render the table as Markdown using the given escaping mode.
    pub fn to_markdown(&self, escaping: CellEscaping) -> String {
        let mut markdown = String::new();

        push_row(&mut markdown, self.headers.iter(), escaping);
        push_separator(&mut markdown, self.headers.len());
        for row in &self.rows {
            push_row(&mut markdown, row.iter(), escaping);
        }

        markdown
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Escaping
// ─────────────────────────────────────────────────────────────────────────────

/// How cell text is written into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CellEscaping {
    /// Write cell text unchanged. A `|` or line break in a cell breaks the row.
    #[default]
    None,
    /// Escape `\` as `\\`, `|` as `\|` and line breaks as `<br>`.
    Gfm,
}

impl CellEscaping {
    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            CellEscaping::None => Cow::Borrowed(text),
            CellEscaping::Gfm => escape_table_cell(text),
        }
    }

    /// Get a display label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            CellEscaping::None => "none",
            CellEscaping::Gfm => "gfm",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Line Writers
// ─────────────────────────────────────────────────────────────────────────────

/// Append `| c1 | c2 | ... |` plus a newline.
fn push_row<'a>(
    out: &mut String,
    cells: impl Iterator<Item = &'a String>,
    escaping: CellEscaping,
) {
    let cells: Vec<Cow<'_, str>> = cells.map(|cell| escaping.apply(cell)).collect();
    out.push_str("| ");
    out.push_str(&cells.join(" | "));
    out.push_str(" |\n");
}

/// Append the dash separator, one `---` per header.
fn push_separator(out: &mut String, columns: usize) {
    out.push_str("| ");
    out.push_str(&vec!["---"; columns].join(" | "));
    out.push_str(" |\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
