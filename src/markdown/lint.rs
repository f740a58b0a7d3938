//! Structure check for rendered pipe-tables
//!
//! Re-reads Markdown produced by [`Table::to_markdown`](super::Table::to_markdown)
//! and reports every line whose column boundaries no longer line up with the
//! header. Unescaped `|` characters and line breaks inside cells are the
//! usual causes.

use crate::string_utils::split_row_cells;
use std::fmt;

/// What is wrong with a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The line splits into a different number of cells than the header has.
    ColumnCount { expected: usize, found: usize },
    /// The line is not a table row at all (a line break inside a cell).
    NotARow,
}

/// A problem found on one line of the rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureIssue {
    /// 1-indexed line number in the Markdown text
    pub line: usize,
    pub kind: IssueKind,
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::ColumnCount { expected, found } => write!(
                f,
                "line {}: {} cell{} where the header has {}",
                self.line,
                found,
                if *found == 1 { "" } else { "s" },
                expected
            ),
            IssueKind::NotARow => write!(f, "line {}: not a table row", self.line),
        }
    }
}

/// Check every line of a rendered table against the header's column count.
///
/// A table with no headers renders an empty `|  |` header, which counts as
/// one column.
pub fn check_structure(markdown: &str, header_count: usize) -> Vec<StructureIssue> {
    let expected = header_count.max(1);

    markdown
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line_no = idx + 1;
            if !line.trim_start().starts_with('|') {
                return Some(StructureIssue {
                    line: line_no,
                    kind: IssueKind::NotARow,
                });
            }

            let found = split_row_cells(line).len();
            (found != expected).then_some(StructureIssue {
                line: line_no,
                kind: IssueKind::ColumnCount { expected, found },
            })
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
