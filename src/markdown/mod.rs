//! Markdown table output
//!
//! This module turns tabular data into GitHub Flavored Markdown pipe-tables,
//! checks the rendered text for broken column boundaries, and renders tables
//! to HTML with comrak for rich clipboard content.
//!
//! # Example
//! ```ignore
//! use crate::markdown::{check_structure, CellEscaping, Table};
//!
//! let table = Table::new(["A", "B"], [["1", "2"]]);
//! let markdown = table.to_markdown(CellEscaping::None);
//! assert!(check_structure(&markdown, table.column_count()).is_empty());
//! ```

mod html;
mod lint;
mod table;

pub use html::render_table_html;
pub use lint::{check_structure, IssueKind, StructureIssue};
pub use table::{CellEscaping, Table};
