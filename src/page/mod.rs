//! Report page access
//!
//! Report pages are parsed once with html5ever; the exporters then read
//! tables and payload values out of the resulting DOM without modifying it.

mod dom;
mod table;

pub use dom::{Page, DEFAULT_MAX_PAGE_BYTES};
pub use table::{extract_table, list_tables, TableSummary};
