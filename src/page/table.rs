//! Table extraction from report pages
//!
//! Header labels come from the `th` cells inside `thead`, body rows from
//! the `tr` elements inside `tbody`, and row cells from their `td` cells.

use super::dom::{Element, Page};
use crate::error::{Error, Result};
use crate::markdown::Table;
use log::debug;

/// Read the table-like structure identified by `id`.
///
/// # Errors
///
/// Returns `Error::ElementNotFound` if no element has that id.
pub fn extract_table(page: &Page, id: &str) -> Result<Table> {
    let element = page
        .element_by_id(id)
        .ok_or_else(|| Error::ElementNotFound { id: id.to_string() })?;

    let table = table_from_element(&element);
    debug!(
        "Read table '{}': {} header(s), {} row(s)",
        id,
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}

fn table_from_element(element: &Element) -> Table {
    let headers: Vec<String> = element
        .select("thead", "th")
        .iter()
        .map(Element::inner_text)
        .collect();

    let rows: Vec<Vec<String>> = element
        .select("tbody", "tr")
        .iter()
        .map(|row| {
            row.descendants("td")
                .iter()
                .map(Element::inner_text)
                .collect::<Vec<_>>()
        })
        .collect();

    Table::new(headers, rows)
}

// ─────────────────────────────────────────────────────────────────────────────
// Table Discovery
// ─────────────────────────────────────────────────────────────────────────────

/// A short description of one `<table>` in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    /// The table's `id` attribute, if any
    pub id: Option<String>,
    pub headers: Vec<String>,
    /// Number of body rows
    pub row_count: usize,
}

/// Summarize every `<table>` element in the page, in document order.
pub fn list_tables(page: &Page) -> Vec<TableSummary> {
    page.elements_by_tag("table")
        .iter()
        .map(|element| {
            let table = table_from_element(element);
            TableSummary {
                id: element.id(),
                headers: table.headers,
                row_count: table.rows.len(),
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
