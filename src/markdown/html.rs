//! HTML rendering of exported tables
//!
//! Used for the rich clipboard mode: the Markdown text goes on the clipboard
//! as plain text and a comrak rendering of the same table as the HTML
//! alternative, so word processors and mail clients paste a real table.

use super::table::Table;
use crate::string_utils::escape_literal_cell;
use comrak::{markdown_to_html, Options};

/// Render a table to an HTML fragment (no doctype, head, etc.).
///
/// Cell text is page text, not markup: it is escaped so it renders
/// literally. Line breaks inside a cell become `<br>`.
pub fn render_table_html(table: &Table) -> String {
    markdown_to_html(&literal_markdown(table), &fragment_options())
}

/// A pipe-table whose cells only contain literal text.
///
/// A table without headers gets one empty header cell so comrak still sees
/// a delimiter row.
fn literal_markdown(table: &Table) -> String {
    let columns = table.column_count().max(1);
    let mut markdown = String::new();

    let mut headers: Vec<String> = table.headers.iter().map(|h| escape_literal_cell(h)).collect();
    headers.resize(columns, String::new());
    push_line(&mut markdown, &headers);
    push_line(&mut markdown, &vec!["---".to_string(); columns]);

    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|c| escape_literal_cell(c)).collect();
        push_line(&mut markdown, &cells);
    }

    markdown
}

fn push_line(out: &mut String, cells: &[String]) {
    out.push_str("| ");
    out.push_str(&cells.join(" | "));
    out.push_str(" |\n");
}

fn fragment_options() -> Options {
    let mut options = Options::default();

    options.extension.table = true;
    options.extension.tagfilter = true;

    // The only raw HTML in the input is the <br> written for line breaks
    options.render.unsafe_ = true;

    options
}
