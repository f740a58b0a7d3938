//! Copy actions
//!
//! The two entry points behind the report pages' copy buttons. Each reads
//! its source from the page, builds the text, and starts a clipboard write.
//! The text-building halves are separate so they can feed other
//! destinations (stdout) too.

use super::clipboard::{ClipboardBackend, ClipboardContent, ClipboardWriter, CopyKind, PendingWrite};
use super::options::TableExportOptions;
use crate::error::{Error, Result};
use crate::markdown::{check_structure, render_table_html, StructureIssue, Table};
use crate::page::{extract_table, Page};
use log::{debug, warn};

/// A table rendered as Markdown, with any structure problems found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExport {
    pub table: Table,
    pub markdown: String,
    pub issues: Vec<StructureIssue>,
}

/// Read the table `id` from the page and render it as Markdown.
///
/// Structure problems are logged as warnings, or returned as
/// `Error::MalformedTable` when `options.strict` is set.
pub fn render_table(page: &Page, id: &str, options: &TableExportOptions) -> Result<TableExport> {
    let table = extract_table(page, id)?;
    debug!(
        "Rendering table '{}' with {} cell escaping",
        id,
        options.escaping.label()
    );
    let markdown = table.to_markdown(options.escaping);
    let issues = check_structure(&markdown, table.column_count());

    if !issues.is_empty() {
        if options.strict {
            return Err(Error::MalformedTable {
                id: id.to_string(),
                issues,
            });
        }
        for issue in &issues {
            warn!("Table '{}': {}", id, issue);
        }
        if table.needs_escaping() {
            warn!("Cell text contains '|' or line breaks; use --escape to keep columns aligned");
        }
    }

    Ok(TableExport {
        table,
        markdown,
        issues,
    })
}

/// Read the JSON payload from the element `element_id`, unchanged.
pub fn json_payload(page: &Page, element_id: &str) -> Result<String> {
    let element = page
        .element_by_id(element_id)
        .ok_or_else(|| Error::ElementNotFound {
            id: element_id.to_string(),
        })?;

    let payload = element.value();
    debug!(
        "Read {} bytes of payload from <{} id=\"{}\">",
        payload.len(),
        element.tag(),
        element_id
    );
    Ok(payload)
}

/// Convert the table `id` to Markdown and start copying it.
pub fn copy_table_to_clipboard<B: ClipboardBackend>(
    writer: &ClipboardWriter<B>,
    page: &Page,
    id: &str,
    options: &TableExportOptions,
) -> Result<PendingWrite> {
    let export = render_table(page, id, options)?;

    let content = if options.rich {
        let html = render_table_html(&export.table);
        ClipboardContent::with_html(export.markdown, html)
    } else {
        ClipboardContent::text(export.markdown)
    };

    Ok(writer.write(content, CopyKind::Table))
}

/// Start copying the JSON payload held by `element_id`.
pub fn copy_json_to_clipboard<B: ClipboardBackend>(
    writer: &ClipboardWriter<B>,
    page: &Page,
    element_id: &str,
) -> Result<PendingWrite> {
    let payload = json_payload(page, element_id)?;
    Ok(writer.write(ClipboardContent::text(payload), CopyKind::Json))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::clipboard::tests::MemoryClipboard;
    use crate::export::clipboard::ClipboardError;
    use crate::markdown::{CellEscaping, IssueKind};

    const REPORT: &str = r#"<!DOCTYPE html>
<html><body>
<h1>Content Quality</h1>
<table id="book-table">
  <thead><tr><th>Book Name</th><th>Empty</th></tr></thead>
  <tbody>
    <tr><td>Volume 1</td><td>4</td></tr>
    <tr><td>Volume 2 | Addenda</td><td>0</td></tr>
  </tbody>
</table>
<textarea id="json-export">{"a":1}</textarea>
</body></html>"#;

    fn page() -> Page {
        Page::parse(REPORT).unwrap()
    }

    #[test]
    fn test_copy_table_writes_markdown() {
        let backend = MemoryClipboard::default();
        let writer = ClipboardWriter::new(backend.clone());
        let options = TableExportOptions::default().with_escaping(CellEscaping::Gfm);

        let outcome = copy_table_to_clipboard(&writer, &page(), "book-table", &options)
            .unwrap()
            .wait();

        assert!(outcome.result.is_ok());
        assert_eq!(
            backend.last_text().unwrap(),
            "| Book Name | Empty |\n| --- | --- |\n| Volume 1 | 4 |\n| Volume 2 \\| Addenda | 0 |\n"
        );
    }

    #[test]
    fn test_unescaped_pipe_is_copied_with_issue() {
        let export = render_table(&page(), "book-table", &TableExportOptions::default()).unwrap();
        assert!(export.markdown.contains("| Volume 2 | Addenda | 0 |"));
        assert_eq!(
            export.issues[0].kind,
            IssueKind::ColumnCount {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_strict_mode_refuses_malformed_table() {
        let backend = MemoryClipboard::default();
        let writer = ClipboardWriter::new(backend.clone());
        let options = TableExportOptions::default().with_strict(true);

        let result = copy_table_to_clipboard(&writer, &page(), "book-table", &options);

        assert!(matches!(result, Err(Error::MalformedTable { ref id, .. }) if id == "book-table"));
        assert!(backend.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_rich_copy_includes_html() {
        let backend = MemoryClipboard::default();
        let writer = ClipboardWriter::new(backend.clone());
        let options = TableExportOptions::default()
            .with_escaping(CellEscaping::Gfm)
            .with_rich(true);

        copy_table_to_clipboard(&writer, &page(), "book-table", &options)
            .unwrap()
            .wait();

        let writes = backend.writes.lock().unwrap();
        let html = writes[0].html.as_deref().unwrap();
        assert!(html.contains("<th>Book Name</th>"));
        assert!(writes[0].text.starts_with("| Book Name |"));
    }

    #[test]
    fn test_rich_copy_keeps_cell_markup_as_text() {
        let page = Page::parse(
            "<table id='t'><thead><tr><th>Title</th></tr></thead>\
             <tbody><tr><td>&lt;img src=x onerror=alert(1)&gt;</td></tr></tbody></table>",
        )
        .unwrap();
        let backend = MemoryClipboard::default();
        let writer = ClipboardWriter::new(backend.clone());
        let options = TableExportOptions::default()
            .with_escaping(CellEscaping::Gfm)
            .with_rich(true);

        copy_table_to_clipboard(&writer, &page, "t", &options)
            .unwrap()
            .wait();

        let writes = backend.writes.lock().unwrap();
        let html = writes[0].html.as_deref().unwrap();
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert_eq!(
            writes[0].text,
            "| Title |\n| --- |\n| <img src=x onerror=alert(1)> |\n"
        );
    }

    #[test]
    fn test_missing_table_fails_before_writing() {
        let backend = MemoryClipboard::default();
        let writer = ClipboardWriter::new(backend.clone());

        let result = copy_table_to_clipboard(
            &writer,
            &page(),
            "citation-table",
            &TableExportOptions::default(),
        );

        assert!(matches!(result, Err(Error::ElementNotFound { .. })));
        assert!(backend.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_copy_json_is_verbatim() {
        let backend = MemoryClipboard::default();
        let writer = ClipboardWriter::new(backend.clone());

        let outcome = copy_json_to_clipboard(&writer, &page(), "json-export")
            .unwrap()
            .wait();

        assert_eq!(outcome.into_result(), Ok(CopyKind::Json));
        assert_eq!(backend.last_text().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_malformed_json_is_not_an_error() {
        let page = Page::parse(r#"<textarea id="json-export">{"a":</textarea>"#).unwrap();
        assert_eq!(json_payload(&page, "json-export").unwrap(), r#"{"a":"#);
    }

    #[test]
    fn test_missing_json_element() {
        let page = Page::parse("<p>no payload here</p>").unwrap();
        let result = json_payload(&page, "json-export");
        assert!(matches!(result, Err(Error::ElementNotFound { id }) if id == "json-export"));
    }

    #[test]
    fn test_clipboard_failure_surfaces_as_outcome() {
        let writer = ClipboardWriter::new(MemoryClipboard::failing(ClipboardError::Write(
            "not allowed".to_string(),
        )));

        let outcome = copy_json_to_clipboard(&writer, &page(), "json-export")
            .unwrap()
            .wait();

        assert!(outcome.result.is_err());
        assert_eq!(outcome.kind, CopyKind::Json);
    }
}
