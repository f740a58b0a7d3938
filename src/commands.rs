//! Command implementations
//!
//! Each function backs one CLI command. They load the page, run the export
//! and report the outcome; errors are returned to `main` for display.

use crate::config::{get_config_file_path, save_config, Settings};
use crate::error::{Error, Result};
use crate::export::clipboard::PendingWrite;
use crate::export::{
    copy_json_to_clipboard, copy_table_to_clipboard, json_payload, render_table,
    ClipboardWriter, ConsoleNotifier, Destination, JsonExportOptions, SystemClipboard,
    TableExportOptions,
};
use crate::files::find_report_pages;
use crate::page::{list_tables, Page, TableSummary};
use log::{debug, info, warn};
use std::io::Write;
use std::path::Path;

/// `tabclip table`
pub fn run_table(
    settings: &Settings,
    file: &Path,
    table_id: &str,
    options: &TableExportOptions,
) -> Result<()> {
    let page = Page::load(file, settings.max_page_bytes)?;

    match options.destination {
        Destination::Stdout => {
            let export = render_table(&page, table_id, options)?;
            write_stdout(&export.markdown)
        }
        Destination::Clipboard => {
            let writer = system_writer(settings);
            let pending = copy_table_to_clipboard(&writer, &page, table_id, options)?;
            finish(pending, settings)
        }
    }
}

/// `tabclip json`
pub fn run_json(settings: &Settings, file: &Path, options: &JsonExportOptions) -> Result<()> {
    let page = Page::load(file, settings.max_page_bytes)?;

    match options.destination {
        Destination::Stdout => {
            let payload = json_payload(&page, &options.element_id)?;
            write_stdout(&payload)
        }
        Destination::Clipboard => {
            let writer = system_writer(settings);
            let pending = copy_json_to_clipboard(&writer, &page, &options.element_id)?;
            finish(pending, settings)
        }
    }
}

/// `tabclip list`
pub fn run_list(settings: &Settings, path: &Path) -> Result<()> {
    let pages = find_report_pages(path)?;
    if pages.is_empty() {
        info!("No report pages found under {}", path.display());
        return Ok(());
    }

    let mut listing = String::new();
    for page_path in &pages {
        let page = match Page::load(page_path, settings.max_page_bytes) {
            Ok(page) => page,
            Err(e) => {
                warn!("Skipping {}: {}", page_path.display(), e);
                continue;
            }
        };

        let tables = list_tables(&page);
        if tables.is_empty() {
            continue;
        }
        listing.push_str(&format!("{}\n", page_path.display()));
        for table in &tables {
            listing.push_str(&format_summary(table));
            listing.push('\n');
        }
    }

    write_stdout(&listing)
}

/// `tabclip config show`
pub fn run_config_show(settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    write_stdout(&format!("{}\n", json))
}

/// `tabclip config path`
pub fn run_config_path() -> Result<()> {
    let path = get_config_file_path()?;
    write_stdout(&format!("{}\n", path.display()))
}

/// `tabclip config reset`
pub fn run_config_reset() -> Result<()> {
    let path = save_config(&Settings::default())?;
    write_stdout(&format!("Default settings written to {}\n", path.display()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn system_writer(settings: &Settings) -> ClipboardWriter<SystemClipboard> {
    ClipboardWriter::new(SystemClipboard::new(settings.linger()))
}

/// Wait for the pending write and run its continuation.
fn finish(mut pending: PendingWrite, settings: &Settings) -> Result<()> {
    let outcome = match pending.poll() {
        Some(outcome) => outcome,
        None => {
            debug!("Waiting for {} clipboard write", pending.kind().label());
            pending.wait()
        }
    };
    let mut notifier = ConsoleNotifier::stdio(settings.show_acknowledgment);
    outcome.notify(&mut notifier);
    outcome.into_result().map(|_| ()).map_err(Error::from)
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// One line of `tabclip list` output.
fn format_summary(table: &TableSummary) -> String {
    let id = table.id.as_deref().unwrap_or("(no id)");
    let headers = if table.headers.is_empty() {
        "(no header)".to_string()
    } else {
        table.headers.join(" | ")
    };
    format!(
        "  {}  {} row{}  [{}]",
        id,
        table.row_count,
        if table.row_count == 1 { "" } else { "s" },
        headers
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_summary() {
        let summary = TableSummary {
            id: Some("publication-table".to_string()),
            headers: vec!["Publication".to_string(), "Count".to_string()],
            row_count: 1,
        };
        assert_eq!(
            format_summary(&summary),
            "  publication-table  1 row  [Publication | Count]"
        );
    }

    #[test]
    fn test_format_summary_without_id_or_header() {
        let summary = TableSummary {
            id: None,
            headers: Vec::new(),
            row_count: 3,
        };
        assert_eq!(format_summary(&summary), "  (no id)  3 rows  [(no header)]");
    }

    #[test]
    fn test_run_table_missing_file() {
        let result = run_table(
            &Settings::default(),
            Path::new("/nonexistent/report.html"),
            "t",
            &TableExportOptions::default(),
        );
        assert!(matches!(result, Err(Error::FileRead { .. })));
    }
}
