//! Report page discovery.
//!
//! A path given on the command line may be a single page or a directory of
//! generated reports; directories are walked recursively for `.html` files.

use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File extensions treated as report pages.
const PAGE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Collect the report pages at `path`, sorted by path.
///
/// A file is returned as-is whatever its extension. Hidden files and
/// directories (starting with `.`) are skipped when walking.
///
/// # Errors
///
/// Returns `Error::FileRead` if `path` does not exist.
pub fn find_report_pages(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(Error::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
        });
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_page(entry.path()) {
            pages.push(entry.into_path());
        }
    }

    debug!("Found {} report page(s) under {}", pages.len(), path.display());
    Ok(pages)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_page(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_ascii_lowercase();
            PAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
