//! Centralized error handling for tabclip
//!
//! This module provides a unified error type that covers all error scenarios
//! in the application: reading report pages, element lookup, clipboard
//! access, and configuration.

use crate::export::ClipboardError;
use crate::markdown::StructureIssue;
use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the application.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the application.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Page Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    /// Failed to read a report page
    FileRead { path: PathBuf, source: io::Error },

    /// The page is larger than the configured limit
    PageTooLarge(usize),

    /// html5ever could not decode the page
    HtmlParse(String),

    /// No element with the given id exists in the page
    ElementNotFound { id: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Export Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// The rendered table does not keep its column boundaries
    MalformedTable {
        id: String,
        issues: Vec<StructureIssue>,
    },

    /// Clipboard access or write failure
    Clipboard(ClipboardError),

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load configuration file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save configuration file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse configuration (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<ClipboardError> for Error {
    fn from(err: ClipboardError) -> Self {
        Error::Clipboard(err)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Page Errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::FileRead { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
            Error::PageTooLarge(size) => {
                write!(f, "Page is too large to load ({} bytes)", size)
            }
            Error::HtmlParse(msg) => write!(f, "Failed to parse HTML: {}", msg),
            Error::ElementNotFound { id } => {
                write!(f, "No element with id '{}' found in the page", id)
            }

            // Export Errors
            Error::MalformedTable { id, issues } => {
                write!(
                    f,
                    "Table '{}' does not render as a well-formed Markdown table ({} issue{})",
                    id,
                    issues.len(),
                    if issues.len() == 1 { "" } else { "s" }
                )
            }
            Error::Clipboard(err) => write!(f, "{}", err),

            // Configuration Errors
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load configuration from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save configuration to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid configuration format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::FileRead { source, .. } => Some(source),
            Error::Clipboard(err) => Some(err),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::PageTooLarge(_)
            | Error::HtmlParse(_)
            | Error::ElementNotFound { .. }
            | Error::MalformedTable { .. }
            | Error::ConfigDirNotFound => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::IssueKind;

    #[test]
    fn test_io_error_creation() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test error");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_file_read_error() {
        let path = PathBuf::from("/reports/index.html");
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = Error::FileRead {
            path: path.clone(),
            source: io_err,
        };
        assert!(matches!(err, Error::FileRead { path: ref p, .. } if *p == path));
        assert!(err.to_string().contains("/reports/index.html"));
    }

    #[test]
    fn test_element_not_found_display() {
        let err = Error::ElementNotFound {
            id: "publication-table".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No element with id 'publication-table' found in the page"
        );
    }

    #[test]
    fn test_malformed_table_display_counts_issues() {
        let err = Error::MalformedTable {
            id: "book-table".to_string(),
            issues: vec![StructureIssue {
                line: 3,
                kind: IssueKind::ColumnCount {
                    expected: 2,
                    found: 3,
                },
            }],
        };
        let msg = err.to_string();
        assert!(msg.contains("book-table"));
        assert!(msg.contains("1 issue)"));
    }

    #[test]
    fn test_clipboard_error_conversion() {
        let err = Error::from(ClipboardError::Write("denied".to_string()));
        assert!(matches!(err, Error::Clipboard(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_result: std::result::Result<String, _> = serde_json::from_str("invalid json");
        let err = Error::from(json_result.unwrap_err());
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_display_config_dir_not_found() {
        let err = Error::ConfigDirNotFound;
        assert_eq!(format!("{}", err), "Configuration directory not found");
    }

    #[test]
    fn test_error_source_chains() {
        use std::error::Error as StdError;
        let err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "not found"));
        assert!(err.source().is_some());

        let err = Error::Clipboard(ClipboardError::Access("no display".to_string()));
        assert!(err.source().is_some());

        let err = Error::ElementNotFound { id: "x".into() };
        assert!(err.source().is_none());
    }

    #[test]
    fn test_unwrap_or_warn_default() {
        let ok: super::Result<i32> = Ok(42);
        assert_eq!(ok.unwrap_or_warn_default(0, "test context"), 42);

        let err: super::Result<i32> = Err(Error::ConfigDirNotFound);
        assert_eq!(err.unwrap_or_warn_default(0, "test context"), 0);
    }
}
