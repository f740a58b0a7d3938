//! Clipboard Export Module for tabclip
//!
//! This module copies report page content to the system clipboard.
//!
//! # Supported Exports
//!
//! - **Table as Markdown**: a page table converted to a pipe-table
//! - **JSON payload**: the page's pre-rendered JSON, copied verbatim
//!
//! # Architecture
//!
//! - `actions.rs` - The copy entry points
//! - `clipboard.rs` - Asynchronous clipboard writes and backends
//! - `notify.rs` - Acknowledgment and failure reporting
//! - `options.rs` - Export configuration and options

pub mod actions;
pub mod clipboard;
pub mod notify;
pub mod options;

pub use actions::{copy_json_to_clipboard, copy_table_to_clipboard, json_payload, render_table};
pub use clipboard::{ClipboardError, ClipboardWriter, SystemClipboard};
pub use notify::ConsoleNotifier;
pub use options::{Destination, JsonExportOptions, TableExportOptions};
