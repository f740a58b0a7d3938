//! File operations module for tabclip
//!
//! This module finds report pages on disk.

pub mod discovery;

pub use discovery::find_report_pages;
