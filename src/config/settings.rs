//! User settings and preferences for tabclip
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use crate::markdown::CellEscaping;
use crate::page::DEFAULT_MAX_PAGE_BYTES;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Id of the element that report pages put their JSON export in.
pub const DEFAULT_JSON_ELEMENT_ID: &str = "json-export";

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Table Export
    // ─────────────────────────────────────────────────────────────────────────
    /// How cell text is escaped in Markdown tables
    pub cell_escaping: CellEscaping,

    /// Whether to also place an HTML rendering on the clipboard
    pub rich_clipboard: bool,

    /// Whether to refuse tables whose Markdown loses column alignment
    pub strict_structure: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // JSON Export
    // ─────────────────────────────────────────────────────────────────────────
    /// Id of the element holding the JSON payload
    pub json_element_id: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Clipboard & Feedback
    // ─────────────────────────────────────────────────────────────────────────
    /// Whether to print an acknowledgment after a successful copy
    pub show_acknowledgment: bool,

    /// How long (ms) to keep clipboard ownership on Linux after writing
    pub linger_ms: u64,

    // ─────────────────────────────────────────────────────────────────────────
    // Page Loading
    // ─────────────────────────────────────────────────────────────────────────
    /// Largest report page accepted, in bytes
    pub max_page_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Table Export
            cell_escaping: CellEscaping::None,
            rich_clipboard: false,
            strict_structure: false,

            // JSON Export
            json_element_id: DEFAULT_JSON_ELEMENT_ID.to_string(),

            // Clipboard & Feedback
            show_acknowledgment: true,
            linger_ms: 250,

            // Page Loading
            max_page_bytes: DEFAULT_MAX_PAGE_BYTES,
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Maximum clipboard linger time.
    pub const MAX_LINGER_MS: u64 = 5_000;
    /// Minimum accepted page size limit.
    pub const MIN_PAGE_BYTES: usize = 1024;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.linger_ms = self.linger_ms.min(Self::MAX_LINGER_MS);
        self.max_page_bytes = self.max_page_bytes.max(Self::MIN_PAGE_BYTES);

        // An empty id can never match an element
        if self.json_element_id.trim().is_empty() {
            self.json_element_id = DEFAULT_JSON_ELEMENT_ID.to_string();
        }
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Clipboard linger time as a `Duration`.
    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.linger_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.cell_escaping, CellEscaping::None);
        assert_eq!(settings.json_element_id, "json-export");
        assert!(settings.show_acknowledgment);
        assert!(!settings.strict_structure);
        assert_eq!(settings.linger(), Duration::from_millis(250));
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let settings = Settings {
            cell_escaping: CellEscaping::Gfm,
            rich_clipboard: true,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"cell_escaping\":\"gfm\""));
        let loaded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"strict_structure": true}"#).unwrap();
        assert!(settings.strict_structure);
        assert_eq!(settings.json_element_id, DEFAULT_JSON_ELEMENT_ID);
        assert_eq!(settings.max_page_bytes, DEFAULT_MAX_PAGE_BYTES);
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let result: Result<Settings, _> =
            serde_json::from_str(r#"{"theme": "dark", "rich_clipboard": true}"#);
        assert!(result.unwrap().rich_clipboard);
    }

    #[test]
    fn test_wrong_type_is_error() {
        let result: Result<Settings, _> = serde_json::from_str(r#"{"linger_ms": "long"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitize_clamps_values() {
        let settings = Settings::from_json_sanitized(
            r#"{"linger_ms": 60000, "max_page_bytes": 10, "json_element_id": "  "}"#,
        )
        .unwrap();
        assert_eq!(settings.linger_ms, Settings::MAX_LINGER_MS);
        assert_eq!(settings.max_page_bytes, Settings::MIN_PAGE_BYTES);
        assert_eq!(settings.json_element_id, DEFAULT_JSON_ELEMENT_ID);
    }
}
