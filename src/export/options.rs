//! Export Options
//!
//! Per-invocation options for the exporters, built from the saved settings
//! and then overridden by command line flags.

use crate::config::Settings;
use crate::markdown::CellEscaping;

/// Where exported text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    /// The system clipboard
    #[default]
    Clipboard,
    /// Standard output
    Stdout,
}

/// Options for table export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExportOptions {
    /// How cell text is escaped
    pub escaping: CellEscaping,
    /// Also put an HTML rendering on the clipboard
    pub rich: bool,
    /// Refuse to export a table whose rendering loses its column boundaries
    pub strict: bool,
    pub destination: Destination,
}

impl Default for TableExportOptions {
    fn default() -> Self {
        Self {
            escaping: CellEscaping::None,
            rich: false,
            strict: false,
            destination: Destination::Clipboard,
        }
    }
}

impl TableExportOptions {
    /// Options as configured in the settings file.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            escaping: settings.cell_escaping,
            rich: settings.rich_clipboard,
            strict: settings.strict_structure,
            destination: Destination::Clipboard,
        }
    }

    /// Builder method to enable GFM escaping.
    pub fn with_escaping(mut self, escaping: CellEscaping) -> Self {
        self.escaping = escaping;
        self
    }

    /// Builder method to enable the HTML alternative.
    pub fn with_rich(mut self, rich: bool) -> Self {
        self.rich = rich;
        self
    }

    /// Builder method to enable the strict structure check.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builder method to set the destination.
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }
}

/// Options for JSON payload export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonExportOptions {
    /// Id of the element holding the payload
    pub element_id: String,
    pub destination: Destination,
}

impl JsonExportOptions {
    /// Options as configured in the settings file.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            element_id: settings.json_element_id.clone(),
            destination: Destination::Clipboard,
        }
    }

    /// Builder method to read the payload from another element.
    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = element_id.into();
        self
    }

    /// Builder method to set the destination.
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }
}
