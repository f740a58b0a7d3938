//! Asynchronous clipboard writes
//!
//! A write is handed to a worker thread and returns immediately with a
//! [`PendingWrite`]. The worker reports exactly once over a channel; the
//! caller polls or waits for the [`CopyOutcome`] and runs the success or
//! failure continuation from it.
//!
//! The platform clipboard sits behind [`ClipboardBackend`]; the system
//! implementation uses the arboard crate.

use super::notify::Notifier;
use arboard::Clipboard;
use log::{debug, warn};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// Failed to access clipboard
    Access(String),
    /// Failed to set clipboard content
    Write(String),
    /// The worker thread went away without reporting
    Disconnected,
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Access(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::Write(msg) => write!(f, "Clipboard write error: {}", msg),
            ClipboardError::Disconnected => {
                write!(f, "Clipboard write ended without reporting a result")
            }
        }
    }
}

impl std::error::Error for ClipboardError {}

// ─────────────────────────────────────────────────────────────────────────────
// Content and Kind
// ─────────────────────────────────────────────────────────────────────────────

/// What was copied; selects the acknowledgment shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    /// A table converted to Markdown
    Table,
    /// A JSON payload copied verbatim
    Json,
}

impl CopyKind {
    /// The acknowledgment shown after a successful copy.
    pub fn acknowledgment(&self) -> &'static str {
        match self {
            CopyKind::Table => "Table copied to clipboard as Markdown!",
            CopyKind::Json => "JSON copied to clipboard!",
        }
    }

    /// Short noun used in failure messages.
    pub fn label(&self) -> &'static str {
        match self {
            CopyKind::Table => "table",
            CopyKind::Json => "JSON",
        }
    }
}

/// Text for the clipboard, with an optional HTML alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardContent {
    pub text: String,
    pub html: Option<String>,
}

impl ClipboardContent {
    /// Plain text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: None,
        }
    }

    /// Plain text plus an HTML rendering of it.
    pub fn with_html(text: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: Some(html.into()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backends
// ─────────────────────────────────────────────────────────────────────────────

/// A place clipboard content can be written to.
///
/// Backends are cloned into the worker thread of each write, so two writes
/// never share a backend value.
pub trait ClipboardBackend: Clone + Send + 'static {
    /// Replace the clipboard content with plain text.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Replace the clipboard content with HTML plus a plain text fallback.
    ///
    /// Backends without HTML support store the fallback only.
    fn set_html(&mut self, _html: &str, fallback: &str) -> Result<(), ClipboardError> {
        self.set_text(fallback)
    }
}

/// The platform clipboard, via arboard.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    /// How long to keep clipboard ownership on Linux before returning
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    linger: Duration,
}

impl SystemClipboard {
    pub fn new(linger: Duration) -> Self {
        Self { linger }
    }

    fn open() -> Result<Clipboard, ClipboardError> {
        Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = Self::open()?;

        // X11 and Wayland serve clipboard content from the owning process;
        // wait_until gives clipboard managers time to take it over before
        // this process exits.
        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;
            use std::time::Instant;

            clipboard
                .set()
                .wait_until(Instant::now() + self.linger)
                .text(text.to_owned())
                .map_err(|e| ClipboardError::Write(e.to_string()))
        }

        #[cfg(not(target_os = "linux"))]
        {
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::Write(e.to_string()))
        }
    }

    fn set_html(&mut self, html: &str, fallback: &str) -> Result<(), ClipboardError> {
        let mut clipboard = Self::open()?;

        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;
            use std::time::Instant;

            clipboard
                .set()
                .wait_until(Instant::now() + self.linger)
                .html(html.to_owned(), Some(fallback.to_owned()))
                .map_err(|e| ClipboardError::Write(e.to_string()))
        }

        #[cfg(not(target_os = "linux"))]
        {
            clipboard
                .set_html(html, Some(fallback))
                .map_err(|e| ClipboardError::Write(e.to_string()))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// The single result of a clipboard write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    pub kind: CopyKind,
    pub result: Result<(), ClipboardError>,
}

impl CopyOutcome {
    /// Run the matching continuation: acknowledgment on success, error
    /// report on failure.
    pub fn notify(&self, notifier: &mut dyn Notifier) {
        match &self.result {
            Ok(()) => notifier.acknowledge(self.kind),
            Err(err) => notifier.report_failure(self.kind, err),
        }
    }

    pub fn into_result(self) -> Result<CopyKind, ClipboardError> {
        self.result.map(|()| self.kind)
    }
}

/// A clipboard write that has been started but may not have finished.
pub struct PendingWrite {
    kind: CopyKind,
    receiver: Receiver<Result<(), ClipboardError>>,
    delivered: bool,
}

impl PendingWrite {
    pub fn kind(&self) -> CopyKind {
        self.kind
    }

    /// Check for completion without blocking.
    ///
    /// Returns the outcome once; later calls return `None`.
    pub fn poll(&mut self) -> Option<CopyOutcome> {
        if self.delivered {
            return None;
        }

        let result = match self.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(ClipboardError::Disconnected),
        };

        self.delivered = true;
        Some(CopyOutcome {
            kind: self.kind,
            result,
        })
    }

    /// Block until the write completes.
    pub fn wait(self) -> CopyOutcome {
        let result = self
            .receiver
            .recv()
            .unwrap_or(Err(ClipboardError::Disconnected));

        CopyOutcome {
            kind: self.kind,
            result,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Writer
// ─────────────────────────────────────────────────────────────────────────────

/// Starts clipboard writes on a backend.
#[derive(Debug, Clone)]
pub struct ClipboardWriter<B: ClipboardBackend> {
    backend: B,
}

impl<B: ClipboardBackend> ClipboardWriter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Start writing `content` to the clipboard.
    ///
    /// Returns immediately; the write itself runs on a worker thread.
    pub fn write(&self, content: ClipboardContent, kind: CopyKind) -> PendingWrite {
        let (tx, rx) = channel();
        let mut backend = self.backend.clone();

        debug!(
            "Starting clipboard write of {} ({} bytes)",
            kind.label(),
            content.text.len()
        );

        let spawned = thread::Builder::new()
            .name("clipboard-write".to_string())
            .spawn(move || {
                let result = match &content.html {
                    Some(html) => backend.set_html(html, &content.text),
                    None => backend.set_text(&content.text),
                };
                // The receiver may already be gone if the caller gave up
                let _ = tx.send(result);
            });

        if let Err(e) = spawned {
            // The closure (and its sender) is dropped, so the pending write
            // resolves to Disconnected
            warn!("Failed to start clipboard worker: {}", e);
        }

        PendingWrite {
            kind,
            receiver: rx,
            delivered: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
