//! User notification channel
//!
//! Completed clipboard writes are reported through a [`Notifier`]: an
//! acknowledgment on success, an error message on failure.

use super::clipboard::{ClipboardError, CopyKind};
use log::debug;
use std::io::Write;

/// Receives the continuations of a clipboard write.
pub trait Notifier {
    /// The write succeeded.
    fn acknowledge(&mut self, kind: CopyKind);

    /// The write failed.
    fn report_failure(&mut self, kind: CopyKind, err: &ClipboardError);
}

/// The failure message shown for a failed write.
pub fn failure_message(kind: CopyKind, err: &ClipboardError) -> String {
    format!("Failed to copy {} to clipboard: {}", kind.label(), err)
}

/// Writes acknowledgments to one stream and failures to another.
///
/// The CLI uses stdout and stderr.
pub struct ConsoleNotifier<O: Write, E: Write> {
    out: O,
    err: E,
    show_acknowledgment: bool,
}

impl ConsoleNotifier<std::io::Stdout, std::io::Stderr> {
    /// Notifier on the process's stdout and stderr.
    pub fn stdio(show_acknowledgment: bool) -> Self {
        Self::new(std::io::stdout(), std::io::stderr(), show_acknowledgment)
    }
}

impl<O: Write, E: Write> ConsoleNotifier<O, E> {
    pub fn new(out: O, err: E, show_acknowledgment: bool) -> Self {
        Self {
            out,
            err,
            show_acknowledgment,
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Notifier for ConsoleNotifier<O, E> {
    fn acknowledge(&mut self, kind: CopyKind) {
        debug!("Clipboard write of {} succeeded", kind.label());
        if self.show_acknowledgment {
            let _ = writeln!(self.out, "{}", kind.acknowledgment());
        }
    }

    fn report_failure(&mut self, kind: CopyKind, err: &ClipboardError) {
        debug!("Clipboard write of {} failed: {:?}", kind.label(), err);
        let _ = writeln!(self.err, "{}", failure_message(kind, err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::clipboard::CopyOutcome;

    fn notifier(show: bool) -> ConsoleNotifier<Vec<u8>, Vec<u8>> {
        ConsoleNotifier::new(Vec::new(), Vec::new(), show)
    }

    #[test]
    fn test_success_prints_acknowledgment() {
        let mut n = notifier(true);
        CopyOutcome {
            kind: CopyKind::Table,
            result: Ok(()),
        }
        .notify(&mut n);

        let (out, err) = n.into_parts();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Table copied to clipboard as Markdown!\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_acknowledgment_can_be_silenced() {
        let mut n = notifier(false);
        n.acknowledge(CopyKind::Json);
        let (out, _) = n.into_parts();
        assert!(out.is_empty());
    }

    #[test]
    fn test_failure_goes_to_error_stream() {
        let mut n = notifier(false);
        CopyOutcome {
            kind: CopyKind::Json,
            result: Err(ClipboardError::Access("no display".to_string())),
        }
        .notify(&mut n);

        let (out, err) = n.into_parts();
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("Failed to copy JSON to clipboard:"));
        assert!(err.contains("no display"));
        assert_eq!(err.lines().count(), 1);
    }
}
