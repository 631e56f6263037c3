//! Advisory trace events emitted while a lookup runs.
//!
//! The lookup never reaches for a process-wide logger. Callers inject a
//! [`Diagnostics`] implementation instead; the default discards events and
//! [`TracingDiagnostics`] forwards them to `tracing`.

use std::fmt;
use std::path::Path;

/// Receiver for per-term trace events.
///
/// Two events fire for every term that resolves: [`term_received`] before
/// the search and [`file_resolved`] once a file is chosen. The messages are
/// for operators and carry no stability guarantee.
///
/// [`term_received`]: Diagnostics::term_received
/// [`file_resolved`]: Diagnostics::file_resolved
pub trait Diagnostics: fmt::Debug + Send + Sync {
    /// Called before `term` is resolved.
    fn term_received(&self, term: &str);

    /// Called after `term` resolved to `path`.
    fn file_resolved(&self, term: &str, path: &Path);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn term_received(&self, _term: &str) {}

    fn file_resolved(&self, _term: &str, _path: &Path) {}
}

/// Forwards events to `tracing`: the term at `DEBUG`, the chosen path at
/// `TRACE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn term_received(&self, term: &str) {
        tracing::debug!(term, "ini lookup term");
    }

    fn file_resolved(&self, term: &str, path: &Path) {
        tracing::trace!(term, path = %path.display(), "ini lookup using file");
    }
}
