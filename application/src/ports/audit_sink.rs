//! Port for mirroring audit entries outside the process.
//!
//! The [`AuditLog`](crate::audit::AuditLog) keeps entries in memory; an
//! [`AuditSink`] additionally receives each entry as it is appended, e.g.
//! to write a JSONL file.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while a sink captures the product record in
//! a machine-readable format.

use armykit_domain::LogEntry;

/// Receiver of appended audit entries.
///
/// `record` is synchronous and infallible; implementations handle their
/// own I/O errors.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &LogEntry);
}
