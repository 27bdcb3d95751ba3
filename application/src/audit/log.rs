//! In-memory, append-only audit log.

use crate::ports::audit_sink::AuditSink;
use armykit_domain::{AuditAction, LogEntry};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// Ordered record of every agent's Think and Dissolve actions.
///
/// Cloning yields another handle to the same log. Only this crate can
/// append; everyone else reads through [`history`](Self::history).
/// Entries are never mutated or removed, and their order is the order in
/// which agents emitted them.
#[derive(Clone, Default)]
pub struct AuditLog {
    inner: Arc<Mutex<AuditLogInner>>,
}

#[derive(Default)]
struct AuditLogInner {
    entries: Vec<LogEntry>,
    sinks: Vec<Arc<dyn AuditSink>>,
}

static GLOBAL: OnceLock<AuditLog> = OnceLock::new();

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide log used by [`run_session`](crate::run_session).
    pub fn global() -> &'static AuditLog {
        GLOBAL.get_or_init(AuditLog::new)
    }

    /// Mirror every entry appended from now on to `sink`.
    pub fn attach_sink(&self, sink: Arc<dyn AuditSink>) {
        self.lock().sinks.push(sink);
    }

    /// Append one entry and forward it to the attached sinks.
    ///
    /// Sinks are called under the same lock as the append, so they observe
    /// entries in log order.
    pub(crate) fn append(&self, entry: LogEntry) {
        let mut inner = self.lock();
        for sink in &inner.sinks {
            sink.record(&entry);
        }
        inner.entries.push(entry);
    }

    /// Snapshot of all entries in emission order.
    pub fn history(&self) -> Vec<LogEntry> {
        self.lock().entries.clone()
    }

    /// Number of entries of `action` emitted by `agent_name`.
    pub fn count(&self, agent_name: &str, action: AuditAction) -> usize {
        self.lock()
            .entries
            .iter()
            .filter(|e| e.agent_name == agent_name && e.action == action)
            .count()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, AuditLogInner> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for AuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("AuditLog")
            .field("entries", &inner.entries.len())
            .field("sinks", &inner.sinks.len())
            .finish()
    }
}
