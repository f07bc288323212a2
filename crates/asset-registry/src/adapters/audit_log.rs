//! In-memory append-only audit log.

use crate::events::{AuditEvent, AuditEventKind};
use crate::ports::audit::AuditSink;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// One committed entry of the audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Commit position, starting at 0.
    pub sequence: u64,
    /// The recorded event.
    pub event: AuditEvent,
}

/// Append-only in-memory audit trail.
///
/// External observers (matching and settlement processes) read it back by
/// operation kind. Appends recover from a poisoned lock rather than drop a
/// committed event: the log is the record of what already happened.
pub struct InMemoryAuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl InMemoryAuditLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Create an empty log wrapped in `Arc` for shared ownership.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// All entries in commit order.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.read(|entries| entries.to_vec())
    }

    /// All events in commit order.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.read(|entries| entries.iter().map(|entry| entry.event.clone()).collect())
    }

    /// Events of one operation kind, in commit order.
    pub fn of_kind(&self, kind: AuditEventKind) -> Vec<AuditEvent> {
        self.read(|entries| {
            entries
                .iter()
                .filter(|entry| entry.event.kind() == kind)
                .map(|entry| entry.event.clone())
                .collect()
        })
    }

    /// The most recently committed event.
    pub fn latest(&self) -> Option<AuditEvent> {
        self.read(|entries| entries.last().map(|entry| entry.event.clone()))
    }

    /// Number of committed entries.
    pub fn len(&self) -> usize {
        self.read(|entries| entries.len())
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read<T>(&self, f: impl FnOnce(&[AuditEntry]) -> T) -> T {
        match self.entries.read() {
            Ok(entries) => f(&entries),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}

impl Default for InMemoryAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditSink for InMemoryAuditLog {
    fn record(&self, event: AuditEvent) {
        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        let sequence = entries.len() as u64;
        entries.push(AuditEntry { sequence, event });
    }
}
