//! # Audit Sink Port
//!
//! Where committed audit events go. The registry records exactly one event
//! per successful mutating operation, after the state commit; a sink only
//! ever appends.

use crate::events::AuditEvent;

/// Append-only consumer of committed audit events.
pub trait AuditSink: Send + Sync {
    /// Record one committed event.
    fn record(&self, event: AuditEvent);
}
