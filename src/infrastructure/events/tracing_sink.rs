//! Tracing Audit Sink
//!
//! Forwards audit events into the structured log under the `audit` target.

use tracing::info;

use crate::domain::ports::{AuditEvent, AuditSink};

#[derive(Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) {
        info!(
            target: "audit",
            action = %event.action,
            module = event.module,
            actor = %event.actor_name,
            "{}",
            event.detail
        );
    }
}
