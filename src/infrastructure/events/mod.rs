//! Audit Sink Implementations
//!
//! Concrete implementations of AuditSink:
//! - JsonAuditSink: NDJSON output for downstream audit trails
//! - TracingAuditSink: audit lines in the diagnostic log

mod json;
mod tracing_sink;

pub use json::JsonAuditSink;
pub use tracing_sink::TracingAuditSink;
