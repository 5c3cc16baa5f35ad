//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod audit_sink;
pub mod clock;
pub mod sources;
pub mod store;

pub use audit_sink::{AuditAction, AuditEvent, AuditSink, NoopAuditSink, AUDIT_MODULE};
pub use clock::{Clock, FixedClock};
pub use sources::{AttendanceSource, NoFacts, StudentFeedbackSource};
pub use store::{Collection, EntityStore, StoreError};
