//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `store/` - EntityStore implementations (in-memory, JSON files) and seeding
//! - `events/` - AuditSink implementations (NDJSON, tracing)
//! - `sources/` - Attendance and feedback fixture sources
//! - `clock` - System clock

pub mod clock;
pub mod events;
pub mod sources;
pub mod store;

// Re-export for convenience
pub use clock::SystemClock;
pub use events::{JsonAuditSink, TracingAuditSink};
pub use sources::{FixtureAttendance, FixtureFeedback, SourceError};
pub use store::{InMemoryStore, JsonFileStore, Seed};
