//! Fact Source Implementations
//!
//! Attendance and student feedback lookups backed by in-memory maps, which
//! can be loaded from JSON fixture files.

mod fixture;

pub use fixture::{FixtureAttendance, FixtureFeedback, SourceError};
