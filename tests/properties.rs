//! Property tests for the appraisal engine.
//!
//! Properties use randomized input generation to protect the scoring rules:
//! bounded outputs, monotonic responses and deterministic narratives.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/attendance_scorer.rs"]
mod attendance_scorer;

#[path = "properties/contribution_scorer.rs"]
mod contribution_scorer;

#[path = "properties/annual_rollup.rs"]
mod annual_rollup;
