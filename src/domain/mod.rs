//! Domain Layer
//!
//! The appraisal workflow's business rules without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Cycle, Appraisal, Criterion and contribution entries
//! - `value_objects/` - Statuses, scores, identity, attendance summary
//! - `services/` - Scorers, review reconciliation, insights, annual rollup
//! - `policies/` - Authorization rules
//! - `ports/` - Interfaces for the store, audit sink, clock and fact sources
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
