//! Application Layer
//!
//! Use cases that orchestrate the appraisal workflow.
//! This layer:
//! - Depends on Domain layer (entities, services, policies, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `CycleUseCase` - Cycle authoring and the available-months query
//! - `AppraisalUseCase` - Create, edit, submit, review and finalize appraisals
//! - `RollupUseCase` - Annual summary generation
//!
//! All three share a `WorkflowContext` (clock, audit sink, fact sources).

pub mod appraisals;
mod context;
pub mod cycles;
mod records;
pub mod rollup;
#[cfg(test)]
mod test_support;

pub use appraisals::{AppraisalFilter, AppraisalUseCase};
pub use context::{WorkflowContext, DEFAULT_STUDENT_FEEDBACK};
pub use cycles::{CycleFilter, CycleUseCase, NewCycle};
pub use rollup::RollupUseCase;
