//! Cycle Module
//!
//! - `options` - Authoring input (`NewCycle`) and list filter (`CycleFilter`)
//! - `use_case` - `CycleUseCase`

mod options;
mod use_case;

pub use options::{CycleFilter, NewCycle};
pub use use_case::CycleUseCase;
