//! Appraisal Module
//!
//! - `options` - List filter (`AppraisalFilter`)
//! - `use_case` - `AppraisalUseCase`, the workflow driver

mod options;
mod use_case;

pub use options::AppraisalFilter;
pub use use_case::AppraisalUseCase;
