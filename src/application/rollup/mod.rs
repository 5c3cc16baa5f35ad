//! Rollup Module
//!
//! - `use_case` - `RollupUseCase`

mod use_case;

pub use use_case::RollupUseCase;
