//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Output rendering abstractions
//!
//! ## Usage
//!
//! ```ignore
//! use appraisal::presentation::factory;
//!
//! let workflow = factory::create_workflow(&config, Arc::new(SystemClock))?;
//! let cycles = workflow.cycles.list_cycles(&CycleFilter::default())?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use factory::{create_workflow, SetupError, Workflow};
pub use output::{render, Render};
