//! Command handlers for the `appraisal` binary

pub mod appraisals;
pub mod cycle;
pub mod rollup;

use appraisal::config::OutputFormat;
use appraisal::domain::value_objects::Identity;
use appraisal::presentation::{render, Render, Workflow};

/// Everything a command needs: wired use cases, the actor and the format
pub struct Session {
    pub workflow: Workflow,
    pub actor: Identity,
    pub format: OutputFormat,
}

impl Session {
    pub fn print<T: Render + ?Sized>(&self, item: &T) {
        println!("{}", render(item, self.format));
    }

    /// Short confirmation in text mode; the record itself in JSON mode
    pub fn confirm<T: Render + ?Sized>(&self, message: &str, item: &T) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => self.print(item),
        }
    }
}
