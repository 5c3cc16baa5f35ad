//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --config, --data-dir) and the acting
//!   identity (--as-id, --as-name, --department, --role) are inherited by
//!   all subcommands
//! - The engine never authenticates; the identity flags are taken as given

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::entities::{AdminCategory, ResearchKind};
use crate::domain::value_objects::{
    AppraisalStatus, CycleKind, CycleStatus, Identity, PerformanceCategory, Role,
};

/// Appraisal - faculty performance appraisal workflow
#[derive(Parser, Debug)]
#[command(name = "appraisal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./appraisal.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the JSON store
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(flatten)]
    pub actor: ActorArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Identity the command runs as
#[derive(Args, Debug, Clone)]
pub struct ActorArgs {
    /// Employee id of the acting user
    #[arg(long = "as-id", global = true, value_name = "ID", default_value = "anonymous")]
    pub id: String,

    /// Display name (defaults to the id)
    #[arg(long = "as-name", global = true, value_name = "NAME")]
    pub name: Option<String>,

    #[arg(long, global = true, default_value = "")]
    pub department: String,

    /// admin (HR) or faculty
    #[arg(long, global = true, default_value = "faculty")]
    pub role: Role,
}

impl ActorArgs {
    pub fn identity(&self) -> Identity {
        Identity::new(
            self.id.clone(),
            self.name.clone().unwrap_or_else(|| self.id.clone()),
            self.department.clone(),
            self.role,
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Author and browse appraisal cycles
    #[command(subcommand)]
    Cycle(CycleCommand),

    /// Work on appraisals
    #[command(subcommand)]
    Appraisal(AppraisalCommand),

    /// Generate annual appraisals from completed months
    Rollup {
        #[arg(long)]
        year: i32,

        /// Only this employee (defaults to everyone with completed months)
        #[arg(long)]
        employee: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CycleCommand {
    /// Create a monthly cycle (Draft unless --activate)
    Create {
        #[arg(long)]
        year: i32,

        #[arg(long)]
        month: u32,

        /// Display name (defaults to e.g. "March 2025")
        #[arg(long)]
        name: Option<String>,

        /// Period start, YYYY-MM-DD (defaults to the calendar month)
        #[arg(long, requires = "end")]
        start: Option<chrono::NaiveDate>,

        /// Period end, YYYY-MM-DD
        #[arg(long, requires = "start")]
        end: Option<chrono::NaiveDate>,

        /// JSON array of criteria (defaults to the standard set)
        #[arg(long, value_name = "PATH")]
        criteria: Option<PathBuf>,

        #[arg(long)]
        activate: bool,
    },

    /// Replace the criteria of a Draft cycle
    UpdateCriteria {
        id: String,

        /// JSON array of criteria
        #[arg(long, value_name = "PATH")]
        criteria: PathBuf,
    },

    /// Draft → Active
    Activate { id: String },

    /// Active → Completed
    Complete { id: String },

    Show { id: String },

    List {
        #[arg(long)]
        kind: Option<CycleKind>,

        #[arg(long)]
        status: Option<CycleStatus>,

        #[arg(long)]
        year: Option<i32>,
    },

    /// Active cycles the acting employee has not started yet
    Available,
}

#[derive(Subcommand, Debug)]
pub enum AppraisalCommand {
    /// Start an appraisal for an active cycle
    Create { cycle: String },

    AddResearch {
        id: String,

        #[arg(long)]
        title: String,

        /// journal, conference, book or other
        #[arg(long)]
        kind: ResearchKind,

        #[arg(long, default_value = "")]
        description: String,

        /// Reference to an attached document (repeatable)
        #[arg(long = "doc", value_name = "REF")]
        documents: Vec<String>,
    },

    RemoveResearch { id: String, entry: String },

    AddAdmin {
        id: String,

        #[arg(long)]
        title: String,

        /// committee, coordination, mentoring or other
        #[arg(long)]
        category: AdminCategory,

        #[arg(long, default_value = "")]
        description: String,
    },

    RemoveAdmin { id: String, entry: String },

    /// Self score a custom criterion
    SetScore {
        id: String,
        criterion: String,
        score: f64,

        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Suggested research/admin scores for the current entries
    Preview { id: String },

    /// Self Assessment → Submitted
    Submit { id: String },

    /// Submitted → Reviewed. Unlisted criteria keep their seeded scores.
    Review {
        id: String,

        /// Reviewer score, CRITERION=VALUE (repeatable)
        #[arg(long = "score", value_parser = parse_pair, value_name = "CRITERION=VALUE")]
        scores: Vec<(String, String)>,

        /// Reviewer comment, CRITERION=TEXT (repeatable)
        #[arg(long = "comment", value_parser = parse_pair, value_name = "CRITERION=TEXT")]
        comments: Vec<(String, String)>,
    },

    /// Reviewed → Completed, with optional HR edits to the defaults
    Finalize {
        id: String,

        #[arg(long)]
        score: Option<f64>,

        /// excellent, good or needs-improvement
        #[arg(long)]
        category: Option<PerformanceCategory>,

        #[arg(long)]
        recommendations: Option<String>,
    },

    Show { id: String },

    List {
        #[arg(long)]
        employee: Option<String>,

        #[arg(long)]
        cycle: Option<String>,

        #[arg(long)]
        status: Option<AppraisalStatus>,
    },
}

/// Split `KEY=VALUE` at the first `=`
pub fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected CRITERION=VALUE, got '{}'", raw)),
    }
}
