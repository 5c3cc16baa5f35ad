//! Configuration module
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (APPRAISAL_*)
//! 3. Project config (./appraisal.toml)
//! 4. User config (~/.config/appraisal/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{apply_overrides, ConfigError, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{
    AuditConfig, AuditSinkKind, Config, OutputConfig, OutputFormat, SourcesConfig, StoreBackend,
    StoreConfig, Verbosity,
};
