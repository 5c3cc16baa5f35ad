//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{AuditSinkKind, Config, OutputFormat, StoreBackend, Verbosity};

pub const PROJECT_CONFIG_FILE: &str = "appraisal.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// First config file found wins; env overrides apply on top
pub fn discover(
    explicit: Option<&Path>,
    project_root: Option<&Path>,
) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let candidates = explicit.map(Path::to_path_buf).into_iter().chain(
        project_root
            .map(|root| root.join(PROJECT_CONFIG_FILE))
            .into_iter()
            .chain(user_config_path()),
    );

    for (i, path) in candidates.enumerate() {
        // An explicit path must exist; discovered ones are optional
        if i > 0 || explicit.is_none() {
            if !path.exists() {
                continue;
            }
        }
        debug!(path = %path.display(), "loading config");
        let (config, warnings) = load_with_warnings(&path)?;
        return Ok((with_env_overrides(config), warnings));
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("appraisal").join("config.toml"))
}

/// Apply environment variable overrides (APPRAISAL_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Overrides from an arbitrary lookup; unparseable values are ignored
pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(backend) = lookup("APPRAISAL_STORE_BACKEND") {
        match backend.to_lowercase().as_str() {
            "json" => config.store.backend = StoreBackend::Json,
            "memory" => config.store.backend = StoreBackend::Memory,
            _ => {}
        }
    }

    if let Some(dir) = lookup("APPRAISAL_DATA_DIR") {
        if !dir.is_empty() {
            config.store.data_dir = Some(PathBuf::from(dir));
        }
    }

    if let Some(val) = lookup("APPRAISAL_SEED_DEFAULTS") {
        config.store.seed_defaults = val.to_lowercase() != "false" && val != "0";
    }

    if let Some(sink) = lookup("APPRAISAL_AUDIT_SINK") {
        match sink.to_lowercase().as_str() {
            "log" => config.audit.sink = AuditSinkKind::Log,
            "json" => config.audit.sink = AuditSinkKind::Json,
            "none" => config.audit.sink = AuditSinkKind::None,
            _ => {}
        }
    }

    if let Some(path) = lookup("APPRAISAL_AUDIT_PATH") {
        if !path.is_empty() {
            config.audit.path = Some(PathBuf::from(path));
        }
    }

    if let Some(score) = lookup("APPRAISAL_DEFAULT_FEEDBACK") {
        if let Ok(score) = score.parse::<f64>() {
            if crate::domain::value_objects::is_valid_score(score) {
                config.sources.default_student_feedback = score;
            }
        }
    }

    if let Some(verbosity) = lookup("APPRAISAL_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    if let Some(format) = lookup("APPRAISAL_OUTPUT_FORMAT") {
        config.output.format = match format.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "store",
        "backend",
        "data_dir",
        "seed_defaults",
        "audit",
        "sink",
        "path",
        "sources",
        "default_student_feedback",
        "attendance_file",
        "feedback_file",
        "output",
        "verbosity",
        "format",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
