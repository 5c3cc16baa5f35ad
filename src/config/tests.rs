//! Tests for configuration loading

use super::*;
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.store.backend, StoreBackend::Json);
    assert!(config.store.seed_defaults);
    assert_eq!(config.audit.sink, AuditSinkKind::Log);
    assert_eq!(config.sources.default_student_feedback, 7.0);
    assert_eq!(config.output.verbosity, Verbosity::Normal);
    assert_eq!(config.output.format, OutputFormat::Text);
}

#[test]
fn parse_full_file() {
    let toml = r#"
[store]
backend = "memory"
data_dir = "/var/lib/appraisal"
seed_defaults = false

[audit]
sink = "json"
path = "audit.ndjson"

[sources]
default_student_feedback = 6.5
attendance_file = "attendance.json"

[output]
verbosity = "debug"
format = "json"
"#;
    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.store.backend, StoreBackend::Memory);
    assert_eq!(
        config.data_dir(),
        std::path::PathBuf::from("/var/lib/appraisal")
    );
    assert!(!config.store.seed_defaults);
    assert_eq!(config.audit.sink, AuditSinkKind::Json);
    assert_eq!(config.sources.default_student_feedback, 6.5);
    assert!(config.sources.feedback_file.is_none());
    assert_eq!(config.output.verbosity, Verbosity::Debug);
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn partial_file_keeps_section_defaults() {
    let config: Config = toml::from_str("[audit]\nsink = \"none\"\n").unwrap();
    assert_eq!(config.audit.sink, AuditSinkKind::None);
    assert!(config.store.seed_defaults);
    assert_eq!(config.sources.default_student_feedback, 7.0);
}

#[test]
fn unknown_key_warns_with_suggestion() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(PROJECT_CONFIG_FILE);
    fs::write(&path, "[store]\nbackend = \"json\"\nseed_defualts = true\n").unwrap();

    let (_, warnings) = Config::load_with_warnings(&path).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "seed_defualts");
    assert_eq!(warnings[0].line, Some(3));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("seed_defaults"));
}

#[test]
fn unrelated_key_has_no_suggestion() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(PROJECT_CONFIG_FILE);
    fs::write(&path, "[output]\ncolour_scheme = \"dark\"\n").unwrap();

    let (_, warnings) = Config::load_with_warnings(&path).unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].suggestion.is_none());
}

#[test]
fn invalid_value_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(PROJECT_CONFIG_FILE);
    fs::write(&path, "[store]\nbackend = \"sqlite\"\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = Config::discover(Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn project_file_is_discovered() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(PROJECT_CONFIG_FILE),
        "[sources]\ndefault_student_feedback = 5.0\n",
    )
    .unwrap();

    let (config, warnings) = Config::discover(None, Some(dir.path())).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(config.sources.default_student_feedback, 5.0);
}

#[test]
fn overrides_from_lookup() {
    let env: HashMap<&str, &str> = [
        ("APPRAISAL_STORE_BACKEND", "memory"),
        ("APPRAISAL_DATA_DIR", "/tmp/appraisal"),
        ("APPRAISAL_SEED_DEFAULTS", "false"),
        ("APPRAISAL_AUDIT_SINK", "none"),
        ("APPRAISAL_DEFAULT_FEEDBACK", "8.5"),
        ("APPRAISAL_VERBOSITY", "quiet"),
        ("APPRAISAL_OUTPUT_FORMAT", "json"),
    ]
    .into_iter()
    .collect();

    let config = apply_overrides(Config::default(), |k| env.get(k).map(|v| v.to_string()));
    assert_eq!(config.store.backend, StoreBackend::Memory);
    assert_eq!(
        config.store.data_dir.as_deref(),
        Some(std::path::Path::new("/tmp/appraisal"))
    );
    assert!(!config.store.seed_defaults);
    assert_eq!(config.audit.sink, AuditSinkKind::None);
    assert_eq!(config.sources.default_student_feedback, 8.5);
    assert_eq!(config.output.verbosity, Verbosity::Quiet);
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn out_of_range_feedback_override_is_ignored() {
    let config = apply_overrides(Config::default(), |k| {
        (k == "APPRAISAL_DEFAULT_FEEDBACK").then(|| "42".to_string())
    });
    assert_eq!(config.sources.default_student_feedback, 7.0);
}

#[test]
fn warning_display() {
    let warning = ConfigWarning {
        key: "sinc".to_string(),
        file: "appraisal.toml".into(),
        line: Some(2),
        suggestion: Some("sink".to_string()),
    };
    assert_eq!(
        warning.to_string(),
        "unknown config key 'sinc' in appraisal.toml:2 (did you mean 'sink'?)"
    );
}
