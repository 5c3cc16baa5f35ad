//! Drives the `appraisal` binary against a temporary data directory.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn run(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_appraisal"))
        .current_dir(data_dir)
        .env("APPRAISAL_AUDIT_SINK", "none")
        .env_remove("APPRAISAL_LOG")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

const HR: [&str; 4] = ["--as-id", "HR1", "--role", "admin"];
const ASHA: [&str; 6] = ["--as-id", "E1", "--as-name", "Asha Rao", "--role", "faculty"];

fn with<'a>(actor: &[&'a str], args: &[&'a str]) -> Vec<&'a str> {
    actor.iter().chain(args.iter()).copied().collect()
}

#[test]
fn test_full_cycle_through_the_binary() {
    let dir = tempdir().unwrap();
    let data = dir.path();

    let created = run(
        data,
        &with(&HR, &["cycle", "create", "--year", "2025", "--month", "2", "--activate"]),
    );
    assert!(created.status.success(), "{}", stderr(&created));
    assert!(stdout(&created).contains("Created cyc-2025-02 (Active)"));

    let started = run(
        data,
        &with(&ASHA, &["--json", "appraisal", "create", "cyc-2025-02"]),
    );
    assert!(started.status.success(), "{}", stderr(&started));
    let json: serde_json::Value = serde_json::from_str(&stdout(&started)).unwrap();
    let id = json["id"].as_str().unwrap().to_string();
    assert_eq!(json["status"], "Self Assessment");

    let scored = run(
        data,
        &with(&ASHA, &["appraisal", "set-score", &id, "conduct", "8"]),
    );
    assert!(scored.status.success(), "{}", stderr(&scored));
    let submitted = run(data, &with(&ASHA, &["appraisal", "submit", &id]));
    assert!(submitted.status.success(), "{}", stderr(&submitted));

    let unflagged = run(
        data,
        &with(&HR, &["appraisal", "review", &id, "--score", "attendance=3"]),
    );
    assert!(!unflagged.status.success());
    assert!(stderr(&unflagged).contains("comment required for adjusted attendance score"));

    let reviewed = run(
        data,
        &with(
            &HR,
            &[
                "appraisal",
                "review",
                &id,
                "--score",
                "attendance=3",
                "--comment",
                "attendance=Frequent absences",
            ],
        ),
    );
    assert!(reviewed.status.success(), "{}", stderr(&reviewed));

    let finalized = run(
        data,
        &with(
            &HR,
            &["--json", "appraisal", "finalize", &id, "--category", "good"],
        ),
    );
    assert!(finalized.status.success(), "{}", stderr(&finalized));
    let json: serde_json::Value = serde_json::from_str(&stdout(&finalized)).unwrap();
    assert_eq!(json["status"], "Completed");
    assert_eq!(json["category"], "Good");
}

#[test]
fn test_faculty_cannot_create_cycles() {
    let dir = tempdir().unwrap();
    let output = run(
        dir.path(),
        &with(&ASHA, &["cycle", "create", "--year", "2025", "--month", "2"]),
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("permission denied: E1 may not author appraisal cycles"));
}

#[test]
fn test_unknown_config_key_warns() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("appraisal.toml"), "[store]\nbakend = \"json\"\n").unwrap();
    let output = run(dir.path(), &with(&HR, &["cycle", "list"]));
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("unknown config key 'bakend'"));
    assert!(stderr(&output).contains("did you mean 'backend'?"));
}
