//! End-to-end tests of the `quiz-e2e` binary.
//!
//! None of these launch a browser: they stop at argument parsing,
//! configuration loading or validation.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ENV_VARS: [&str; 10] = [
    "QUIZ_E2E_ENTRY",
    "QUIZ_E2E_SCREENSHOTS_DIR",
    "QUIZ_E2E_SCREENSHOTS",
    "QUIZ_E2E_TIMEOUT_MS",
    "QUIZ_E2E_POLL_INTERVAL_MS",
    "QUIZ_E2E_HEADLESS",
    "QUIZ_E2E_WINDOW_WIDTH",
    "QUIZ_E2E_WINDOW_HEIGHT",
    "QUIZ_E2E_CHROME_PATH",
    "QUIZ_E2E_REPORT",
];

/// The binary, run in `dir` with a clean environment.
fn quiz_e2e(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("quiz-e2e").unwrap();
    cmd.current_dir(dir.path()).env("NO_COLOR", "1").env_remove("RUST_LOG");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    quiz_e2e(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("print-config"));
}

#[test]
fn test_print_config_defaults() {
    let temp = TempDir::new().unwrap();
    quiz_e2e(&temp)
        .arg("print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""timeoutMs": 10000"#))
        .stdout(predicate::str::contains(r#""pollIntervalMs": 100"#))
        .stdout(predicate::str::contains(r#""entry": "quiz_app.html""#))
        .stdout(predicate::str::contains("Dynamic Quiz App"));
}

#[test]
fn test_print_config_flag_override() {
    let temp = TempDir::new().unwrap();
    quiz_e2e(&temp)
        .args(["print-config", "--timeout-ms", "500", "--window-size", "800x600"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""timeoutMs": 500"#))
        .stdout(predicate::str::contains(r#""windowWidth": 800"#))
        .stdout(predicate::str::contains(r#""windowHeight": 600"#));
}

#[test]
fn test_print_config_reads_default_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("quiz-e2e.config.json"),
        r#"{ "entry": "build/index.html", "screenshots": false }"#,
    )
    .unwrap();

    quiz_e2e(&temp)
        .arg("print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""entry": "build/index.html""#))
        .stdout(predicate::str::contains(r#""screenshots": false"#));
}

#[test]
fn test_print_config_env_overrides_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("quiz-e2e.config.json"),
        r#"{ "timeoutMs": 3000 }"#,
    )
    .unwrap();

    quiz_e2e(&temp)
        .arg("print-config")
        .env("QUIZ_E2E_TIMEOUT_MS", "4500")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""timeoutMs": 4500"#));
}

#[test]
fn test_zero_timeout_rejected_by_parser() {
    let temp = TempDir::new().unwrap();
    quiz_e2e(&temp)
        .args(["run", "--timeout-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn test_poll_longer_than_timeout_fails_before_launch() {
    let temp = TempDir::new().unwrap();
    quiz_e2e(&temp)
        .args(["run", "--timeout-ms", "100", "--poll-interval-ms", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pollIntervalMs"))
        .stderr(predicate::str::contains("Running").not());
}

#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();
    quiz_e2e(&temp)
        .args(["run", "--config", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_empty_fixture_questions_rejected() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("quiz-e2e.config.json"),
        r#"{ "fixture": { "questions": [] } }"#,
    )
    .unwrap();

    quiz_e2e(&temp)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("fixture.questions"));
}

#[test]
fn test_unknown_config_key_rejected() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("quiz-e2e.config.json"),
        r#"{ "timeout": 5 }"#,
    )
    .unwrap();

    quiz_e2e(&temp)
        .arg("print-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_print_config_multi_word_env_vars() {
    let temp = TempDir::new().unwrap();
    quiz_e2e(&temp)
        .arg("print-config")
        .env("QUIZ_E2E_POLL_INTERVAL_MS", "250")
        .env("QUIZ_E2E_SCREENSHOTS_DIR", "artifacts")
        .env("QUIZ_E2E_WINDOW_WIDTH", "1280")
        .env("QUIZ_E2E_CHROME_PATH", "/opt/chromium")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""pollIntervalMs": 250"#))
        .stdout(predicate::str::contains(r#""screenshotsDir": "artifacts""#))
        .stdout(predicate::str::contains(r#""windowWidth": 1280"#))
        .stdout(predicate::str::contains(r#""chromePath": "/opt/chromium""#));
}

#[test]
fn test_report_pointing_at_directory_fails_before_launch() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("reports")).unwrap();

    quiz_e2e(&temp)
        .args(["run", "--report", "reports"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is a directory"))
        .stderr(predicate::str::contains("Running").not());
}

#[test]
fn test_launch_failure_overwrites_existing_report() {
    let temp = TempDir::new().unwrap();
    let report = temp.path().join("report.json");
    fs::write(&report, "stale").unwrap();

    quiz_e2e(&temp)
        .args([
            "run",
            "--no-screenshots",
            "--chrome-path",
            "/nonexistent/chrome",
            "--report",
            "report.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Overwriting existing report"))
        .stderr(predicate::str::contains("session could not be opened"));

    let written = fs::read_to_string(&report).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["passed"], false);
    assert_eq!(json["failure"]["kind"], "session_init");
    assert_eq!(json["checkpoints"][0]["status"], "not_run");
}
