//! Binary subcommands that run without a terminal

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn drivelab(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("drivelab").expect("binary built");
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

#[test]
fn test_features_lists_registry_and_project_files() {
    let dir = TempDir::new().unwrap();
    drivelab(&dir)
        .arg("features")
        .assert()
        .success()
        .stdout(predicate::str::contains("Critical Event Sieve"))
        .stdout(predicate::str::contains("Drive Lab"))
        .stdout(predicate::str::contains("scene.scn"))
        .stdout(predicate::str::contains("(document)"));
}

#[test]
fn test_print_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    drivelab(&dir)
        .arg("print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("landing_debounce_ms = 100"))
        .stdout(predicate::str::contains("completion_grace_ms = 3000"));
}

#[test]
fn test_print_config_applies_overrides() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[tasks]\nauto_extract = false\n").unwrap();

    drivelab(&dir)
        .arg("--config")
        .arg(&config)
        .arg("print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("auto_extract = false"));
}

#[test]
fn test_malformed_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("broken.toml");
    std::fs::write(&config, "[shell\n").unwrap();

    drivelab(&dir)
        .arg("--config")
        .arg(&config)
        .arg("print-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_malformed_default_config_falls_back_and_logs() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[shell\n").unwrap();

    drivelab(&dir)
        .env_remove("RUST_LOG")
        .arg("print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("landing_debounce_ms = 100"));

    let log = std::fs::read_to_string(dir.path().join("logs").join("drivelab.log")).unwrap();
    assert!(log.contains("Using default configuration"), "log was: {log}");
}
