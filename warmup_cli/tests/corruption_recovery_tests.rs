//! Corruption recovery tests for the warmup binary.
//!
//! These tests verify the system can handle:
//! - Corrupted custom exercise files
//! - Missing data directories
//! - Malformed config files

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("warmup"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_custom_exercises_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(data_dir.join("custom_exercises.json"), "{ invalid json }}}}")
        .expect("Failed to write corrupted custom exercises");

    // Built-in exercises still work
    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--config")
        .arg(temp_dir.path().join("config.toml"))
        .args(["exercises", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Back Squat"));
}

#[test]
fn test_add_replaces_corrupted_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();

    let store_path = data_dir.join("custom_exercises.json");
    fs::write(&store_path, "not json at all").unwrap();

    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--config")
        .arg(temp_dir.path().join("config.toml"))
        .args([
            "exercises",
            "add",
            "Belt Squat",
            "--classification",
            "machine_assisted",
            "--equipment",
            "machine",
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(&store_path).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(saved[0]["name"], "Belt Squat");
    assert_eq!(saved[0]["classification"], "machine_assisted");
}

#[test]
fn test_missing_data_dir_is_fine() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path().join("does/not/exist"))
        .arg("--config")
        .arg(temp_dir.path().join("config.toml"))
        .args(["calc", "Leg Press", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Leg Press"));
}

#[test]
fn test_malformed_config_fails() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[preferences\nunit = ").unwrap();

    cli()
        .arg("--config")
        .arg(&config_path)
        .args(["prefs", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Toml"));
}
