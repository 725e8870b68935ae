//! Concurrency tests for the diet CLI.
//!
//! Writers from separate processes must be serialized so no meal or weight
//! entry is lost to an interleaved read-modify-write.

use assert_cmd::Command;
use serde_json::Value;
use std::thread;
use tempfile::TempDir;

fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("diet"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(temp_dir.path().join("data"));
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn read_state(temp_dir: &TempDir) -> Value {
    let path = temp_dir.path().join("data").join("diet_data.json");
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_concurrent_meal_adds() {
    let temp_dir = setup_test_dir();
    const WRITERS: usize = 8;

    thread::scope(|scope| {
        for i in 0..WRITERS {
            let temp_dir = &temp_dir;
            scope.spawn(move || {
                let name = format!("meal-{i}");
                cli(temp_dir)
                    .args(["meal", "add", name.as_str(), "100", "--date", "2024-03-01"])
                    .assert()
                    .success();
            });
        }
    });

    let state = read_state(&temp_dir);
    let meals = state["meals"]["2024-03-01"].as_array().unwrap();
    assert_eq!(meals.len(), WRITERS, "Expected {} meals, got {}", WRITERS, meals.len());
}

#[test]
fn test_concurrent_mixed_writers() {
    let temp_dir = setup_test_dir();

    thread::scope(|scope| {
        for i in 0..4 {
            let temp_dir = &temp_dir;
            scope.spawn(move || {
                let weight = format!("7{i}.0");
                cli(temp_dir)
                    .args(["weight", "add", weight.as_str(), "--date", "2024-03-01"])
                    .assert()
                    .success();
            });
            scope.spawn(move || {
                cli(temp_dir)
                    .args(["meal", "add", "snack", "50", "--date", "2024-03-01"])
                    .assert()
                    .success();
            });
        }
    });

    let state = read_state(&temp_dir);
    assert_eq!(state["weight_history"].as_array().unwrap().len(), 4);
    assert_eq!(state["meals"]["2024-03-01"].as_array().unwrap().len(), 4);
}

#[test]
fn test_concurrent_reads_during_writes() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["meal", "add", "rice", "300", "--date", "2024-03-01"])
        .assert()
        .success();

    thread::scope(|scope| {
        let temp_dir = &temp_dir;
        scope.spawn(move || {
            for _ in 0..5 {
                cli(temp_dir)
                    .args(["meal", "add", "egg", "80", "--date", "2024-03-01"])
                    .assert()
                    .success();
            }
        });
        scope.spawn(move || {
            for _ in 0..5 {
                cli(temp_dir)
                    .args(["summary", "--date", "2024-03-01"])
                    .assert()
                    .success();
            }
        });
    });

    let state = read_state(&temp_dir);
    assert_eq!(state["meals"]["2024-03-01"].as_array().unwrap().len(), 6);
}
