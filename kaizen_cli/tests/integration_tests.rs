//! Integration tests for the kaizen binary.
//!
//! These tests drive each tool end to end through stdin:
//! - One-shot calculators (health, workout), text and JSON output
//! - Interactive trackers (calories, sleep, water, planner)
//! - Brain games and the invalid-answer policy from config

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a config file in a fresh temp directory
fn setup_config(contents: &str) -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("config.toml"), contents).expect("Failed to write config");
    temp_dir
}

/// Helper to get the CLI binary pointed at an isolated config file
fn cli(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kaizen"));
    cmd.arg("--config").arg(config_dir.path().join("config.toml"));
    cmd
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("kaizen"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-improvement toolkit"));
}

#[test]
fn test_health_report() {
    let config = setup_config("");
    cli(&config)
        .args(["health", "--weight", "70", "--height", "175", "--age", "30", "--sex", "M"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your BMI: 22.86"))
        .stdout(predicate::str::contains("Your BMR: 1648.75 calories/day"));
}

#[test]
fn test_health_json() {
    let config = setup_config("");
    let output = cli(&config)
        .args(["health", "--weight", "70", "--height", "175", "--age", "30", "--sex", "f", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(report["bmr"].as_f64(), Some(1482.75));
    assert!((report["bmi"].as_f64().unwrap() - 22.857).abs() < 0.001);
}

#[test]
fn test_health_rejects_bad_input() {
    let config = setup_config("");
    cli(&config)
        .args(["health", "--weight", "70", "--height", "175", "--age", "30", "--sex", "X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sex must be M or F"));

    cli(&config)
        .args(["health", "--weight=-70", "--height", "175", "--age", "30", "--sex", "M"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidInput"));
}

#[test]
fn test_workout_plan() {
    let config = setup_config("");
    cli(&config)
        .args(["workout", "--height", "175", "--weight", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your Fitness Goal: Maintaining Fitness"))
        .stdout(predicate::str::contains("Push-ups: 3 x 15"));
}

#[test]
fn test_workout_json() {
    let config = setup_config("");
    let output = cli(&config)
        .args(["workout", "--height", "180", "--weight", "55", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let plan: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(plan["goal"], "gain_muscle");
    assert_eq!(plan["exercises"].as_array().map(Vec::len), Some(11));
}

#[test]
fn test_calorie_log() {
    let config = setup_config("");
    cli(&config)
        .arg("calories")
        .write_stdin("apple 100\npizza 300\negg lots\ntotal\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("apple (100 units): 52.00 kcal"))
        .stdout(predicate::str::contains("Food not found. Adding manual calories."))
        .stdout(predicate::str::contains("Invalid quantity: not a number"))
        .stdout(predicate::str::contains("Total Calories: 352.00"))
        .stdout(predicate::str::contains("Logged 2 entries"));
}

#[test]
fn test_calorie_foods_from_config() {
    let config = setup_config("[calories.foods]\noats = 3.89\n");
    cli(&config)
        .arg("calories")
        .write_stdin("Oats 10\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("oats (10 units): 38.90 kcal"));
}

#[test]
fn test_sleep_until_met() {
    let config = setup_config("");
    cli(&config)
        .args(["sleep", "--goal", "8", "--slept", "5"])
        .write_stdin("abc\n1\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You need to sleep 3.00 more hours"))
        .stdout(predicate::str::contains("Invalid amount"))
        .stdout(predicate::str::contains("You still need to sleep 2.00 more hours."))
        .stdout(predicate::str::contains("Congratulations! You've met your daily sleep goal."));
}

#[test]
fn test_sleep_already_met_uses_config_goal() {
    let config = setup_config("[sleep]\ndefault_goal_hours = 6.0\n");
    cli(&config)
        .args(["sleep", "--slept", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already met your daily sleep goal"));
}

#[test]
fn test_water_goal_reached() {
    let config = setup_config("");
    cli(&config)
        .args(["water", "--goal", "1", "--interval", "3600"])
        .write_stdin("0.5\n0\n0.75\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You've now drunk 0.50 liters out of your 1.00 liter goal."))
        .stdout(predicate::str::contains("Invalid amount"))
        .stdout(predicate::str::contains("You've exceeded your goal by 0.25 liters."));
}

#[test]
fn test_water_rejects_zero_interval() {
    let config = setup_config("");
    cli(&config)
        .args(["water", "--goal", "2", "--interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidInterval"));
}

#[test]
fn test_water_rejects_unschedulable_interval() {
    let config = setup_config("");
    cli(&config)
        .args(["water", "--goal", "2", "--interval", "9223372036854775807"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too long to schedule"));
}

#[test]
fn test_equations_abort_on_invalid_answer() {
    let config = setup_config("");
    cli(&config)
        .args(["equations", "--count", "2"])
        .write_stdin("abc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid answer: not a whole number"))
        .stdout(predicate::str::contains("Session ended early"));
}

#[test]
fn test_equations_retry_policy_from_config() {
    let config = setup_config("[brain]\non_invalid_answer = \"retry\"\nequation_rounds = 1\n");
    cli(&config)
        .arg("equations")
        .write_stdin("abc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid answer"))
        .stdout(predicate::str::contains("Session abandoned."));
}

#[test]
fn test_equations_invalid_count() {
    let config = setup_config("");
    cli(&config)
        .args(["equations", "--count", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidCount"));

    cli(&config)
        .args(["memory", "--count", "4000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit of 1000"));
}

#[test]
fn test_memory_session_completes() {
    let config = setup_config("");
    cli(&config)
        .args(["memory", "--count", "3"])
        .write_stdin("\n1\n2\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Memorize the numbers:"))
        .stdout(predicate::str::contains("out of 3 numbers!"))
        .stdout(predicate::str::contains("The sequence was:"));
}

#[test]
fn test_planner_edit_and_range_error() {
    let config = setup_config("");
    cli(&config)
        .arg("planner")
        .write_stdin("set 1 1 Morning run\nset 10 1 Nap\nset 2 8 Nap\nshow\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monday 06:00 - 08:00: Morning run"))
        .stdout(predicate::str::contains("row 10 out of range (1..=9)"))
        .stdout(predicate::str::contains("day 8 out of range (1..=7)"))
        .stdout(predicate::str::contains("22:00 - 00:00"));
}

#[test]
fn test_invalid_config_is_reported() {
    let config = setup_config("[brain]\nmemory_count = 0\n");
    cli(&config)
        .args(["memory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("memory_count must be positive"));
}
