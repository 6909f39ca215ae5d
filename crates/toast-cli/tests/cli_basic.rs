//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. TOAST_ENV
//! is set to dev so they never touch a real user config.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    let mut child = Command::new("cargo")
        .args(["run", "-p", "toast-cli", "--"])
        .args(args)
        .env("TOAST_ENV", "dev")
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI command");

    if let Some(input) = stdin {
        child
            .stdin
            .as_mut()
            .expect("stdin piped")
            .write_all(input.as_bytes())
            .expect("write stdin");
    }

    let output = child.wait_with_output().expect("Failed to wait on CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_plan_outputs_config() {
    let (stdout, _, code) = run_cli(&["timer", "plan", "--minutes", "25", "--focus", "essay"], None);
    assert_eq!(code, 0, "timer plan failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("plan output is JSON");
    assert_eq!(parsed["duration_secs"], 1500);
    assert_eq!(parsed["focus_label"], "essay");
}

#[test]
fn test_timer_plan_sums_parts() {
    let (stdout, _, code) = run_cli(
        &["timer", "plan", "--hours", "1", "--minutes", "5", "--seconds", "30"],
        None,
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["duration_secs"], 3930);
}

#[test]
fn test_timer_plan_rejects_zero_duration() {
    let (_, stderr, code) = run_cli(&["timer", "plan", "--minutes", "0"], None);
    assert_eq!(code, 1);
    assert!(
        stderr.contains("duration must be positive"),
        "stderr was: {stderr}"
    );
}

#[test]
fn test_timer_run_completes_short_session() {
    let (stdout, _, code) = run_cli(
        &["timer", "run", "--seconds", "2", "--focus", "blink"],
        None,
    );
    assert_eq!(code, 0, "timer run failed");
    assert!(stdout.contains("blink"), "stdout was: {stdout}");
    assert!(stdout.contains("WELL DONE"), "stdout was: {stdout}");
}

#[test]
fn test_timer_run_abort_burns_the_toast() {
    let (stdout, _, code) = run_cli(
        &["timer", "run", "--seconds", "30", "--focus", "burnt"],
        Some("q\n"),
    );
    assert_eq!(code, 0, "timer run (abort) failed");
    assert!(stdout.contains("burned the toast"), "stdout was: {stdout}");
}

#[test]
fn test_timer_run_json_emits_events() {
    let (stdout, _, code) = run_cli(
        &["timer", "run", "--seconds", "1", "--focus", "blip", "--json"],
        None,
    );
    assert_eq!(code, 0);
    let types: Vec<String> = stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .filter_map(|v| v["type"].as_str().map(str::to_string))
        .collect();
    assert!(types.contains(&"SessionStarted".to_string()), "got {types:?}");
    assert!(types.contains(&"SessionCompleted".to_string()), "got {types:?}");
}

#[test]
fn test_config_list_is_json() {
    let (stdout, _, code) = run_cli(&["config", "list"], None);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("config list is JSON");
    assert!(parsed["timer"]["focus_minutes"].is_number());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "theme"], None);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"), "stderr was: {stderr}");
}

#[test]
fn test_config_path_mentions_dev_dir() {
    let (stdout, _, code) = run_cli(&["config", "path"], None);
    assert_eq!(code, 0);
    assert!(stdout.contains("toast-dev"), "stdout was: {stdout}");
}
