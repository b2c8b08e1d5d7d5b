//! Integration tests for the `ovenwatch` binary.
//!
//! Everything here runs without a terminal: argument parsing, config
//! resolution and the one-shot `fetch` command.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command with an isolated home so tests never touch the real
/// configuration, and logs go to the temp dir.
fn ovenwatch_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ovenwatch");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("OVENWATCH_ENDPOINT")
        .env_remove("OVENWATCH_INTERVAL")
        .env_remove("OVENWATCH_SHAPE")
        .env_remove("OVENWATCH_PROFILE")
        .env_remove("OVENWATCH_DEFAULT_PROFILE")
        .env_remove("RUST_LOG")
        .arg("--log-file")
        .arg(home.join("ovenwatch.log"));
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    ovenwatch_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("pizzeria")
                .and(predicate::str::contains("fetch"))
                .and(predicate::str::contains("config"))
                .and(predicate::str::contains("--interval")),
        );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    ovenwatch_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ovenwatch"));
}

#[test]
fn test_unknown_shape_is_rejected() {
    let home = TempDir::new().unwrap();
    let output = ovenwatch_cmd(home.path())
        .args(["--shape", "square", "config", "show"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("square"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_is_under_config_home() {
    let home = TempDir::new().unwrap();
    ovenwatch_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_builtin_defaults() {
    let home = TempDir::new().unwrap();
    ovenwatch_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#"profile = "default""#)
                .and(predicate::str::contains(
                    r#"endpoint = "http://localhost:10000/api/stats""#,
                ))
                .and(predicate::str::contains(r#"poll_interval = "1s""#))
                .and(predicate::str::contains(r#"shape = "auto""#)),
        );
}

#[test]
fn test_config_show_applies_flags() {
    let home = TempDir::new().unwrap();
    ovenwatch_cmd(home.path())
        .args([
            "config",
            "show",
            "--endpoint",
            "http://pizzeria.local:8080/api/stats",
            "--interval",
            "500ms",
            "--shape",
            "rich",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("pizzeria.local:8080")
                .and(predicate::str::contains(r#"poll_interval = "500ms""#))
                .and(predicate::str::contains(r#"shape = "rich""#)),
        );
}

#[test]
fn test_config_show_rejects_zero_interval() {
    let home = TempDir::new().unwrap();
    let output = ovenwatch_cmd(home.path())
        .args(["config", "show", "--interval", "0s"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("greater than zero"));
}

#[test]
fn test_unknown_profile_fails() {
    let home = TempDir::new().unwrap();
    let output = ovenwatch_cmd(home.path())
        .args(["--profile", "kitchen", "config", "show"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("unknown profile 'kitchen'"));
}

#[test]
fn test_config_init_writes_once() {
    let home = TempDir::new().unwrap();
    ovenwatch_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));

    ovenwatch_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    ovenwatch_cmd(home.path())
        .args(["--profile", "default", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("localhost:10000"));
}

// ── Fetch ───────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_prints_snapshot_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stats": { "accepted": 12, "refused": 3,
                       "ingredients": { "R": 1, "J": 2, "V": 3, "B": 4 } },
            "stations": [
                { "id": 1, "current_load": 5, "max_capacity": 10, "available": true,
                  "size": "M", "restrictions": "gluten, lactose" }
            ]
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let endpoint = format!("{}/api/stats", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        ovenwatch_cmd(home.path())
            .args(["fetch", "--endpoint", &endpoint])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["accepted"], 12);
    assert_eq!(snapshot["ingredients"]["B"], 4);
    assert_eq!(
        snapshot["stations"][0]["restrictions"],
        json!(["gluten, lactose"])
    );
}

#[test]
fn test_fetch_unreachable_endpoint_fails() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let home = TempDir::new().unwrap();
    let output = ovenwatch_cmd(home.path())
        .args(["fetch", "--endpoint", &format!("http://{addr}/api/stats")])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(combined_output(&output).contains("poll of"));
}
