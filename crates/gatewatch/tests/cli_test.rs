#![allow(clippy::unwrap_used)]
//! Integration tests for the `gatewatch` CLI binary.
//!
//! Argument parsing, help output, shell completions, and error handling
//! run without any endpoint; the end-to-end analysis test drives the
//! binary against a wiremock telemetry endpoint.

use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `gatewatch` binary with env isolation.
///
/// Clears all `GATEWATCH_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn gatewatch_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("gatewatch").unwrap();
    cmd.env("HOME", "/tmp/gatewatch-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/gatewatch-test-nonexistent")
        .env_remove("GATEWATCH_PROFILE")
        .env_remove("GATEWATCH_ENDPOINT")
        .env_remove("GATEWATCH_REGION")
        .env_remove("GATEWATCH_TOKEN")
        .env_remove("GATEWATCH_OUTPUT")
        .env_remove("GATEWATCH_INSECURE")
        .env_remove("GATEWATCH_TIMEOUT");
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = gatewatch_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    gatewatch_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("idle")
            .and(predicate::str::contains("analyze"))
            .and(predicate::str::contains("gateways")),
    );
}

#[test]
fn test_version_flag() {
    gatewatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gatewatch"));
}

#[test]
fn test_unknown_subcommand_fails() {
    gatewatch_cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    gatewatch_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_analyze_without_endpoint_is_a_usage_error() {
    gatewatch_cmd()
        .arg("analyze")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("endpoint"));
}

#[test]
fn test_unknown_profile_is_reported() {
    gatewatch_cmd()
        .args(["gateways", "list", "--profile", "nope"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_config_path_prints_a_path() {
    gatewatch_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── End-to-end analysis against a mock endpoint ─────────────────────

async fn mock_endpoint() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "account_id": "123456789012" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/gateways"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "nat-1",
                "kind": "nat",
                "network_id": "vpc-1",
                "tags": [{ "key": "Name", "value": "prod-egress" }]
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/networks/vpc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "vpc-1", "tags": [{ "key": "Name", "value": "prod-vpc" }] }
        })))
        .mount(&server)
        .await;

    // Every NAT metric reports one nonzero datapoint at the same
    // timestamp: one observed period, zero idle periods.
    Mock::given(method("GET"))
        .and(path_regex(r"^/v1/gateways/nat-1/metrics/[A-Za-z0-9]+/datapoints$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "timestamp": "2026-05-01T00:00:00Z",
                "sum": 100.0,
                "average": 25.0,
                "maximum": 50.0,
                "minimum": 0.0
            }]
        })))
        .mount(&server)
        .await;

    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_analyze_end_to_end_json() {
    let server = mock_endpoint().await;
    let uri = server.uri();

    let assert = tokio::task::spawn_blocking(move || {
        gatewatch_cmd()
            .args(["analyze", "--days", "5", "-o", "json"])
            .args(["--endpoint", &uri, "--region", "eu-west-1"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(
            predicate::str::contains("\"gateway_id\": \"nat-1\"")
                .and(predicate::str::contains("\"gateway_name\": \"prod-egress\""))
                .and(predicate::str::contains("\"total_periods\": 1"))
                .and(predicate::str::contains("\"idle_periods\": 0")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_gateways_list_end_to_end_plain() {
    let server = mock_endpoint().await;
    let uri = server.uri();

    let assert = tokio::task::spawn_blocking(move || {
        gatewatch_cmd()
            .args(["gateways", "list", "-o", "plain"])
            .args(["--endpoint", &uri])
            .assert()
    })
    .await
    .unwrap();

    assert.success().stdout(predicate::str::contains("nat-1"));
}
