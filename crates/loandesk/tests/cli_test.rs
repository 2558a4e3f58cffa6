//! Integration tests for the `loandesk` CLI binary.
//!
//! Parsing, help, completions, and local commands run without a backend;
//! API-bound commands are pointed at a wiremock server or a closed port.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `loandesk` binary with env isolation.
///
/// Clears all `LOANDESK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn loandesk_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("loandesk");
    cmd.env("HOME", "/tmp/loandesk-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/loandesk-cli-test-nonexistent")
        .env_remove("LOANDESK_API_URL")
        .env_remove("LOANDESK_ENVIRONMENT")
        .env_remove("RUST_LOG");
    cmd
}

/// An address nothing is listening on.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api")
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = loandesk_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_command_groups() {
    loandesk_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("customers")
            .and(predicate::str::contains("loans"))
            .and(predicate::str::contains("dashboard"))
            .and(predicate::str::contains("call")),
    );
}

#[test]
fn test_loan_status_help_names_every_known_status() {
    for sub in ["create", "update"] {
        let output = loandesk_cmd().args(["loans", sub, "--help"]).output().unwrap();
        assert!(output.status.success(), "loans {sub} --help failed");
        let text = combined_output(&output);
        for status in &loandesk_core::LoanStatus::KNOWN {
            assert!(
                text.contains(status.as_str()),
                "Expected '{status}' in loans {sub} help:\n{text}"
            );
        }
    }
}

#[test]
fn test_version_flag() {
    loandesk_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("loandesk"));
}

#[test]
fn test_completions_zsh() {
    loandesk_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Local commands ──────────────────────────────────────────────────

#[test]
fn test_catalog_lists_every_operation() {
    let output = loandesk_cmd()
        .args(["catalog", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let ops: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ops = ops.as_array().unwrap();
    assert_eq!(ops.len(), 15);
    assert!(ops.iter().any(|op| {
        op["kind"] == "lookup_profile" && op["path"] == "fetch_user_profile_pre_call/"
    }));
}

#[test]
fn test_config_show_without_file_uses_production() {
    loandesk_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://alfa-crm.replit.app/api"));
}

#[test]
fn test_config_show_honors_env_flag() {
    loandesk_cmd()
        .args(["--env", "development", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:5000/api"));
}

#[test]
fn test_config_set_url_roundtrip() {
    let home = tempfile::tempdir().unwrap();
    let run = |args: &[&str]| {
        let mut cmd = loandesk_cmd();
        cmd.env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path())
            .args(args);
        cmd
    };

    run(&["config", "set-url", "http://10.0.0.5:5000/api"])
        .assert()
        .success();
    run(&["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://10.0.0.5:5000/api"));
    run(&["config", "set-url", "ftp://nope"]).assert().failure();
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_output_format() {
    let output = loandesk_cmd()
        .args(["--output", "invalid", "customers", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_disposition_rejected_by_parser() {
    loandesk_cmd()
        .args(["call", "outcome", "5551234", "--disposition", "Shrugged"])
        .assert()
        .code(2);
}

#[test]
fn test_invalid_customer_fails_before_request() {
    // Nothing listens on the port; a validation error proves no request was made.
    loandesk_cmd()
        .args(["--api-url", &closed_port_url(), "customers", "create"])
        .args(["--first-name", "Ada", "--last-name", "Lovelace"])
        .args(["--email", "not-an-email", "--phone", "555", "--account-number", "A-1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("email"));
}

#[test]
fn test_unreachable_api_exits_with_connection_code() {
    loandesk_cmd()
        .args(["--api-url", &closed_port_url(), "dashboard"])
        .assert()
        .code(7);
}

#[test]
fn test_delete_requires_yes_when_not_interactive() {
    loandesk_cmd()
        .args(["--api-url", &closed_port_url(), "loans", "delete", "4"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_customers_list_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com" },
            { "id": 2, "first_name": "Alan", "last_name": "Turing" }
        ])))
        .mount(&server)
        .await;

    let output = loandesk_cmd()
        .args(["--api-url", &format!("{}/api", server.uri())])
        .args(["-o", "json", "customers", "list", "--search", "ada"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let customers: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let customers = customers.as_array().unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["first_name"], "Ada");
    assert_eq!(customers[0]["email"], "ada@example.com");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_message_reaches_stderr() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/loans/9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Loan 9 does not exist" })),
        )
        .mount(&server)
        .await;

    loandesk_cmd()
        .args(["--api-url", &format!("{}/api", server.uri())])
        .args(["loans", "get", "9"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Loan 9 does not exist"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_call_lookup_miss_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/fetch_user_profile_pre_call/"))
        .and(query_param("caller_number", "5550000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": "True",
            "caller_details": []
        })))
        .mount(&server)
        .await;

    loandesk_cmd()
        .args(["--api-url", &format!("{}/api", server.uri())])
        .args(["call", "lookup", "5550000"])
        .assert()
        .code(4);
}
