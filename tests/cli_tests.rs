//! Integration tests for the CLI interface

mod common;

use assert_cmd::Command;
use axum::routing::{get, post};
use axum::{Json, Router};
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with a clean environment: no token, no home config
fn tfc_ops(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tfc-ops").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("ATLAS_TOKEN")
        .env_remove("TFC_OPS_DEBUG")
        .env_remove("TFC_OPS_API_URL")
        .env_remove("TFC_OPS_LEGACY_API_URL")
        .env_remove("TFC_OPS_TERRAFORM_BIN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help_flag() {
    let home = TempDir::new().unwrap();
    tfc_ops(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("variables"));
}

#[test]
fn test_invalid_command() {
    let home = TempDir::new().unwrap();
    tfc_ops(&home)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_migrate_requires_token() {
    let home = TempDir::new().unwrap();
    let plan = common::write_plan(home.path(), &[&common::plan_row("env1", "ws1")]);

    tfc_ops(&home)
        .args(["migrate", "--vcs-token-id", "ot-1", "--plan"])
        .arg(&plan)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ATLAS_TOKEN is required"));
}

#[test]
fn test_migrate_missing_plan_file() {
    let home = TempDir::new().unwrap();

    tfc_ops(&home)
        .env("ATLAS_TOKEN", "token")
        .args(["migrate", "--vcs-token-id", "ot-1", "--plan"])
        .arg(home.path().join("missing.csv"))
        .assert()
        .code(3)
        .stdout(predicate::str::contains("No workspaces were migrated."));
}

#[test]
fn test_missing_explicit_config_file() {
    let home = TempDir::new().unwrap();

    tfc_ops(&home)
        .env("ATLAS_TOKEN", "token")
        .arg("--config")
        .arg(home.path().join("nope.toml"))
        .args(["variables", "list", "-o", "legacyOrg", "-e", "legacyEnv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_plan_validate_ok() {
    let home = TempDir::new().unwrap();
    let plan = common::write_plan(
        home.path(),
        &[&common::plan_row("env1", "ws1"), &common::plan_row("env2", "ws2")],
    );

    tfc_ops(&home)
        .args(["plan", "validate", "--plan"])
        .arg(&plan)
        .assert()
        .success()
        .stdout(predicate::str::contains("row 2: ok legacyOrg/env1 -> newOrg/ws1"))
        .stdout(predicate::str::contains("2 rows ready to migrate"));
}

#[test]
fn test_plan_validate_reports_malformed_rows() {
    let home = TempDir::new().unwrap();
    let plan = common::write_plan(
        home.path(),
        &[&common::plan_row("env1", "ws1"), "legacyOrg,env2,newOrg"],
    );

    tfc_ops(&home)
        .args(["plan", "validate", "--plan"])
        .arg(&plan)
        .assert()
        .code(3)
        .stdout(predicate::str::contains(
            "row 3: malformed: expected 8 fields, found 3",
        ))
        .stderr(predicate::str::contains("1 of 2 rows are malformed"));
}

async fn start_fake_api() -> String {
    let app = Router::new()
        .route(
            "/v1/terraform/configurations/{org}/{env}/versions/latest",
            get(|| async {
                Json(serde_json::json!({
                    "version": {
                        "tf_vars": [
                            { "key": "region", "value": "us-east-1", "hcl": false },
                            { "key": "secret", "value": "TF_ENTERPRISE_SENSITIVE_VAR", "hcl": false }
                        ]
                    }
                }))
            }),
        )
        .route(
            "/v2/organizations/{org}/workspaces",
            post(|| async { (axum::http::StatusCode::CREATED, "{}") }),
        )
        .route(
            "/v2/vars",
            post(|| async { (axum::http::StatusCode::CREATED, "{}") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_migrate_end_to_end_json_report() {
    let base = start_fake_api().await;
    let home = TempDir::new().unwrap();
    let plan = common::write_plan(
        home.path(),
        &["legacyOrg,legacyEnv,newOrg,newWS,1.5.0,org/repo,main,./infra"],
    );

    let mut cmd = tfc_ops(&home);
    cmd.env("ATLAS_TOKEN", "token")
        .env("TFC_OPS_API_URL", format!("{base}/v2"))
        .env("TFC_OPS_LEGACY_API_URL", format!("{base}/v1"))
        .args(["migrate", "-y", "--json", "--terraform-bin", "true"])
        .args(["--vcs-token-id", "ot-1", "--working-dir"])
        .arg(home.path())
        .arg("--plan")
        .arg(&plan);

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('{').unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(
        report,
        serde_json::json!({ "workspaces": { "newWS": ["secret"] } })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_debug_in_config_file_logs_response_bodies() {
    let base = start_fake_api().await;
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".tfc-ops.toml"),
        format!("token = \"token\"\ndebug = true\nlegacy_api_url = \"{base}/v1\"\n"),
    )
    .unwrap();

    let mut cmd = tfc_ops(&home);
    cmd.args(["variables", "list", "-o", "legacyOrg", "-e", "legacyEnv"]);

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-> 200 OK"), "stderr: {stderr}");
    assert!(stderr.contains("us-east-1"), "stderr: {stderr}");
}
