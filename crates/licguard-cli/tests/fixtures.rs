//! End-to-end CLI integration tests using the facts fixtures in `tests/fixtures/`.
//!
//! Each fixture directory is a database directory holding `facts.json`, optionally with a
//! `licguard.toml` and override CSV files next to it.

use assert_cmd::Command;
use licguard_test_util::normalize_nondeterministic;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to get a Command for the licguard binary.
/// Wraps the deprecated cargo_bin to centralize the deprecation warning.
#[allow(deprecated)]
fn licguard_cmd() -> Command {
    Command::cargo_bin("licguard").expect("licguard binary not found - run `cargo build` first")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("licguard-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

/// Run `check` against a fixture from an empty working directory.
fn run_check(fixture_name: &str, extra: &[&str]) -> (i32, Value, TempDir) {
    let fixture_path = fixtures_dir().join(fixture_name);
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let output = licguard_cmd()
        .current_dir(temp_dir.path())
        .arg("--database-dir")
        .arg(&fixture_path)
        .args(extra)
        .arg("check")
        .arg("--report-out")
        .arg(&report_path)
        .output()
        .expect("run licguard");

    let exit_code = output.status.code().unwrap_or(-1);
    let report = read_json(&report_path);
    (exit_code, report, temp_dir)
}

fn read_json(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).expect("read report");
    serde_json::from_str(&content).expect("parse report JSON")
}

#[test]
fn clean_fixture_passes() {
    let (exit_code, report, _tmp) = run_check("clean", &[]);

    assert_eq!(exit_code, 0);
    assert_eq!(report["schema"], "licguard.report.v1");
    assert_eq!(report["verdict"], "pass");
    assert_eq!(report["findings"], Value::Array(Vec::new()));
    assert_eq!(report["data"]["artifacts_scanned"], 2);
    assert_eq!(report["data"]["roots_evaluated"], 1);
    assert_eq!(report["data"]["roots"][0]["artifact"], "app");
    assert_eq!(report["data"]["roots"][0]["compatible"], true);
}

#[test]
fn incompatible_fixture_fails_with_one_edge_finding() {
    let (exit_code, report, _tmp) = run_check("incompatible", &[]);

    assert_eq!(exit_code, 2);
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["data"]["roots_evaluated"], 2);

    let findings = report["findings"].as_array().expect("findings array");
    assert_eq!(findings.len(), 1);
    let f = &findings[0];
    assert_eq!(f["severity"], "error");
    assert_eq!(f["check_id"], "license.compatibility");
    assert_eq!(f["code"], "incompatible_license");
    assert_eq!(f["location"]["path"], "/usr/bin/app");
    assert_eq!(f["location"]["slot"], "libgpl.so.2");
    assert_eq!(f["data"]["child_license"], "GPL-2.0");
    assert_eq!(f["data"]["parent_license"], "MIT");
    assert!(f["fingerprint"].as_str().is_some_and(|s| s.len() == 64));
}

#[test]
fn manual_provenance_wins_for_tool_root() {
    let (_, report, _tmp) = run_check("incompatible", &[]);
    let roots = report["data"]["roots"].as_array().expect("roots array");
    let tool = roots
        .iter()
        .find(|r| r["artifact"] == "tool")
        .expect("tool root");
    assert_eq!(tool["license"], "MIT");
    assert_eq!(tool["compatible"], true);
}

#[test]
fn warn_profile_downgrades_severity() {
    let (exit_code, report, _tmp) = run_check("incompatible", &["--profile", "warn"]);

    assert_eq!(exit_code, 2, "warn profile fails on warnings");
    assert_eq!(report["data"]["profile"], "warn");
    assert_eq!(report["findings"][0]["severity"], "warning");
}

#[test]
fn config_compat_file_allows_the_edge() {
    let config = fixtures_dir().join("overrides").join("licguard.toml");
    let config = config.to_str().expect("utf8 fixture path");
    let (exit_code, report, _tmp) = run_check("overrides", &["--config", config]);

    assert_eq!(exit_code, 0);
    assert_eq!(report["verdict"], "pass");
}

#[test]
fn cli_signoff_file_allows_the_edge() {
    let signoff = fixtures_dir().join("incompatible").join("signoff.csv");
    let signoff = signoff.to_str().expect("utf8 fixture path");
    let (exit_code, report, _tmp) = run_check("incompatible", &["--signoff-file", signoff]);

    assert_eq!(exit_code, 0);
    assert_eq!(report["findings"], Value::Array(Vec::new()));
}

#[test]
fn cyclic_graph_terminates_and_passes() {
    let (exit_code, report, _tmp) = run_check("cycle", &[]);

    assert_eq!(exit_code, 0);
    assert_eq!(report["data"]["roots_evaluated"], 2);
}

#[test]
fn unresolved_licenses_are_reported_as_such() {
    let (exit_code, report, _tmp) = run_check("unresolved", &[]);

    assert_eq!(exit_code, 2);
    let f = &report["findings"][0];
    assert_eq!(f["code"], "unresolved_license");
    assert_eq!(f["data"]["parent_license"], "LICENSE_NOT_FOUND_ARTIFACT");
    assert_eq!(f["data"]["child_license"], "LICENSE_NOT_FOUND_LIBRARY");
}

#[test]
fn max_findings_truncates_and_records_total() {
    let (_, report, _tmp) = run_check("incompatible", &["--max-findings", "0"]);

    assert_eq!(report["data"]["findings_total"], 1);
    assert_eq!(report["data"]["findings_emitted"], 0);
    assert_eq!(
        report["data"]["truncated_reason"],
        "findings truncated to max_findings=0"
    );
}

#[test]
fn reports_are_deterministic_after_normalization() {
    let (_, first, _tmp1) = run_check("incompatible", &[]);
    let (_, second, _tmp2) = run_check("incompatible", &[]);

    let first = normalize_nondeterministic(first);
    assert_eq!(first["tool"]["version"], "__VERSION__");
    assert_eq!(first, normalize_nondeterministic(second));
}

#[test]
fn missing_database_writes_runtime_error_report() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("out").join("report.json");

    licguard_cmd()
        .current_dir(temp_dir.path())
        .args(["--database-dir", "does-not-exist", "check", "--report-out"])
        .arg(&report_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("licguard error"));

    let report = read_json(&report_path);
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["findings"][0]["check_id"], "tool.runtime");
    assert_eq!(report["findings"][0]["code"], "runtime_error");
}

#[test]
fn write_markdown_then_md_subcommand_agree() {
    let fixture_path = fixtures_dir().join("incompatible");
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");
    let md_path = temp_dir.path().join("comment.md");

    licguard_cmd()
        .current_dir(temp_dir.path())
        .arg("-d")
        .arg(&fixture_path)
        .args(["check", "--write-markdown", "--report-out"])
        .arg(&report_path)
        .arg("--markdown-out")
        .arg(&md_path)
        .assert()
        .code(2);

    let written = std::fs::read_to_string(&md_path).expect("read markdown");
    assert!(written.starts_with("# Licguard report"));
    assert!(written.contains("incompatible_license"));

    licguard_cmd()
        .current_dir(temp_dir.path())
        .arg("md")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::eq(written));
}
