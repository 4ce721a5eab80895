//! The `check` use case: walk every root and produce a report.

use crate::report::tool_meta;
use crate::session::{SessionInput, open_session};
use anyhow::Context;
use licguard_settings::ResolvedConfig;
use licguard_types::{LicguardReport, SCHEMA_REPORT_V1, Verdict};
use time::OffsetDateTime;

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: LicguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, load facts and overrides, evaluate, produce report.
pub fn run_check(input: SessionInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let session = open_session(input).context("open session")?;

    let domain_report = licguard_domain::evaluate(
        &session.store,
        &session.overrides,
        &session.resolved.effective,
    );
    let licguard_domain::report::DomainReport {
        verdict,
        findings,
        data,
        counts,
    } = domain_report;
    tracing::info!(
        verdict = ?verdict,
        errors = counts.error,
        warnings = counts.warning,
        roots = data.roots_evaluated,
        "check finished"
    );

    let finished_at = OffsetDateTime::now_utc();

    let report = LicguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at,
        verdict,
        findings,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: session.resolved,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use licguard_settings::Overrides;

    const FACTS: &str = r#"{
  "schema": "licguard.facts.v1",
  "artifacts": [
    {"id": 1, "basename": "app", "full_path": "/usr/bin/app",
     "licenses": [{"license": "MIT", "provenance": "package-manager"}],
     "needs": ["libbar.so.2"]},
    {"id": 2, "basename": "libbar.so.2", "full_path": "/usr/lib/libbar.so.2",
     "licenses": [{"license": "GPL-2.0", "provenance": "package-manager"}],
     "provides": ["libbar.so.2"]}
  ]
}"#;

    fn input<'a>(root: &'a Utf8Path, config_text: &'a str) -> SessionInput<'a> {
        SessionInput {
            database_dir: root,
            config_text,
            config_dir: Some(root),
            overrides: Overrides::default(),
            signoff_files: Vec::new(),
            license_compat_files: Vec::new(),
        }
    }

    #[test]
    fn empty_config_uses_defaults_and_fails_on_gpl() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        std::fs::write(root.join("facts.json"), FACTS).expect("write facts");

        let output = run_check(input(root, "")).expect("run_check");
        assert_eq!(output.resolved_config.effective.profile, "strict");
        assert_eq!(output.report.verdict, Verdict::Fail);
        assert_eq!(output.report.findings.len(), 1);
        assert_eq!(output.report.data.artifacts_scanned, 2);
    }

    #[test]
    fn config_relative_compat_file_is_applied() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        std::fs::write(root.join("facts.json"), FACTS).expect("write facts");
        std::fs::write(
            root.join("compat.csv"),
            "LICENSE,COMPAT_LICENSE\nMIT,GPL-2.0\n",
        )
        .expect("write compat");

        let output = run_check(input(root, "license_compat_files = [\"compat.csv\"]\n"))
            .expect("run_check");
        assert_eq!(output.report.verdict, Verdict::Pass);
    }

    #[test]
    fn missing_facts_is_an_error() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let err = run_check(input(root, "")).expect_err("missing facts");
        assert!(format!("{err:#}").contains("does not exist"));
    }

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(Verdict::Pass), 0);
        assert_eq!(verdict_exit_code(Verdict::Warn), 0);
        assert_eq!(verdict_exit_code(Verdict::Fail), 2);
    }
}
