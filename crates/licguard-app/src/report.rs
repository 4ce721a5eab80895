use anyhow::Context;
use licguard_render::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableRoot,
    RenderableSeverity, RenderableVerdictStatus,
};
use licguard_types::{
    Finding, LicguardData, LicguardReport, SCHEMA_REPORT_V1, Severity, ToolMeta, Verdict,
};
use time::OffsetDateTime;

pub fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "licguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

pub fn parse_report_json(text: &str) -> anyhow::Result<LicguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }
    let report: LicguardReport =
        serde_json::from_value(value).context("parse licguard v1 report")?;
    Ok(report)
}

pub fn serialize_report(report: &LicguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &LicguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            profile: report.data.profile.clone(),
            roots_evaluated: report.data.roots_evaluated,
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
            roots: report
                .data
                .roots
                .iter()
                .map(|r| RenderableRoot {
                    artifact: r.artifact.clone(),
                    full_path: r.full_path.clone(),
                    license: r.license.clone(),
                    compatible: r.compatible,
                    incompatible_licenses: r.incompatible_licenses.clone(),
                })
                .collect(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: Some(f.check_id.clone()),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.clone(),
            slot: loc.slot.clone(),
        }),
        help: f.help.clone(),
    }
}

/// A failing report carrying a single `tool.runtime` finding.
pub fn runtime_error_report(message: &str) -> LicguardReport {
    let now = OffsetDateTime::now_utc();
    let data = LicguardData {
        profile: "unknown".to_string(),
        findings_total: 1,
        findings_emitted: 1,
        ..LicguardData::default()
    };

    LicguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: licguard_types::ids::CHECK_TOOL_RUNTIME.to_string(),
            code: licguard_types::ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: Some("Fix the tool error and re-run licguard.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data,
    }
}
