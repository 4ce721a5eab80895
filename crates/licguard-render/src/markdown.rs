use crate::{RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Licguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Profile: {}\n- Roots evaluated: {}\n- Findings: {} (emitted) / {} (total)\n\n",
        verdict,
        report.data.profile,
        report.data.roots_evaluated,
        report.data.findings_emitted,
        report.data.findings_total
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    let failing: Vec<_> = report.data.roots.iter().filter(|r| !r.compatible).collect();
    if !failing.is_empty() {
        out.push_str("## Incompatible roots\n\n");
        out.push_str("| Artifact | License | Incompatible licenses |\n");
        out.push_str("|---|---|---|\n");
        for root in failing {
            out.push_str(&format!(
                "| `{}` | {} | {} |\n",
                root.full_path,
                root.license,
                root.incompatible_licenses.join(", ")
            ));
        }
        out.push('\n');
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };

        out.push_str(&format!(
            "- [{}] `{}` / `{}`: {}",
            sev,
            f.check_id.as_deref().unwrap_or(""),
            f.code,
            f.message
        ));
        if let Some(loc) = &f.location {
            match &loc.slot {
                Some(slot) => out.push_str(&format!(" (`{}` via `{}`)", loc.path, slot)),
                None => out.push_str(&format!(" (`{}`)", loc.path)),
            }
        }
        out.push('\n');

        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}
