use crate::compat::OverrideTable;
use crate::fingerprint::fingerprint_for_edge;
use crate::model::Artifact;
use crate::policy::{EffectiveConfig, FailOn, PathFilter, RootFilter};
use crate::report::{DomainReport, SeverityCounts};
use crate::store::{FactStore, node_names};
use crate::walker::{TraversalResult, parent_indices, walk};
use licguard_types::ids::{
    CHECK_LICENSE_COMPATIBILITY, CODE_INCOMPATIBLE_LICENSE, CODE_UNRESOLVED_LICENSE, is_sentinel,
};
use licguard_types::{Finding, LicguardData, Location, RootSummary, Severity, Verdict};
use std::collections::HashSet;

/// Artifacts to walk as roots, in store order.
pub fn select_roots<'s, S: FactStore + ?Sized>(
    store: &'s S,
    filter: RootFilter,
    paths: &PathFilter,
) -> Vec<&'s Artifact> {
    store
        .artifacts()
        .into_iter()
        .filter(|a| match filter {
            RootFilter::WithDependencies => !a.needs.is_empty(),
            RootFilter::All => true,
        })
        .filter(|a| paths.matches(&a.full_path))
        .collect()
}

pub fn evaluate<S: FactStore + ?Sized>(
    store: &S,
    overrides: &OverrideTable,
    cfg: &EffectiveConfig,
) -> DomainReport {
    let roots = select_roots(store, cfg.roots, &cfg.paths);
    tracing::debug!(roots = roots.len(), profile = %cfg.profile, "evaluating roots");

    let mut findings: Vec<Finding> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut summaries = Vec::with_capacity(roots.len());

    for root in &roots {
        let results = walk(store, root.id, overrides, &cfg.walk);
        collect_edge_findings(store, root, &results, cfg.severity, &mut seen, &mut findings);

        if let Some(top) = results.last() {
            summaries.push(RootSummary {
                artifact: root.basename.clone(),
                full_path: root.full_path.clone(),
                license: top.license.clone(),
                compatible: top.compatible,
                incompatible_licenses: top.incompatible_licenses.clone(),
            });
        }
    }

    // Deterministic ordering before truncation.
    findings.sort_by(compare_findings);

    let total = findings.len() as u32;

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let verdict = compute_verdict(&emitted, cfg.fail_on);
    let counts = SeverityCounts::from_findings(&emitted);

    let data = LicguardData {
        profile: cfg.profile.clone(),
        artifacts_scanned: store.artifacts().len() as u32,
        slots_scanned: store.slots().len() as u32,
        roots_evaluated: roots.len() as u32,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        truncated_reason,
        roots: summaries,
    };

    DomainReport {
        verdict,
        findings: emitted,
        data,
        counts,
    }
}

fn collect_edge_findings<S: FactStore + ?Sized>(
    store: &S,
    root: &Artifact,
    results: &[TraversalResult],
    severity: Severity,
    seen: &mut HashSet<String>,
    out: &mut Vec<Finding>,
) {
    let parents = parent_indices(results);
    for (child, parent) in results.iter().zip(parents) {
        let Some(parent) = parent.map(|i| &results[i]) else {
            continue;
        };
        if !child.culprit {
            continue;
        }

        let (parent_name, parent_path) = node_names(store, parent.node);
        let (child_name, child_path) = node_names(store, child.node);
        let slot = child
            .via
            .and_then(|id| store.slot(id))
            .map(|s| s.name.clone());

        let code = if is_sentinel(&parent.license) || is_sentinel(&child.license) {
            CODE_UNRESOLVED_LICENSE
        } else {
            CODE_INCOMPATIBLE_LICENSE
        };
        let fingerprint = fingerprint_for_edge(
            CHECK_LICENSE_COMPATIBILITY,
            code,
            &parent_path,
            &child_name,
            &child.license,
        );
        if !seen.insert(fingerprint.clone()) {
            continue;
        }

        out.push(Finding {
            severity,
            check_id: CHECK_LICENSE_COMPATIBILITY.to_string(),
            code: code.to_string(),
            message: format!(
                "{parent_name} ({}) depends on {child_name} ({}), which is not compatible",
                parent.license, child.license
            ),
            location: Some(Location {
                path: parent_path.clone(),
                slot: slot.clone(),
            }),
            help: Some(help_for(code, &parent.license, &child.license)),
            fingerprint: Some(fingerprint),
            data: serde_json::json!({
                "root": root.full_path,
                "parent": parent_path,
                "parent_license": parent.license,
                "child": child_name,
                "child_path": child_path,
                "child_license": child.license,
                "slot": slot,
            }),
        });
    }
}

fn help_for(code: &str, parent_license: &str, child_license: &str) -> String {
    if code == CODE_UNRESOLVED_LICENSE {
        "Record a license for the unresolved artifact, or sign off the library.".to_string()
    } else {
        format!(
            "Replace the dependency, or after review add `{parent_license},{child_license}` to a license compat file."
        )
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) location.path (missing last)
    // 3) location.slot (missing last)
    // 4) check_id
    // 5) code
    // 6) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };
    let key = |f: &Finding| -> (String, String) {
        match &f.location {
            Some(l) => (
                l.path.clone(),
                l.slot.clone().unwrap_or_else(|| "~".to_string()),
            ),
            None => ("~".to_string(), "~".to_string()),
        }
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then_with(|| key(a).cmp(&key(b)))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}
