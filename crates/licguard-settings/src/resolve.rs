use crate::{model::LicguardConfigV1, presets};
use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use licguard_domain::policy::{EffectiveConfig, FailOn, RootFilter};
use licguard_domain::walker::BreakPolicy;
use licguard_types::Severity;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_findings: Option<u32>,
    pub max_depth: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    /// Override inputs named by the config file, in declaration order.
    pub signoff_files: Vec<String>,
    pub license_compat_files: Vec<String>,
}

pub fn resolve_config(
    cfg: LicguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    if let Some(sev) = cfg.severity.as_deref() {
        effective.severity = parse_severity(sev)?;
    }

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    // walk options
    if let Some(depth) = overrides.max_depth.or(cfg.max_depth) {
        effective.walk.max_depth = depth;
    }
    if let Some(b) = cfg.break_on_incompatible.as_deref() {
        effective.walk.break_on_incompatible = parse_break(b)?;
    }
    if let Some(preference) = cfg.preference.clone() {
        effective.walk.preference = preference;
    }

    // root selection
    if let Some(roots) = cfg.roots.as_deref() {
        effective.roots = parse_roots(roots)?;
    }
    effective.paths.include = build_globset("include", &cfg.include)?;
    effective.paths.exclude = build_globset("exclude", &cfg.exclude)?;

    // fail_on override from config
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    Ok(ResolvedConfig {
        effective,
        signoff_files: cfg.signoff_files,
        license_compat_files: cfg.license_compat_files,
    })
}

fn build_globset(key: &str, patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid {key} glob: {pattern}"))?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .with_context(|| format!("failed to build {key} globs"))?;
    Ok(Some(set))
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}

fn parse_break(v: &str) -> anyhow::Result<BreakPolicy> {
    match v {
        "never" => Ok(BreakPolicy::Never),
        "first" => Ok(BreakPolicy::FirstIncompatible),
        other => {
            anyhow::bail!("unknown break_on_incompatible: {other} (expected never|first)")
        }
    }
}

fn parse_roots(v: &str) -> anyhow::Result<RootFilter> {
    match v {
        "with-deps" => Ok(RootFilter::WithDependencies),
        "all" => Ok(RootFilter::All),
        other => anyhow::bail!("unknown roots: {other} (expected with-deps|all)"),
    }
}
