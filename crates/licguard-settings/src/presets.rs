use licguard_domain::policy::{EffectiveConfig, FailOn};
use licguard_domain::walker::{BreakPolicy, WalkOptions};
use licguard_types::Severity;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        "quick" => quick_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        severity: Severity::Error,
        fail_on: FailOn::Error,
        ..EffectiveConfig::default()
    }
}

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        severity: Severity::Warning,
        fail_on: FailOn::Warning,
        ..EffectiveConfig::default()
    }
}

fn quick_profile() -> EffectiveConfig {
    // One culprit per root, then unwind.
    EffectiveConfig {
        profile: "quick".to_string(),
        severity: Severity::Error,
        fail_on: FailOn::Error,
        walk: WalkOptions {
            break_on_incompatible: BreakPolicy::FirstIncompatible,
            ..WalkOptions::default()
        },
        ..EffectiveConfig::default()
    }
}
