//! Stable identifiers for checks, finding codes, and license sentinels.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_LICENSE_COMPATIBILITY: &str = "license.compatibility";

// Codes: license.compatibility
pub const CODE_INCOMPATIBLE_LICENSE: &str = "incompatible_license";
pub const CODE_UNRESOLVED_LICENSE: &str = "unresolved_license";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

// Sentinels returned when no license tag can be resolved. They take part in
// compatibility checks like any other license string.
pub const LICENSE_NOT_FOUND_ARTIFACT: &str = "LICENSE_NOT_FOUND_ARTIFACT";
pub const LICENSE_NOT_FOUND_LIBRARY: &str = "LICENSE_NOT_FOUND_LIBRARY";

// License tag provenance kinds.
pub const PROVENANCE_MANUAL: &str = "manual";
pub const PROVENANCE_PACKAGE_MANAGER: &str = "package-manager";

// Free-form artifact tags shown by the browser.
pub const TAG_SIGNOFF: &str = "SIGNOFF";
pub const TAG_COMMENT: &str = "COMMENT";

/// True for either of the unresolved-license sentinels.
pub fn is_sentinel(license: &str) -> bool {
    license == LICENSE_NOT_FOUND_ARTIFACT || license == LICENSE_NOT_FOUND_LIBRARY
}

/// Default provenance preference used by the license resolver.
pub fn default_preference() -> Vec<String> {
    vec![
        PROVENANCE_MANUAL.to_string(),
        PROVENANCE_PACKAGE_MANAGER.to_string(),
    ]
}
