use serde::{Deserialize, Serialize};

/// `licguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LicguardConfigV1 {
    /// Optional schema string for tooling (`licguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default), `warn`, or `quick`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// When to fail the check: `error` (default) or `warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// Severity of incompatibility findings: `info`, `warning`, `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// How many findings to emit before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_findings: Option<u32>,

    /// Walk depth cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,

    /// `never` or `first`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_on_incompatible: Option<String>,

    /// License provenance preference, most trusted first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<Vec<String>>,

    /// `with-deps` (default) or `all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roots: Option<String>,

    /// Globs on artifact full paths; when non-empty only matching roots are walked.
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    /// `LIBRARY,APPLICABLE` CSV files.
    #[serde(default)]
    pub signoff_files: Vec<String>,

    /// `LICENSE,COMPAT_LICENSE` CSV files.
    #[serde(default)]
    pub license_compat_files: Vec<String>,
}
