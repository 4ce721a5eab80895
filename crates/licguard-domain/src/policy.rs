use crate::walker::WalkOptions;
use globset::GlobSet;
use licguard_types::Severity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

/// Which artifacts are walked as roots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RootFilter {
    /// Only artifacts with at least one dependency edge.
    #[default]
    WithDependencies,
    All,
}

/// Include/exclude globs matched against an artifact's full path.
#[derive(Clone, Debug, Default)]
pub struct PathFilter {
    pub include: Option<GlobSet>,
    pub exclude: Option<GlobSet>,
}

impl PathFilter {
    pub fn matches(&self, full_path: &str) -> bool {
        if let Some(include) = &self.include
            && !include.is_match(full_path)
        {
            return false;
        }
        match &self.exclude {
            Some(exclude) => !exclude.is_match(full_path),
            None => true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    /// Severity assigned to every incompatibility finding.
    pub severity: Severity,
    pub fail_on: FailOn,
    pub max_findings: usize,
    pub walk: WalkOptions,
    pub roots: RootFilter,
    pub paths: PathFilter,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            severity: Severity::Error,
            fail_on: FailOn::Error,
            max_findings: 200,
            walk: WalkOptions::default(),
            roots: RootFilter::default(),
            paths: PathFilter::default(),
        }
    }
}
