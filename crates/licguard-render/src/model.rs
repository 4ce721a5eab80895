#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableLocation {
    pub path: String,
    pub slot: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub severity: RenderableSeverity,
    pub check_id: Option<String>,
    pub code: String,
    pub message: String,
    pub location: Option<RenderableLocation>,
    pub help: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRoot {
    pub artifact: String,
    pub full_path: String,
    pub license: String,
    pub compatible: bool,
    pub incompatible_licenses: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub profile: String,
    pub roots_evaluated: u32,
    pub findings_emitted: u32,
    pub findings_total: u32,
    pub truncated_reason: Option<String>,
    pub roots: Vec<RenderableRoot>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub findings: Vec<RenderableFinding>,
    pub data: RenderableData,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableNodeStatus {
    Ok,
    Culprit,
    Incompatible,
}

impl RenderableNodeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderableNodeStatus::Ok => "ok",
            RenderableNodeStatus::Culprit => "culprit",
            RenderableNodeStatus::Incompatible => "incompatible",
        }
    }
}

/// One walk record, in the walker's deepest-first order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableTreeNode {
    pub level: u32,
    pub name: String,
    pub full_path: String,
    pub license: String,
    pub status: RenderableNodeStatus,
    pub incompatible_licenses: Vec<String>,
    pub reused: bool,
}
