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

impl RenderableVerdictStatus {
    pub fn label(self) -> &'static str {
        match self {
            RenderableVerdictStatus::Pass => "PASS",
            RenderableVerdictStatus::Warn => "WARN",
            RenderableVerdictStatus::Fail => "FAIL",
        }
    }
}

/// Policy, optional rule priority, optional field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableLocation {
    pub policy: String,
    pub priority: Option<u32>,
    pub field: Option<String>,
}

impl RenderableLocation {
    pub fn subject(&self) -> String {
        match self.priority {
            Some(p) => format!("priority {p}"),
            None => "policy".to_string(),
        }
    }
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

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableData {
    pub project: String,
    pub policy: String,
    pub region: Option<String>,
    pub rules_checked: u32,
    pub assertions_checked: u32,
    pub findings_emitted: u32,
    pub findings_total: u32,
    pub truncated_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub findings: Vec<RenderableFinding>,
    pub data: RenderableData,
}
