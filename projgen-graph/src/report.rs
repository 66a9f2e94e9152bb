use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one generation run, written next to the generated workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    pub workspace: String,
    pub code_coverage: String,

    #[serde(default)]
    pub schemes: Vec<SchemeSummary>,

    #[serde(default)]
    pub side_effects: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeSummary {
    pub name: String,
    pub build_targets: u64,
    pub test_targets: u64,
    pub coverage: bool,
    pub code_coverage_targets: u64,
}
