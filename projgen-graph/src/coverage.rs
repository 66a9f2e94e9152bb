use crate::target::TargetReference;
use serde::{Deserialize, Serialize};

/// Code coverage policy applied to autogenerated test actions.
///
/// - disabled: no coverage data is gathered
/// - all: coverage for everything the build action produces
/// - relevant: union of what the projects' own schemes already cover
/// - targets: exactly the listed targets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "targets", rename_all = "snake_case")]
pub enum CodeCoverageMode {
    #[default]
    Disabled,
    All,
    Relevant,
    Targets(Vec<TargetReference>),
}

impl CodeCoverageMode {
    pub fn is_disabled(&self) -> bool {
        matches!(self, CodeCoverageMode::Disabled)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CodeCoverageMode::Disabled => "disabled",
            CodeCoverageMode::All => "all",
            CodeCoverageMode::Relevant => "relevant",
            CodeCoverageMode::Targets(_) => "targets",
        }
    }
}
