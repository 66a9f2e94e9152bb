use crate::target::TargetReference;
use serde::{Deserialize, Serialize};

/// A named build/test configuration referencing targets across projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,

    #[serde(default)]
    pub shared: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_action: Option<BuildAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_action: Option<TestAction>,
}

impl Scheme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shared: false,
            build_action: None,
            test_action: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildAction {
    #[serde(default)]
    pub targets: Vec<TargetReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestAction {
    #[serde(default)]
    pub targets: Vec<TestableTarget>,

    #[serde(default)]
    pub coverage: bool,

    /// Empty with `coverage == true` means "everything the build action produces".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_coverage_targets: Vec<TargetReference>,
}

/// Test target entry of a test action.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TestableTarget {
    pub target: TargetReference,
}

impl TestableTarget {
    pub fn new(target: TargetReference) -> Self {
        Self { target }
    }
}
