use crate::platform::{Platform, Product};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A buildable unit inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub platform: Platform,
    pub product: Product,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TargetDependency>,
}

impl Target {
    pub fn new(name: impl Into<String>, platform: Platform, product: Product) -> Self {
        Self {
            name: name.into(),
            platform,
            product,
            dependencies: vec![],
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<TargetDependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn is_test(&self) -> bool {
        self.product.is_test()
    }
}

/// Dependency edge declared by a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TargetDependency {
    /// Target in the same project.
    Target { name: String },
    /// Target in another project of the workspace.
    Project { target: String, path: Utf8PathBuf },
    /// Precompiled framework on disk.
    Framework { path: Utf8PathBuf },
    /// Precompiled library on disk.
    Library { path: Utf8PathBuf },
    /// Product of a resolved package.
    Package { product: String },
    /// System SDK.
    Sdk { name: String },
}

/// Addresses a target from outside its owning project.
///
/// Ordering is `(project_path, name)`, which is the order used for every sorted reference set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetReference {
    pub project_path: Utf8PathBuf,
    pub name: String,
}

impl TargetReference {
    pub fn new(project_path: impl Into<Utf8PathBuf>, name: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            name: name.into(),
        }
    }
}
