use crate::scheme::Scheme;
use crate::target::{Target, TargetReference};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Top-level container aggregating projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub name: String,

    /// Workspace-level schemes. Autogenerated schemes replace this list.
    #[serde(default)]
    pub schemes: Vec<Scheme>,

    #[serde(default)]
    pub project_paths: BTreeSet<Utf8PathBuf>,
}

impl Workspace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schemes: vec![],
            project_paths: BTreeSet::new(),
        }
    }

    pub fn with_project_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        self.project_paths = paths.into_iter().map(Into::into).collect();
        self
    }
}

/// A named collection of targets and author-defined schemes, identified by its path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub path: Utf8PathBuf,
    pub name: String,

    #[serde(default)]
    pub targets: Vec<Target>,

    /// Pre-existing schemes authored in the project's manifest.
    #[serde(default)]
    pub schemes: Vec<Scheme>,
}

impl Project {
    pub fn new(path: impl Into<Utf8PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            targets: vec![],
            schemes: vec![],
        }
    }

    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_schemes(mut self, schemes: Vec<Scheme>) -> Self {
        self.schemes = schemes;
        self
    }

    pub fn reference(&self, target: &Target) -> TargetReference {
        TargetReference::new(self.path.clone(), target.name.clone())
    }
}

/// A workspace together with every project reachable from its project paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceWithProjects {
    pub workspace: Workspace,

    #[serde(default)]
    pub projects: Vec<Project>,
}

impl WorkspaceWithProjects {
    pub fn new(workspace: Workspace, projects: Vec<Project>) -> Self {
        Self {
            workspace,
            projects,
        }
    }

    pub fn project(&self, path: &Utf8Path) -> Option<&Project> {
        self.projects.iter().find(|p| p.path == path)
    }

    /// Resolves a reference to the target it addresses, if any project declares it.
    pub fn target(&self, reference: &TargetReference) -> Option<&Target> {
        self.project(&reference.project_path)?
            .targets
            .iter()
            .find(|t| t.name == reference.name)
    }
}
