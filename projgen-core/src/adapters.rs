//! Default filesystem-backed port implementations.

use crate::ports::{GraphSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use projgen_graph::WorkspaceWithProjects;
use projgen_graph::schema::PROJGEN_GRAPH_V1;
use std::io::ErrorKind;
use tracing::debug;

/// Reads a JSON-serialized graph document from disk.
///
/// A top-level `schema` field is optional; when present it must be `projgen.graph.v1`.
#[derive(Debug, Clone)]
pub struct FsGraphSource {
    pub path: Utf8PathBuf,
}

impl FsGraphSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl GraphSource for FsGraphSource {
    fn load_graph(&self) -> anyhow::Result<WorkspaceWithProjects> {
        let raw = fs::read_to_string(&self.path)?;
        let doc: serde_json::Value =
            serde_json::from_str(&raw).with_context(|| format!("parse {}", self.path))?;

        if let Some(schema) = doc.get("schema") {
            let schema = schema.as_str().unwrap_or_default();
            anyhow::ensure!(
                schema == PROJGEN_GRAPH_V1,
                "unsupported graph schema {:?} in {} (expected {})",
                schema,
                self.path,
                PROJGEN_GRAPH_V1
            );
        }

        let graph: WorkspaceWithProjects = serde_json::from_value(doc)
            .with_context(|| format!("decode graph from {}", self.path))?;
        debug!(
            path = %self.path,
            projects = graph.projects.len(),
            "loaded graph"
        );
        Ok(graph)
    }
}

/// In-memory graph source for embedding and testing.
#[derive(Debug, Clone)]
pub struct InMemoryGraphSource {
    graph: WorkspaceWithProjects,
}

impl InMemoryGraphSource {
    pub fn new(graph: WorkspaceWithProjects) -> Self {
        Self { graph }
    }
}

impl GraphSource for InMemoryGraphSource {
    fn load_graph(&self) -> anyhow::Result<WorkspaceWithProjects> {
        Ok(self.graph.clone())
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    fn remove_file(&self, path: &Utf8Path) -> anyhow::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn remove_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        match fs::remove_dir_all(path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
