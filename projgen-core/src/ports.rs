//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use projgen_graph::WorkspaceWithProjects;

/// Source of the resolved project graph.
pub trait GraphSource {
    fn load_graph(&self) -> anyhow::Result<WorkspaceWithProjects>;
}

/// File-system write operations.
///
/// Removal of a path that does not exist succeeds.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
    fn remove_file(&self, path: &Utf8Path) -> anyhow::Result<()>;
    fn remove_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
