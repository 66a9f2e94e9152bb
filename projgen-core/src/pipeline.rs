//! Generate pipeline, extracted from the CLI.
//!
//! These entry points are I/O-agnostic: the graph is loaded and artifacts are
//! written through the port traits.

use crate::ports::{GraphSource, WritePort};
use crate::settings::GenerateSettings;
use anyhow::Context;
use camino::Utf8Path;
use chrono::Utc;
use projgen_domain::WorkspaceMapper;
use projgen_graph::report::{GenerationReport, RunInfo, SchemeSummary, ToolInfo};
use projgen_graph::schema::{PROJGEN_GRAPH_V1, PROJGEN_REPORT_V1};
use projgen_graph::{
    SideEffectDescriptor, SideEffectState, Workspace, WorkspaceWithProjects,
};
use projgen_render::{render_report_md, render_schemes_md};
use tracing::debug;

/// Error type for `run_generate`, naming the stage that failed.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("load graph: {0:#}")]
    GraphLoad(#[source] anyhow::Error),
    #[error("map workspace: {0:#}")]
    Mapping(#[source] anyhow::Error),
}

/// Outcome of `run_generate`.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub graph: WorkspaceWithProjects,
    pub side_effects: Vec<SideEffectDescriptor>,
    pub report: GenerationReport,
}

/// Run the generate pipeline: load the graph, map it, and summarize the result.
///
/// The caller is responsible for persisting the outcome (via `WritePort`) or the
/// convenience `write_generate_artifacts` helper.
pub fn run_generate(
    settings: &GenerateSettings,
    graph_source: &dyn GraphSource,
    mapper: &dyn WorkspaceMapper,
    tool: ToolInfo,
) -> Result<GenerateOutcome, ToolError> {
    let started_at = Utc::now();

    let graph = graph_source.load_graph().map_err(ToolError::GraphLoad)?;
    debug!(
        workspace = %graph.workspace.name,
        projects = graph.projects.len(),
        mapper = mapper.name(),
        "generating"
    );

    let mapped = mapper.map(graph).map_err(ToolError::Mapping)?;

    let report = GenerationReport {
        schema: PROJGEN_REPORT_V1.to_string(),
        tool,
        run: RunInfo {
            started_at: Some(started_at),
            ended_at: Some(Utc::now()),
        },
        workspace: mapped.graph.workspace.name.clone(),
        code_coverage: settings.code_coverage_mode.label().to_string(),
        schemes: summarize_schemes(&mapped.graph.workspace),
        side_effects: mapped.side_effects.len() as u64,
    };

    Ok(GenerateOutcome {
        graph: mapped.graph,
        side_effects: mapped.side_effects,
        report,
    })
}

fn summarize_schemes(workspace: &Workspace) -> Vec<SchemeSummary> {
    workspace
        .schemes
        .iter()
        .map(|s| {
            let test = s.test_action.as_ref();
            SchemeSummary {
                name: s.name.clone(),
                build_targets: s.build_action.as_ref().map_or(0, |b| b.targets.len()) as u64,
                test_targets: test.map_or(0, |t| t.targets.len()) as u64,
                coverage: test.is_some_and(|t| t.coverage),
                code_coverage_targets: test.map_or(0, |t| t.code_coverage_targets.len()) as u64,
            }
        })
        .collect()
}

/// Write all generate artifacts to the output directory, then apply side effects.
pub fn write_generate_artifacts(
    outcome: &GenerateOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let mut graph_doc = serde_json::to_value(&outcome.graph).context("serialize workspace")?;
    if let Some(obj) = graph_doc.as_object_mut() {
        obj.insert("schema".to_string(), PROJGEN_GRAPH_V1.into());
    }
    let graph_json = serde_json::to_string_pretty(&graph_doc).context("serialize workspace")?;
    writer.write_file(&out_dir.join("workspace.json"), graph_json.as_bytes())?;

    let schemes_md = render_schemes_md(&outcome.graph.workspace);
    writer.write_file(&out_dir.join("schemes.md"), schemes_md.as_bytes())?;

    let report_json = serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), report_json.as_bytes())?;

    let report_md = render_report_md(&outcome.report);
    writer.write_file(&out_dir.join("report.md"), report_md.as_bytes())?;

    apply_side_effects(&outcome.side_effects, writer)
}

/// Apply side effects in order.
pub fn apply_side_effects(
    side_effects: &[SideEffectDescriptor],
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    for effect in side_effects {
        match effect {
            SideEffectDescriptor::File(file) => match file.state {
                SideEffectState::Present => writer
                    .write_file(&file.path, file.contents.as_deref().unwrap_or_default())
                    .with_context(|| format!("write side effect {}", file.path))?,
                SideEffectState::Absent => writer
                    .remove_file(&file.path)
                    .with_context(|| format!("remove side effect {}", file.path))?,
            },
            SideEffectDescriptor::Directory(dir) => match dir.state {
                SideEffectState::Present => writer
                    .create_dir_all(&dir.path)
                    .with_context(|| format!("create side effect {}", dir.path))?,
                SideEffectState::Absent => writer
                    .remove_dir_all(&dir.path)
                    .with_context(|| format!("remove side effect {}", dir.path))?,
            },
        }
    }

    debug!(count = side_effects.len(), "applied side effects");
    Ok(())
}
