use crate::synthesizer::synthesize;
use anyhow::Context;
use projgen_graph::{CodeCoverageMode, SideEffectDescriptor, WorkspaceWithProjects};
use tracing::debug;

/// Result of mapping a graph: the new graph plus side effects for the persistence stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedGraph {
    pub graph: WorkspaceWithProjects,
    pub side_effects: Vec<SideEffectDescriptor>,
}

/// A pure transformation over the resolved graph.
pub trait WorkspaceMapper {
    fn name(&self) -> &'static str;

    fn map(&self, graph: WorkspaceWithProjects) -> anyhow::Result<MappedGraph>;
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub code_coverage_mode: CodeCoverageMode,
    pub autogenerate_schemes: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            code_coverage_mode: CodeCoverageMode::Disabled,
            autogenerate_schemes: true,
        }
    }
}

/// Replaces the workspace schemes with one autogenerated scheme per platform.
#[derive(Debug, Clone, Default)]
pub struct AutogeneratedProjectSchemeMapper {
    code_coverage_mode: CodeCoverageMode,
}

impl AutogeneratedProjectSchemeMapper {
    pub fn new(code_coverage_mode: CodeCoverageMode) -> Self {
        Self { code_coverage_mode }
    }
}

impl WorkspaceMapper for AutogeneratedProjectSchemeMapper {
    fn name(&self) -> &'static str {
        "autogenerated_project_schemes"
    }

    fn map(&self, graph: WorkspaceWithProjects) -> anyhow::Result<MappedGraph> {
        let (workspace, side_effects) = synthesize(&graph, &self.code_coverage_mode);
        Ok(MappedGraph {
            graph: WorkspaceWithProjects {
                workspace,
                projects: graph.projects,
            },
            side_effects,
        })
    }
}

/// Runs mappers in order, threading the graph through and concatenating side effects.
pub struct SequentialWorkspaceMapper {
    mappers: Vec<Box<dyn WorkspaceMapper>>,
}

impl SequentialWorkspaceMapper {
    pub fn new(mappers: Vec<Box<dyn WorkspaceMapper>>) -> Self {
        Self { mappers }
    }

    /// The built-in mapper chain for `config`.
    pub fn builtin(config: &GeneratorConfig) -> Self {
        let mut mappers: Vec<Box<dyn WorkspaceMapper>> = Vec::new();
        if config.autogenerate_schemes {
            mappers.push(Box::new(AutogeneratedProjectSchemeMapper::new(
                config.code_coverage_mode.clone(),
            )));
        }
        Self::new(mappers)
    }

    pub fn mapper_names(&self) -> Vec<&'static str> {
        self.mappers.iter().map(|m| m.name()).collect()
    }
}

impl WorkspaceMapper for SequentialWorkspaceMapper {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn map(&self, graph: WorkspaceWithProjects) -> anyhow::Result<MappedGraph> {
        let mut graph = graph;
        let mut side_effects = Vec::new();

        for mapper in &self.mappers {
            let mut mapped = mapper
                .map(graph)
                .with_context(|| format!("mapper {}", mapper.name()))?;
            debug!(
                mapper = mapper.name(),
                side_effects = mapped.side_effects.len(),
                "mapped workspace"
            );
            side_effects.append(&mut mapped.side_effects);
            graph = mapped.graph;
        }

        Ok(MappedGraph {
            graph,
            side_effects,
        })
    }
}
