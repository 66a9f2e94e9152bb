use crate::coverage::resolve_coverage;
use projgen_graph::{
    BuildAction, CodeCoverageMode, Platform, Project, Scheme, SideEffectDescriptor, Target,
    TestAction, TestableTarget, Workspace, WorkspaceWithProjects,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Builds one shared scheme per platform found in `graph`.
///
/// The returned workspace is a copy of `graph.workspace` with `schemes` replaced. No side effects
/// are produced at this stage.
pub fn synthesize(
    graph: &WorkspaceWithProjects,
    mode: &CodeCoverageMode,
) -> (Workspace, Vec<SideEffectDescriptor>) {
    let platforms: BTreeSet<Platform> = graph
        .projects
        .iter()
        .flat_map(|p| p.targets.iter().map(|t| t.platform))
        .collect();

    let coverage = resolve_coverage(&graph.projects, mode);
    let single_platform = platforms.len() == 1;

    let schemes: Vec<Scheme> = platforms
        .into_iter()
        .map(|platform| {
            let selected = platform_targets(&graph.projects, platform);

            let build_action = BuildAction {
                targets: selected.iter().map(|(p, t)| p.reference(t)).collect(),
            };
            let test_action = TestAction {
                targets: selected
                    .iter()
                    .filter(|(_, t)| t.is_test())
                    .map(|(p, t)| TestableTarget::new(p.reference(t)))
                    .collect(),
                coverage: coverage.coverage,
                code_coverage_targets: coverage.targets.clone(),
            };

            let name = scheme_name(&graph.workspace.name, platform, single_platform);
            debug!(
                scheme = %name,
                build_targets = build_action.targets.len(),
                test_targets = test_action.targets.len(),
                "synthesized scheme"
            );

            Scheme {
                name,
                shared: true,
                build_action: Some(build_action),
                test_action: Some(test_action),
            }
        })
        .collect();

    let mut workspace = graph.workspace.clone();
    workspace.schemes = schemes;
    (workspace, vec![])
}

/// `<workspace>-Project`, or `<workspace>-Project-<platform>` when several platforms exist.
pub fn scheme_name(workspace_name: &str, platform: Platform, single_platform: bool) -> String {
    if single_platform {
        format!("{}-Project", workspace_name)
    } else {
        format!("{}-Project-{}", workspace_name, platform.identifier())
    }
}

/// Targets of `platform` across all projects, ordered by target name.
///
/// Project order does not matter; equal names are ordered by project path.
fn platform_targets(projects: &[Project], platform: Platform) -> Vec<(&Project, &Target)> {
    let mut selected: Vec<(&Project, &Target)> = projects
        .iter()
        .flat_map(|p| {
            p.targets
                .iter()
                .filter(move |t| t.platform == platform)
                .map(move |t| (p, t))
        })
        .collect();

    selected.sort_by(|(pa, a), (pb, b)| a.name.cmp(&b.name).then_with(|| pa.path.cmp(&pb.path)));
    selected.dedup_by(|(pa, a), (pb, b)| a.name == b.name && pa.path == pb.path);
    selected
}
