use projgen_graph::{CodeCoverageMode, Project, TargetReference};
use std::collections::BTreeSet;
use tracing::debug;

/// Coverage settings for a generated test action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCoverage {
    pub coverage: bool,
    pub targets: Vec<TargetReference>,
}

impl ResolvedCoverage {
    fn disabled() -> Self {
        Self::default()
    }

    fn enabled(targets: Vec<TargetReference>) -> Self {
        Self {
            coverage: true,
            targets,
        }
    }
}

/// Computes `(coverage, code_coverage_targets)` for `mode`.
///
/// Only the projects' own schemes are consulted; schemes being generated never feed back in.
pub fn resolve_coverage(projects: &[Project], mode: &CodeCoverageMode) -> ResolvedCoverage {
    match mode {
        CodeCoverageMode::Disabled => ResolvedCoverage::disabled(),
        CodeCoverageMode::All => ResolvedCoverage::enabled(vec![]),
        CodeCoverageMode::Targets(targets) => ResolvedCoverage::enabled(targets.clone()),
        CodeCoverageMode::Relevant => {
            let relevant = relevant_targets(projects);
            if relevant.is_empty() {
                ResolvedCoverage::disabled()
            } else {
                ResolvedCoverage::enabled(relevant.into_iter().collect())
            }
        }
    }
}

fn relevant_targets(projects: &[Project]) -> BTreeSet<TargetReference> {
    let mut out = BTreeSet::new();

    for project in projects {
        for scheme in &project.schemes {
            let Some(test_action) = scheme.test_action.as_ref().filter(|t| t.coverage) else {
                continue;
            };

            if !test_action.code_coverage_targets.is_empty() {
                out.extend(test_action.code_coverage_targets.iter().cloned());
            } else if let Some(build_action) = &scheme.build_action {
                out.extend(build_action.targets.iter().cloned());
            }
        }
    }

    // Dangling references pass through untouched.
    let dangling = out
        .iter()
        .filter(|r| !declares_target(projects, r))
        .count();
    if dangling > 0 {
        debug!(dangling, "relevant coverage references targets no project declares");
    }

    out
}

fn declares_target(projects: &[Project], reference: &TargetReference) -> bool {
    projects
        .iter()
        .filter(|p| p.path == reference.project_path)
        .any(|p| p.targets.iter().any(|t| t.name == reference.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use projgen_graph::{BuildAction, Platform, Product, Scheme, Target, TestAction};

    fn scheme(build: &[TargetReference], coverage: bool, cover: &[TargetReference]) -> Scheme {
        let mut s = Scheme::new("S");
        s.build_action = Some(BuildAction {
            targets: build.to_vec(),
        });
        s.test_action = Some(TestAction {
            targets: vec![],
            coverage,
            code_coverage_targets: cover.to_vec(),
        });
        s
    }

    fn project(path: &str, names: &[&str], schemes: Vec<Scheme>) -> Project {
        Project::new(path, path.trim_start_matches('/'))
            .with_targets(
                names
                    .iter()
                    .map(|n| Target::new(*n, Platform::Ios, Product::Framework))
                    .collect(),
            )
            .with_schemes(schemes)
    }

    #[test]
    fn disabled_ignores_existing_schemes() {
        let b = TargetReference::new("/a", "B");
        let projects = vec![project("/a", &["B"], vec![scheme(&[], true, &[b])])];

        let resolved = resolve_coverage(&projects, &CodeCoverageMode::Disabled);
        assert_eq!(resolved, ResolvedCoverage::default());
    }

    #[test]
    fn explicit_targets_keep_given_order() {
        let z = TargetReference::new("/a", "Z");
        let a = TargetReference::new("/a", "A");
        let mode = CodeCoverageMode::Targets(vec![z.clone(), a.clone()]);

        let resolved = resolve_coverage(&[], &mode);
        assert!(resolved.coverage);
        assert_eq!(resolved.targets, vec![z, a]);
    }

    #[test]
    fn relevant_skips_schemes_without_coverage() {
        let b = TargetReference::new("/a", "B");
        let projects = vec![project(
            "/a",
            &["B"],
            vec![scheme(&[b.clone()], false, &[b.clone()])],
        )];

        let resolved = resolve_coverage(&projects, &CodeCoverageMode::Relevant);
        assert!(!resolved.coverage);
        assert!(resolved.targets.is_empty());
    }

    #[test]
    fn relevant_prefers_explicit_targets_over_build_action() {
        let a = TargetReference::new("/a", "A");
        let b = TargetReference::new("/a", "B");
        let projects = vec![project(
            "/a",
            &["A", "B"],
            vec![scheme(&[a.clone(), b.clone()], true, &[b.clone()])],
        )];

        let resolved = resolve_coverage(&projects, &CodeCoverageMode::Relevant);
        assert_eq!(resolved.targets, vec![b]);
    }

    #[test]
    fn relevant_deduplicates_and_sorts() {
        let a = TargetReference::new("/b", "A");
        let c = TargetReference::new("/a", "C");
        let projects = vec![
            project(
                "/a",
                &["C"],
                vec![
                    scheme(&[], true, &[a.clone(), c.clone()]),
                    scheme(&[c.clone()], true, &[]),
                ],
            ),
            project("/b", &["A"], vec![scheme(&[a.clone()], true, &[])]),
        ];

        let resolved = resolve_coverage(&projects, &CodeCoverageMode::Relevant);
        assert!(resolved.coverage);
        assert_eq!(resolved.targets, vec![c, a]);
    }

    #[test]
    fn relevant_keeps_dangling_references() {
        let gone = TargetReference::new("/a", "Removed");
        let projects = vec![project("/a", &["A"], vec![scheme(&[], true, &[gone.clone()])])];

        let resolved = resolve_coverage(&projects, &CodeCoverageMode::Relevant);
        assert!(resolved.coverage);
        assert_eq!(resolved.targets, vec![gone]);
    }

    #[test]
    fn relevant_with_coverage_but_no_build_action_contributes_nothing() {
        let mut s = Scheme::new("TestsOnly");
        s.test_action = Some(TestAction {
            coverage: true,
            ..Default::default()
        });
        let projects = vec![project("/a", &["A"], vec![s])];

        let resolved = resolve_coverage(&projects, &CodeCoverageMode::Relevant);
        assert!(!resolved.coverage);
    }
}
