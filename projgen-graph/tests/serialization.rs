use pretty_assertions::assert_eq;
use projgen_graph::{
    BuildAction, CodeCoverageMode, FileDescriptor, Platform, Product, Project, Scheme,
    SideEffectDescriptor, SideEffectState, Target, TargetDependency, TargetReference, TestAction,
    TestableTarget, Workspace, WorkspaceWithProjects,
};
use proptest::prelude::*;

#[test]
fn coverage_mode_serializes_adjacently_tagged() {
    assert_eq!(
        serde_json::to_value(CodeCoverageMode::Disabled).expect("serialize"),
        serde_json::json!({ "mode": "disabled" })
    );
    assert_eq!(
        serde_json::to_value(CodeCoverageMode::Relevant).expect("serialize"),
        serde_json::json!({ "mode": "relevant" })
    );

    let targets = CodeCoverageMode::Targets(vec![TargetReference::new("/ws/App", "Core")]);
    assert_eq!(
        serde_json::to_value(&targets).expect("serialize"),
        serde_json::json!({
            "mode": "targets",
            "targets": [{ "project_path": "/ws/App", "name": "Core" }]
        })
    );
}

#[test]
fn coverage_mode_defaults_to_disabled() {
    assert_eq!(CodeCoverageMode::default(), CodeCoverageMode::Disabled);
    assert!(CodeCoverageMode::default().is_disabled());
    assert_eq!(CodeCoverageMode::All.label(), "all");
}

#[test]
fn graph_document_parses_with_defaults() {
    let doc = serde_json::json!({
        "workspace": { "name": "Shop", "project_paths": ["/ws/App", "/ws/Kit"] },
        "projects": [
            {
                "path": "/ws/App",
                "name": "App",
                "targets": [
                    { "name": "App", "platform": "iOS", "product": "app" },
                    {
                        "name": "AppTests",
                        "platform": "iOS",
                        "product": "unit_tests",
                        "dependencies": [{ "type": "target", "name": "App" }]
                    }
                ],
                "schemes": [
                    {
                        "name": "App",
                        "shared": true,
                        "build_action": { "targets": [{ "project_path": "/ws/App", "name": "App" }] },
                        "test_action": { "coverage": true }
                    }
                ]
            },
            { "path": "/ws/Kit", "name": "Kit" }
        ]
    });

    let graph: WorkspaceWithProjects = serde_json::from_value(doc).expect("parse graph");

    assert_eq!(graph.workspace.name, "Shop");
    assert!(graph.workspace.schemes.is_empty());
    assert_eq!(graph.workspace.project_paths.len(), 2);
    assert_eq!(graph.projects.len(), 2);
    assert!(graph.projects[1].targets.is_empty());

    let tests = &graph.projects[0].targets[1];
    assert_eq!(tests.platform, Platform::Ios);
    assert_eq!(tests.product, Product::UnitTests);
    assert_eq!(
        tests.dependencies,
        vec![TargetDependency::Target {
            name: "App".to_string()
        }]
    );

    let scheme = &graph.projects[0].schemes[0];
    let test_action = scheme.test_action.as_ref().expect("test action");
    assert!(test_action.coverage);
    assert!(test_action.code_coverage_targets.is_empty());
    assert!(test_action.targets.is_empty());
}

#[test]
fn generated_scheme_shape_is_stable() {
    let app = TargetReference::new("/ws/App", "App");
    let tests = TargetReference::new("/ws/App", "AppTests");
    let scheme = Scheme {
        name: "Shop-Project".to_string(),
        shared: true,
        build_action: Some(BuildAction {
            targets: vec![app.clone(), tests.clone()],
        }),
        test_action: Some(TestAction {
            targets: vec![TestableTarget::new(tests)],
            coverage: false,
            code_coverage_targets: vec![],
        }),
    };

    let value = serde_json::to_value(&scheme).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "name": "Shop-Project",
            "shared": true,
            "build_action": {
                "targets": [
                    { "project_path": "/ws/App", "name": "App" },
                    { "project_path": "/ws/App", "name": "AppTests" }
                ]
            },
            "test_action": {
                "targets": [{ "target": { "project_path": "/ws/App", "name": "AppTests" } }],
                "coverage": false
            }
        })
    );
}

#[test]
fn side_effects_serialize_tagged() {
    let effect = SideEffectDescriptor::File(FileDescriptor {
        path: "/ws/Derived/Info.plist".into(),
        contents: None,
        state: SideEffectState::Absent,
    });
    let value = serde_json::to_value(&effect).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({ "type": "file", "path": "/ws/Derived/Info.plist", "state": "absent" })
    );
}

#[test]
fn project_reference_uses_project_path() {
    let target = Target::new("Kit", Platform::MacOs, Product::Framework);
    let project = Project::new("/ws/Kit", "Kit").with_targets(vec![target.clone()]);
    let graph = WorkspaceWithProjects::new(Workspace::new("ws"), vec![project.clone()]);

    let reference = project.reference(&target);
    assert_eq!(reference, TargetReference::new("/ws/Kit", "Kit"));
    assert_eq!(graph.target(&reference), Some(&target));
}

fn arb_reference() -> impl Strategy<Value = TargetReference> {
    (
        prop::string::string_regex(r"/[a-z]{1,6}(/[a-z]{1,6})?").unwrap(),
        prop::string::string_regex(r"[A-Z][A-Za-z]{0,8}").unwrap(),
    )
        .prop_map(|(path, name)| TargetReference::new(path, name))
}

proptest! {
    /// Sorted references are grouped by project path, then ordered by name within a project.
    #[test]
    fn reference_ordering_groups_by_project(refs in prop::collection::vec(arb_reference(), 0..12)) {
        let mut sorted = refs;
        sorted.sort();

        for pair in sorted.windows(2) {
            prop_assert!(pair[0].project_path <= pair[1].project_path);
            if pair[0].project_path == pair[1].project_path {
                prop_assert!(pair[0].name <= pair[1].name);
            }
        }
    }
}
