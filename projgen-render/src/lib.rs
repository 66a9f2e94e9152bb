//! Rendering helpers (markdown) for human-readable artifacts.

use projgen_graph::report::GenerationReport;
use projgen_graph::{Scheme, TargetReference, Workspace};

pub fn render_schemes_md(workspace: &Workspace) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {} schemes\n\n", workspace.name));
    out.push_str(&format!("- Schemes: {}\n", workspace.schemes.len()));
    out.push_str(&format!("- Projects: {}\n\n", workspace.project_paths.len()));

    if workspace.schemes.is_empty() {
        out.push_str("_No schemes generated._\n");
        return out;
    }

    for scheme in &workspace.schemes {
        render_scheme(&mut out, scheme);
    }

    out
}

fn render_scheme(out: &mut String, scheme: &Scheme) {
    out.push_str(&format!("## {}\n\n", scheme.name));
    out.push_str(&format!("- Shared: `{}`\n", scheme.shared));

    if let Some(build) = &scheme.build_action {
        out.push_str(&format!("- Build targets: {}\n", build.targets.len()));
    }

    let Some(test) = &scheme.test_action else {
        out.push('\n');
        return;
    };
    out.push_str(&format!("- Test targets: {}\n", test.targets.len()));
    out.push_str(&format!("- Coverage: `{}`\n", coverage_label(test.coverage)));

    if let Some(build) = &scheme.build_action
        && !build.targets.is_empty()
    {
        out.push_str("\n**Build**\n\n");
        for target in &build.targets {
            out.push_str(&format!("- {}\n", reference_label(target)));
        }
    }

    if !test.targets.is_empty() {
        out.push_str("\n**Test**\n\n");
        for testable in &test.targets {
            out.push_str(&format!("- {}\n", reference_label(&testable.target)));
        }
    }

    if !test.code_coverage_targets.is_empty() {
        out.push_str("\n**Coverage targets**\n\n");
        for target in &test.code_coverage_targets {
            out.push_str(&format!("- {}\n", reference_label(target)));
        }
    }

    out.push('\n');
}

pub fn render_report_md(report: &GenerationReport) -> String {
    let mut out = String::new();
    out.push_str("# projgen generate\n\n");
    out.push_str(&format!("- Workspace: `{}`\n", report.workspace));
    out.push_str(&format!("- Code coverage: `{}`\n", report.code_coverage));
    out.push_str(&format!("- Schemes: {}\n", report.schemes.len()));
    out.push_str(&format!("- Side effects: {}\n\n", report.side_effects));

    if report.schemes.is_empty() {
        return out;
    }

    out.push_str("| Scheme | Build | Test | Coverage |\n");
    out.push_str("|---|---:|---:|---|\n");
    for s in &report.schemes {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            s.name,
            s.build_targets,
            s.test_targets,
            coverage_label(s.coverage)
        ));
    }

    out
}

fn reference_label(r: &TargetReference) -> String {
    format!("`{}` ({})", r.name, r.project_path)
}

fn coverage_label(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
