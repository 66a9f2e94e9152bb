//! Shared value types (schemas-as-code) for the projgen project graph.
//!
//! # Design constraints
//! - Every type is plain immutable data; mappers produce new values instead of mutating inputs.
//! - These types are serialized to disk (graph input, generated workspace output).
//! - Prefer adding optional fields over changing semantics.

pub mod coverage;
pub mod platform;
pub mod report;
pub mod scheme;
pub mod side_effect;
pub mod target;
pub mod workspace;

pub use coverage::CodeCoverageMode;
pub use platform::{Platform, Product};
pub use scheme::{BuildAction, Scheme, TestAction, TestableTarget};
pub use side_effect::{DirectoryDescriptor, FileDescriptor, SideEffectDescriptor, SideEffectState};
pub use target::{Target, TargetDependency, TargetReference};
pub use workspace::{Project, Workspace, WorkspaceWithProjects};

/// Schema identifiers.
pub mod schema {
    pub const PROJGEN_GRAPH_V1: &str = "projgen.graph.v1";
    pub const PROJGEN_REPORT_V1: &str = "projgen.report.v1";
}
