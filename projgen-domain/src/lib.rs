//! Domain logic: turn a resolved project graph into deterministic workspace schemes.
//!
//! This crate owns *what* gets generated. It does not own loading the graph or persisting the
//! result; that's the `projgen-core` crate.

mod coverage;
mod mappers;
mod synthesizer;

pub use coverage::{ResolvedCoverage, resolve_coverage};
pub use mappers::{
    AutogeneratedProjectSchemeMapper, GeneratorConfig, MappedGraph, SequentialWorkspaceMapper,
    WorkspaceMapper,
};
pub use synthesizer::{scheme_name, synthesize};
