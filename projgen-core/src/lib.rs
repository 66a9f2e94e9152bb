//! Embeddable core library for projgen.
//!
//! Provides a clap-free, I/O-abstracted entry point for scheme generation.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`GraphSource`](ports::GraphSource) - load the resolved project graph
//! - [`WritePort`](ports::WritePort) - write and remove files and directories
//!
//! The [`adapters`] module provides default filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`run_generate`](pipeline::run_generate) - map the graph and build a report
//! - [`write_generate_artifacts`](pipeline::write_generate_artifacts) - persist the outcome

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the mapper surface so callers don't need projgen-domain directly.
pub use projgen_domain::{
    AutogeneratedProjectSchemeMapper, GeneratorConfig, SequentialWorkspaceMapper, WorkspaceMapper,
};
