//! Artifact cache for projgen.
//!
//! A [`Cache`] is an ordered chain of [`CacheStorage`] tiers, typically local
//! first and remote last. Lookups walk the chain left to right and stop at the
//! first tier that has the artifact; fetches fall back to the next tier when one
//! fails and surface the last tier's error when none succeed.
//!
//! The chain is itself a [`CacheStorage`], so chains can be nested.

mod chain;
mod error;
mod fs_storage;
mod memory;
mod provider;
mod storage;

pub use chain::Cache;
pub use error::CacheError;
pub use fs_storage::FsCacheStorage;
pub use memory::InMemoryCacheStorage;
pub use provider::{CacheStorageProvider, DirectoryStorageProvider, StaticStorageProvider};
pub use storage::{CacheStorage, validate_hash};
