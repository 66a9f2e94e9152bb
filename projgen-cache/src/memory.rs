use crate::error::CacheError;
use crate::storage::{CacheStorage, validate_hash};
use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Map-backed tier for embedding and testing.
///
/// Fetched locations are `<prefix>/<hash>`; nothing is written to disk.
#[derive(Debug)]
pub struct InMemoryCacheStorage {
    name: String,
    prefix: Utf8PathBuf,
    entries: Mutex<BTreeMap<String, Vec<Utf8PathBuf>>>,
}

impl InMemoryCacheStorage {
    pub fn new(name: impl Into<String>, prefix: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Pre-populates `hash` with no recorded paths.
    pub fn with_entry(self, hash: impl Into<String>) -> Self {
        self.lock().insert(hash.into(), Vec::new());
        self
    }

    /// Paths recorded by the last `store` for `hash`.
    pub fn stored_paths(&self, hash: &str) -> Option<Vec<Utf8PathBuf>> {
        self.lock().get(hash).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Vec<Utf8PathBuf>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryCacheStorage {
    fn default() -> Self {
        Self::new("memory", "memory")
    }
}

#[async_trait]
impl CacheStorage for InMemoryCacheStorage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, hash: &str) -> Result<bool, CacheError> {
        validate_hash(hash)?;
        Ok(self.lock().contains_key(hash))
    }

    async fn fetch(&self, hash: &str) -> Result<Utf8PathBuf, CacheError> {
        validate_hash(hash)?;
        if self.lock().contains_key(hash) {
            Ok(self.prefix.join(hash))
        } else {
            Err(CacheError::not_found(hash))
        }
    }

    async fn store(&self, hash: &str, paths: &[Utf8PathBuf]) -> Result<(), CacheError> {
        validate_hash(hash)?;
        self.lock().insert(hash.to_string(), paths.to_vec());
        Ok(())
    }
}
