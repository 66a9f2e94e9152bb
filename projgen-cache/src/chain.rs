use crate::error::CacheError;
use crate::provider::CacheStorageProvider;
use crate::storage::{CacheStorage, validate_hash};
use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Ordered chain of cache tiers.
///
/// Tiers are awaited one at a time in order. No tier after the first success is
/// queried, and dropping an in-flight future stops the walk.
#[derive(Clone, Default)]
pub struct Cache {
    storages: Vec<Arc<dyn CacheStorage>>,
}

impl Cache {
    pub fn new(storages: Vec<Arc<dyn CacheStorage>>) -> Self {
        Self { storages }
    }

    pub fn from_provider(provider: &dyn CacheStorageProvider) -> Result<Self, CacheError> {
        let storages = provider.storages()?;
        debug!(tiers = storages.len(), "cache chain assembled");
        Ok(Self::new(storages))
    }

    pub fn tier_names(&self) -> Vec<&str> {
        self.storages.iter().map(|s| s.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.storages.is_empty()
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("tiers", &self.tier_names())
            .finish()
    }
}

#[async_trait]
impl CacheStorage for Cache {
    fn name(&self) -> &str {
        "chain"
    }

    /// `true` at the first tier reporting the artifact. A failing tier counts as a miss.
    ///
    /// An invalid hash is an error before any tier is consulted.
    async fn exists(&self, hash: &str) -> Result<bool, CacheError> {
        validate_hash(hash)?;
        for storage in &self.storages {
            match storage.exists(hash).await {
                Ok(true) => {
                    debug!(tier = storage.name(), hash, "cache hit");
                    return Ok(true);
                }
                Ok(false) => debug!(tier = storage.name(), hash, "cache miss"),
                Err(err) => warn!(
                    tier = storage.name(),
                    hash,
                    error = %err,
                    "cache tier lookup failed, treating as miss"
                ),
            }
        }
        Ok(false)
    }

    /// First successful tier wins; otherwise the last tier's error is returned unchanged.
    async fn fetch(&self, hash: &str) -> Result<Utf8PathBuf, CacheError> {
        validate_hash(hash)?;
        let mut last_error = None;

        for storage in &self.storages {
            match storage.fetch(hash).await {
                Ok(location) => {
                    debug!(tier = storage.name(), hash, location = %location, "cache fetch");
                    return Ok(location);
                }
                Err(err) => {
                    debug!(tier = storage.name(), hash, error = %err, "cache fetch failed");
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CacheError::not_found(hash)))
    }

    /// Stores into every tier in order, stopping at the first failure.
    async fn store(&self, hash: &str, paths: &[Utf8PathBuf]) -> Result<(), CacheError> {
        validate_hash(hash)?;
        for storage in &self.storages {
            storage.store(hash, paths).await?;
            debug!(tier = storage.name(), hash, paths = paths.len(), "cache store");
        }
        Ok(())
    }
}
