use crate::error::CacheError;
use crate::fs_storage::FsCacheStorage;
use crate::storage::CacheStorage;
use camino::Utf8PathBuf;
use std::sync::Arc;

/// Supplies the ordered tier list for a [`Cache`](crate::Cache).
pub trait CacheStorageProvider: Send + Sync {
    fn storages(&self) -> Result<Vec<Arc<dyn CacheStorage>>, CacheError>;
}

/// A fixed, pre-built tier list.
#[derive(Clone, Default)]
pub struct StaticStorageProvider {
    storages: Vec<Arc<dyn CacheStorage>>,
}

impl StaticStorageProvider {
    pub fn new(storages: Vec<Arc<dyn CacheStorage>>) -> Self {
        Self { storages }
    }
}

impl CacheStorageProvider for StaticStorageProvider {
    fn storages(&self) -> Result<Vec<Arc<dyn CacheStorage>>, CacheError> {
        Ok(self.storages.clone())
    }
}

/// One [`FsCacheStorage`] per directory, in the given order.
#[derive(Debug, Clone)]
pub struct DirectoryStorageProvider {
    dirs: Vec<Utf8PathBuf>,
}

impl DirectoryStorageProvider {
    pub fn new(dirs: Vec<Utf8PathBuf>) -> Self {
        Self { dirs }
    }
}

impl CacheStorageProvider for DirectoryStorageProvider {
    fn storages(&self) -> Result<Vec<Arc<dyn CacheStorage>>, CacheError> {
        Ok(self
            .dirs
            .iter()
            .map(|dir| Arc::new(FsCacheStorage::new(dir.clone())) as Arc<dyn CacheStorage>)
            .collect())
    }
}
