use crate::error::CacheError;
use crate::storage::{CacheStorage, validate_hash};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::ErrorKind;
use std::path::Path;
use tempfile::TempDir;
use tokio::fs;
use tracing::debug;

const PUBLISH_ATTEMPTS: usize = 3;

/// Local directory tier. The artifact for `hash` lives at `<root>/<hash>`.
#[derive(Debug, Clone)]
pub struct FsCacheStorage {
    root: Utf8PathBuf,
}

impl FsCacheStorage {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn artifact_dir(&self, hash: &str) -> Result<Utf8PathBuf, CacheError> {
        validate_hash(hash)?;
        Ok(self.root.join(hash))
    }
}

#[async_trait]
impl CacheStorage for FsCacheStorage {
    fn name(&self) -> &str {
        "local"
    }

    async fn exists(&self, hash: &str) -> Result<bool, CacheError> {
        let dir = self.artifact_dir(hash)?;
        match fs::metadata(&dir).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::io(dir, e)),
        }
    }

    async fn fetch(&self, hash: &str) -> Result<Utf8PathBuf, CacheError> {
        if self.exists(hash).await? {
            self.artifact_dir(hash)
        } else {
            Err(CacheError::not_found(hash))
        }
    }

    /// Copies `paths` into a private staging directory and renames it into place.
    ///
    /// An existing artifact for `hash` is replaced. Readers never observe a
    /// partially copied artifact. When two stores of the same hash race, the
    /// loser keeps the winner's artifact and succeeds.
    async fn store(&self, hash: &str, paths: &[Utf8PathBuf]) -> Result<(), CacheError> {
        let dir = self.artifact_dir(hash)?;
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CacheError::io(&self.root, e))?;

        let staging = self.scratch_dir(hash, "partial")?;
        let staging_path = utf8_path(staging.path())?;
        for path in paths {
            let Some(file_name) = path.file_name() else {
                return Err(CacheError::io(
                    path,
                    std::io::Error::new(ErrorKind::InvalidInput, "path has no file name"),
                ));
            };
            copy_entry(path, &staging_path.join(file_name)).await?;
        }

        self.publish(hash, &staging_path, &dir).await?;
        debug!(root = %self.root, hash, entries = paths.len(), "stored artifact");
        Ok(())
    }
}

impl FsCacheStorage {
    /// Reserves a uniquely named directory under the root, removed on drop.
    fn scratch_dir(&self, hash: &str, kind: &str) -> Result<TempDir, CacheError> {
        tempfile::Builder::new()
            .prefix(&format!(".{}.{}.", hash, kind))
            .tempdir_in(&self.root)
            .map_err(|e| CacheError::io(&self.root, e))
    }

    /// Moves `staging` to `dir`, setting any previous entry aside first.
    async fn publish(
        &self,
        hash: &str,
        staging: &Utf8Path,
        dir: &Utf8Path,
    ) -> Result<(), CacheError> {
        let aside = self.scratch_dir(hash, "old")?;
        let aside_path = utf8_path(aside.path())?;

        for attempt in 0..PUBLISH_ATTEMPTS {
            let err = match fs::rename(staging, dir).await {
                Ok(()) => return Ok(()),
                Err(e) => e,
            };
            if attempt + 1 == PUBLISH_ATTEMPTS {
                if is_dir(dir).await {
                    debug!(hash, "concurrent store published first");
                    return Ok(());
                }
                return Err(CacheError::io(dir, err));
            }

            match fs::rename(dir, aside_path.join(attempt.to_string())).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(CacheError::io(dir, e)),
            }
        }

        Ok(())
    }
}

async fn is_dir(path: &Utf8Path) -> bool {
    fs::metadata(path).await.is_ok_and(|meta| meta.is_dir())
}

fn utf8_path(path: &Path) -> Result<Utf8PathBuf, CacheError> {
    Utf8Path::from_path(path)
        .map(Utf8Path::to_path_buf)
        .ok_or_else(|| {
            CacheError::io(
                path.to_string_lossy().into_owned(),
                std::io::Error::new(ErrorKind::InvalidData, "non-utf8 path"),
            )
        })
}

/// Copies a file or directory tree from `from` to `to`.
async fn copy_entry(from: &Utf8Path, to: &Utf8Path) -> Result<(), CacheError> {
    let mut pending = vec![(from.to_path_buf(), to.to_path_buf())];

    while let Some((src, dst)) = pending.pop() {
        let meta = fs::metadata(&src)
            .await
            .map_err(|e| CacheError::io(&src, e))?;

        if !meta.is_dir() {
            if let Err(e) = fs::copy(&src, &dst).await {
                let failed = if fs::metadata(&src).await.is_ok() { &dst } else { &src };
                return Err(CacheError::io(failed, e));
            }
            continue;
        }

        fs::create_dir_all(&dst)
            .await
            .map_err(|e| CacheError::io(&dst, e))?;
        let mut entries = fs::read_dir(&src)
            .await
            .map_err(|e| CacheError::io(&src, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CacheError::io(&src, e))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                return Err(CacheError::io(
                    &src,
                    std::io::Error::new(ErrorKind::InvalidData, "non-utf8 file name"),
                ));
            };
            pending.push((src.join(name), dst.join(name)));
        }
    }

    Ok(())
}
