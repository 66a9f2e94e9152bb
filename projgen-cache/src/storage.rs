use crate::error::CacheError;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};

/// One tier of the artifact cache.
///
/// Implementations must be safe to share across tasks. Dropping a returned
/// future cancels the operation.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Short identifier used in log events.
    fn name(&self) -> &str;

    /// Whether the tier holds an artifact for `hash`.
    async fn exists(&self, hash: &str) -> Result<bool, CacheError>;

    /// Location of the artifact for `hash`. Fails when the tier does not have it.
    async fn fetch(&self, hash: &str) -> Result<Utf8PathBuf, CacheError>;

    /// Records `paths` as the artifact for `hash`.
    async fn store(&self, hash: &str, paths: &[Utf8PathBuf]) -> Result<(), CacheError>;
}

/// Rejects hashes that could escape a tier's root when used as a path segment.
pub fn validate_hash(hash: &str) -> Result<(), CacheError> {
    let segment = Utf8Path::new(hash);
    let single_normal_segment = segment.components().count() == 1
        && matches!(
            segment.components().next(),
            Some(camino::Utf8Component::Normal(_))
        );

    if hash.is_empty() || hash.contains(['/', '\\']) || !single_normal_segment {
        return Err(CacheError::InvalidHash {
            hash: hash.to_string(),
        });
    }
    Ok(())
}
