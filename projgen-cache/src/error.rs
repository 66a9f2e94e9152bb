use camino::Utf8PathBuf;
use thiserror::Error;

/// Failure reported by a cache tier or by the chain.
///
/// Callers treat any `fetch` error as "artifact unavailable".
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("artifact {hash} not found")]
    NotFound { hash: String },

    #[error("invalid artifact hash {hash:?}")]
    InvalidHash { hash: String },

    #[error("io error at {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Opaque failure from a backend that does not map onto the other variants.
    #[error("{backend}: {message}")]
    Backend { backend: String, message: String },
}

impl CacheError {
    pub fn not_found(hash: &str) -> Self {
        Self::NotFound {
            hash: hash.to_string(),
        }
    }

    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            backend: backend.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
