//! Storage abstraction traits
//!
//! The upload pipeline talks to the outside world only through these seams,
//! so each stage's failure mode is testable with injected fakes and no live
//! network call.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Credentials missing: {0}")]
    MissingCredentials(String),

    #[error("Token fetch failed: {0}")]
    TokenFetch(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Exchanges the stored long-lived credential for a short-lived bearer
/// token. Fetched once per request and discarded; implementations must not
/// cache tokens across calls.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> StorageResult<String>;
}

/// Authenticated binary object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `data` at `path` with add / autorename-on-conflict /
    /// suppress-notification semantics. An existing object at `path` is
    /// never overwritten; the store renames the new one instead.
    async fn put(&self, access_token: &str, path: &str, data: Vec<u8>) -> StorageResult<()>;
}
