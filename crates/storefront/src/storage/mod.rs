//! Local key/value storage for the persisted session.
//!
//! Values are plain strings keyed by fixed names (see
//! [`keys`](crate::models::keys)). Two backends:
//!
//! - [`FileStorage`] - a single JSON object file on disk
//! - [`MemoryStorage`] - process-local map, for tests and ephemeral runs

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key/value store standing in for device storage.
///
/// Implementations must be safe to share across tasks; the session layer
/// holds one as `Arc<dyn LocalStorage>`.
#[async_trait]
pub trait LocalStorage: Send + Sync {
    /// Value stored under `key`, if any.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
