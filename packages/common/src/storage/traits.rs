use async_trait::async_trait;

use super::error::StorageError;

/// Path-addressed object storage.
///
/// Paths are bucket-relative, slash-separated, and built by
/// [`object_path`](super::object_path); they never start with `/`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes at `path`.
    ///
    /// Fails with [`StorageError::AlreadyExists`] instead of overwriting an
    /// existing object.
    async fn put(&self, path: &str, content_type: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Retrieve all bytes of the object at `path`.
    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Check whether an object exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Delete the object at `path`.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, path: &str) -> Result<bool, StorageError>;

    /// Public URL under which the object at `path` is served.
    fn public_url(&self, path: &str) -> String;

    /// Inverse of [`public_url`](Self::public_url): the object path for URLs
    /// this store serves, `None` for any other URL.
    fn extract_path(&self, url: &str) -> Option<String>;

    /// Delete a batch of objects, logging and skipping failures.
    ///
    /// Returns the number of objects actually removed. Callers treat cleanup
    /// as best-effort; a failed delete must never abort the caller.
    async fn delete_all(&self, paths: &[String]) -> usize {
        let mut removed = 0;
        for path in paths {
            match self.delete(path).await {
                Ok(true) => removed += 1,
                Ok(false) => {
                    tracing::warn!(path = %path, "object already absent during cleanup");
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "failed to delete object, continuing");
                }
            }
        }
        removed
    }
}
