use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::error::StorageError;
use super::path::validate_object_path;
use super::traits::ObjectStore;
use super::url::PublicUrlResolver;

/// Filesystem-backed object store.
///
/// Objects live at `{root}/{object path}`; the server's asset route serves
/// them back under the resolver's public base URL. Writes go through a temp
/// file in `{root}/.tmp` and are moved into place with a rename.
pub struct FilesystemObjectStore {
    root: PathBuf,
    urls: PublicUrlResolver,
}

impl FilesystemObjectStore {
    pub async fn new(root: PathBuf, urls: PublicUrlResolver) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self { root, urls })
    }

    /// Resolve an object path against the root, rejecting unsafe paths.
    ///
    /// Validation matters here: delete paths are recovered from stored URLs
    /// and must never escape the root.
    fn disk_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        let checked = validate_object_path(path)
            .map_err(|msg| StorageError::InvalidPath(format!("{msg}: {path}")))?;
        Ok(self.root.join(checked))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.root.join(".tmp").join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn put(&self, path: &str, _content_type: &str, data: &[u8]) -> Result<(), StorageError> {
        let disk_path = self.disk_path(path)?;

        if fs::try_exists(&disk_path).await? {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = disk_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &disk_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let disk_path = self.disk_path(path)?;
        match fs::read(&disk_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let disk_path = self.disk_path(path)?;
        Ok(fs::try_exists(&disk_path).await?)
    }

    async fn delete(&self, path: &str) -> Result<bool, StorageError> {
        let disk_path = self.disk_path(path)?;
        match fs::remove_file(&disk_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, path: &str) -> String {
        self.urls.url_for(path)
    }

    fn extract_path(&self, url: &str) -> Option<String> {
        self.urls.path_for(url)
    }
}
