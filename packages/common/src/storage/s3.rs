use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};

use super::error::StorageError;
use super::traits::ObjectStore;
use super::url::PublicUrlResolver;

/// S3-compatible object store.
///
/// Works against any S3-style endpoint (AWS, MinIO, Supabase storage) using
/// path-style addressing. Public URLs are built from the configured base,
/// not from the signing endpoint, so a CDN can front the bucket.
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    urls: PublicUrlResolver,
}

impl S3ObjectStore {
    pub fn new(
        endpoint: &str,
        region: &str,
        bucket_name: &str,
        access_key: &str,
        secret_key: &str,
        urls: PublicUrlResolver,
    ) -> Result<Self, StorageError> {
        let region = Region::Custom {
            region: region.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        };
        let credentials = Credentials::new(Some(access_key), Some(secret_key), None, None, None)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let bucket = Bucket::new(bucket_name, region, credentials)
            .map_err(|e| StorageError::Backend(e.to_string()))?
            .with_path_style();

        Ok(Self { bucket, urls })
    }

    async fn head(&self, path: &str) -> Result<bool, StorageError> {
        match self.bucket.head_object(path).await {
            Ok(_) => Ok(true),
            Err(S3Error::HttpFailWithBody(404, _)) => Ok(false),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, path: &str, content_type: &str, data: &[u8]) -> Result<(), StorageError> {
        // S3 PutObject overwrites silently; a head pre-check keeps the
        // no-overwrite contract. Paths carry a millisecond stamp, so a
        // same-path race is not a practical concern.
        if self.head(path).await? {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }

        let resp = self
            .bucket
            .put_object_with_content_type(path, data, content_type)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        if resp.status_code() != 200 {
            return Err(StorageError::Backend(format!(
                "unexpected status {} storing {path}",
                resp.status_code()
            )));
        }

        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        match self.bucket.get_object(path).await {
            Ok(resp) => Ok(resp.bytes().to_vec()),
            Err(S3Error::HttpFailWithBody(404, _)) => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        self.head(path).await
    }

    async fn delete(&self, path: &str) -> Result<bool, StorageError> {
        // DeleteObject succeeds for absent keys, so check first to keep the
        // "false = did not exist" contract.
        if !self.head(path).await? {
            return Ok(false);
        }

        self.bucket
            .delete_object(path)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(true)
    }

    fn public_url(&self, path: &str) -> String {
        self.urls.url_for(path)
    }

    fn extract_path(&self, url: &str) -> Option<String> {
        self.urls.path_for(url)
    }
}
