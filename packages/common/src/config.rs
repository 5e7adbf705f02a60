use std::path::PathBuf;

use serde::Deserialize;

/// Which object storage backend serves and persists uploads.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Filesystem,
    S3,
}

/// App-level object storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Which backend to use. Default: filesystem.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Bucket objects live under. Default: "projects".
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Base URL public object URLs are built from. For the filesystem
    /// backend this points at the server's own asset route.
    /// Default: "http://localhost:3000/assets".
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Root directory for the filesystem backend. Default: "./data/storage".
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// S3 endpoint URL (s3 backend only).
    #[serde(default)]
    pub endpoint: String,
    /// S3 region (s3 backend only). Default: "us-east-1".
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 access key (s3 backend only).
    #[serde(default)]
    pub access_key: String,
    /// S3 secret key (s3 backend only).
    #[serde(default)]
    pub secret_key: String,
}

fn default_bucket() -> String {
    "projects".into()
}
fn default_public_base_url() -> String {
    "http://localhost:3000/assets".into()
}
fn default_root() -> PathBuf {
    PathBuf::from("./data/storage")
}
fn default_region() -> String {
    "us-east-1".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: default_bucket(),
            public_base_url: default_public_base_url(),
            root: default_root(),
            endpoint: String::new(),
            region: default_region(),
            access_key: String::new(),
            secret_key: String::new(),
        }
    }
}
