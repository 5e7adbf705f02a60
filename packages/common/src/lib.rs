pub mod config;
pub mod storage;

pub use config::{StorageBackend, StorageConfig};
pub use storage::{ObjectStore, StorageError};
