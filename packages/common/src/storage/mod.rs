mod error;
mod path;
mod traits;
mod url;

pub mod filesystem;
#[cfg(feature = "object-storage")]
pub mod s3;

pub use error::StorageError;
pub use path::{Folder, object_path, sanitize_file_name, validate_object_path};
pub use traits::ObjectStore;
pub use url::PublicUrlResolver;
