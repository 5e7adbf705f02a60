use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use common::storage::StorageError;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Serves stored objects when the filesystem backend is in use. With the S3
/// backend, public URLs point at the bucket and never reach this route.
#[instrument(skip(state))]
pub async fn serve_asset(
    State(state): State<AppState>,
    Path((bucket, object_path)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    if bucket != state.config.storage.bucket {
        return Err(AppError::NotFound("Asset not found".into()));
    }

    let content = match state.assets.get(&object_path).await {
        Ok(content) => content,
        Err(StorageError::NotFound(_) | StorageError::InvalidPath(_)) => {
            return Err(AppError::NotFound("Asset not found".into()));
        }
        Err(e) => return Err(AppError::from(e)),
    };

    let mime = mime_guess::from_path(&object_path).first_or_octet_stream();

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(content))
        .map_err(|e| AppError::Internal(e.to_string()))
}
