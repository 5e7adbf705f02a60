use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::category::Category;
use crate::entity::project;
use crate::error::AppError;

/// Query parameters for the public project list.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ProjectListQuery {
    /// Restrict results to one category.
    #[param(example = "architecture")]
    pub category: Option<String>,
    /// Return only the project with this slug.
    #[param(example = "marina-bay-tower")]
    pub slug: Option<String>,
    /// When true, only featured projects are returned.
    #[param(example = true)]
    pub featured: Option<bool>,
    /// Maximum number of projects to return (1-100).
    #[param(example = 6)]
    pub limit: Option<u64>,
}

/// Full public representation of a project.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    /// URL-safe identifier, unique across all projects.
    #[schema(example = "marina-bay-tower")]
    pub slug: String,
    pub category: Category,
    pub location: Option<String>,
    pub year: Option<i32>,
    pub area_sqm: Option<i32>,
    pub client_name: Option<String>,
    pub summary: Option<String>,
    pub story: Option<String>,
    pub scope: Option<String>,
    pub materials: Option<String>,
    /// Public URL of the cover image.
    pub cover_image_url: String,
    /// Public URLs of the gallery images, in display order.
    pub gallery: Vec<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<project::Model> for ProjectResponse {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            category: m.category,
            location: m.location,
            year: m.year,
            area_sqm: m.area_sqm,
            client_name: m.client_name,
            summary: m.summary,
            story: m.story,
            scope: m.scope,
            materials: m.materials,
            cover_image_url: m.cover_image_url,
            gallery: project::gallery_from_json(&m.gallery),
            is_featured: m.is_featured,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Card-sized projection returned by the list endpoint.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct ProjectListItem {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: Category,
    pub location: Option<String>,
    pub year: Option<i32>,
    pub summary: Option<String>,
    pub cover_image_url: String,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Envelope returned by the list endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProjectListResponse {
    pub data: Vec<ProjectListItem>,
    /// Number of projects matching the filters, before `limit` is applied.
    pub total: u64,
}

/// An image lifted out of a multipart request.
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Everything a project multipart form can carry. Scalar fields stay raw
/// strings here; conversion happens in the handlers so create and update can
/// apply their own absent-versus-empty rules.
#[derive(Default)]
pub struct ProjectForm {
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub year: Option<String>,
    pub area_sqm: Option<String>,
    pub client_name: Option<String>,
    pub summary: Option<String>,
    pub story: Option<String>,
    pub scope: Option<String>,
    pub materials: Option<String>,
    pub is_featured: Option<String>,
    pub existing_cover_url: Option<String>,
    pub existing_gallery_urls: Option<String>,
    pub cover_image: Option<UploadedImage>,
    pub gallery_images: Vec<UploadedImage>,
}

/// Maps an empty form value to `None`. Absent and empty collapse to the same
/// thing on create; update tells them apart before calling this.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parses an optional integer form value. Empty counts as absent.
pub fn optional_int(field: &str, value: Option<String>) -> Result<Option<i32>, AppError> {
    match value.filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("Field '{field}' must be an integer"))),
        None => Ok(None),
    }
}

/// Parses the `existing_gallery_urls` form field, a JSON array of the
/// already-stored gallery URLs the client wants to keep.
pub fn parse_existing_gallery_urls(raw: &str) -> Result<Vec<String>, AppError> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|_| {
        AppError::Validation("Field 'existing_gallery_urls' must be a JSON array of strings".into())
    })
}
