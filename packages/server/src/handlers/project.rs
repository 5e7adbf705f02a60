use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use common::storage::{Folder, ObjectStore, object_path};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};
use tracing::instrument;
use uuid::Uuid;

use crate::entity::category::Category;
use crate::entity::project;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminSession;
use crate::models::project::{
    ProjectForm, ProjectListItem, ProjectListQuery, ProjectListResponse, ProjectResponse,
    UploadedImage, optional_int, optional_text, parse_existing_gallery_urls,
};
use crate::state::AppState;
use crate::utils::slug::slugify;
use crate::utils::upload::validate_image;

/// How many insert attempts a create gets before a slug collision becomes a
/// hard conflict.
const SLUG_INSERT_ATTEMPTS: usize = 3;

pub fn project_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(64 * 1024 * 1024) // 64 MB
}

/// List projects for the public site.
#[utoipa::path(
    get,
    path = "",
    tag = "Projects",
    operation_id = "listProjects",
    summary = "List projects",
    description = "Returns projects ordered by creation time, newest first. Optional query \
        filters narrow the list by category, slug, or featured flag.",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Project list", body = ProjectListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let category = query
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mut select = project::Entity::find();
    if let Some(category) = category {
        select = select.filter(project::Column::Category.eq(category));
    }
    if let Some(slug) = query.slug.as_deref().filter(|s| !s.is_empty()) {
        select = select.filter(project::Column::Slug.eq(slug));
    }
    if let Some(featured) = query.featured {
        select = select.filter(project::Column::IsFeatured.eq(featured));
    }

    // `total` counts every match; `limit` only trims the returned rows.
    let total = select.clone().count(&state.db).await?;

    let mut select = select
        .select_only()
        .columns([
            project::Column::Id,
            project::Column::Name,
            project::Column::Slug,
            project::Column::Category,
            project::Column::Location,
            project::Column::Year,
            project::Column::Summary,
            project::Column::CoverImageUrl,
            project::Column::IsFeatured,
            project::Column::CreatedAt,
        ])
        .order_by_desc(project::Column::CreatedAt);
    if let Some(limit) = query.limit {
        select = select.limit(limit.clamp(1, 100));
    }

    let data = select
        .into_model::<ProjectListItem>()
        .all(&state.db)
        .await?;

    Ok(Json(ProjectListResponse { data, total }))
}

/// Fetch one project by its slug.
#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Projects",
    operation_id = "getProjectBySlug",
    summary = "Get a project by slug",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "Project details", body = ProjectResponse),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(slug = %slug))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProjectResponse>, AppError> {
    let model = project::Entity::find()
        .filter(project::Column::Slug.eq(&slug))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    Ok(Json(ProjectResponse::from(model)))
}

/// Create a project from a multipart form.
#[utoipa::path(
    post,
    path = "",
    tag = "Admin Projects",
    operation_id = "createProject",
    summary = "Create a project",
    description = "Creates a project from a multipart form. `name` and a `cover_image` file are \
        required; `gallery_images` may repeat. Every file is validated before anything is \
        uploaded, so a rejected file leaves no partial state behind.",
    request_body(content_type = "multipart/form-data", description = "Project fields plus image files"),
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (SESSION_MISSING, SESSION_INVALID)", body = ErrorBody),
        (status = 409, description = "Slug conflict (CONFLICT)", body = ErrorBody),
        (status = 502, description = "Upload failed (STORAGE_ERROR)", body = ErrorBody),
    ),
    security(("session" = [])),
)]
#[instrument(skip(state, _session, multipart))]
pub async fn create_project(
    _session: AdminSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_project_form(&mut multipart).await?;

    let name = form
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Project name is required".into()))?;

    let cover = form
        .cover_image
        .as_ref()
        .ok_or_else(|| AppError::Validation("Cover image is required".into()))?;

    validate_image(&cover.file_name, &cover.content_type, cover.data.len())
        .map_err(|e| AppError::Validation(e.message()))?;
    for image in &form.gallery_images {
        validate_image(&image.file_name, &image.content_type, image.data.len())
            .map_err(|e| AppError::Validation(e.message()))?;
    }

    let category = match form.category.as_deref().filter(|c| !c.is_empty()) {
        Some(raw) => raw
            .parse::<Category>()
            .map_err(|e| AppError::Validation(e.to_string()))?,
        None => Category::default(),
    };
    let year = optional_int("year", form.year.clone())?;
    let area_sqm = optional_int("area_sqm", form.area_sqm.clone())?;

    let base_slug = slugify(&name);
    let mut slug = choose_slug(&state.db, &base_slug, None).await?;

    // Uploads start only after every file has passed validation.
    let cover_url = upload_image(&*state.assets, Folder::Covers, &slug, cover).await?;
    let mut gallery_urls = Vec::with_capacity(form.gallery_images.len());
    for image in &form.gallery_images {
        gallery_urls.push(upload_image(&*state.assets, Folder::Gallery, &slug, image).await?);
    }

    let now = Utc::now();
    let mut attempt = 1;
    let inserted = loop {
        let model = project::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.clone()),
            slug: Set(slug.clone()),
            category: Set(category),
            location: Set(optional_text(form.location.clone())),
            year: Set(year),
            area_sqm: Set(area_sqm),
            client_name: Set(optional_text(form.client_name.clone())),
            summary: Set(optional_text(form.summary.clone())),
            story: Set(optional_text(form.story.clone())),
            scope: Set(optional_text(form.scope.clone())),
            materials: Set(optional_text(form.materials.clone())),
            cover_image_url: Set(cover_url.clone()),
            gallery: Set(project::gallery_to_json(&gallery_urls)),
            is_featured: Set(form.is_featured.as_deref() == Some("true")),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match model.insert(&state.db).await {
            Ok(inserted) => break inserted,
            Err(e) => match e.sql_err() {
                // Lost the check-then-insert race. Re-suffix and try again;
                // assets stay at their original paths and the stored URLs
                // keep pointing at them.
                Some(SqlErr::UniqueConstraintViolation(_)) if attempt < SLUG_INSERT_ATTEMPTS => {
                    attempt += 1;
                    slug = suffixed_slug(&base_slug);
                    tracing::debug!(slug = %slug, attempt, "slug collision on insert, retrying");
                }
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    return Err(AppError::Conflict(format!(
                        "A project with slug '{slug}' already exists"
                    )));
                }
                _ => return Err(AppError::from(e)),
            },
        }
    };

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(inserted))))
}

/// Update a project from a multipart form.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Admin Projects",
    operation_id = "updateProject",
    summary = "Update a project",
    description = "Updates a project from a multipart form. Scalar fields are overwritten when \
        supplied, cleared when supplied empty, and left unchanged when omitted. The cover can be \
        replaced but never removed: send a `cover_image` file (the old asset is deleted \
        best-effort) or `existing_cover_url` to keep the stored one. `existing_gallery_urls` \
        (a JSON array) names the stored gallery URLs to keep; the rest are deleted and new \
        `gallery_images` are appended after the kept ones.",
    params(("id" = String, Path, description = "Project ID (UUID)")),
    request_body(content_type = "multipart/form-data", description = "Fields to change plus image files"),
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (SESSION_MISSING, SESSION_INVALID)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug conflict (CONFLICT)", body = ErrorBody),
        (status = 502, description = "Upload failed (STORAGE_ERROR)", body = ErrorBody),
    ),
    security(("session" = [])),
)]
#[instrument(skip(state, _session, multipart), fields(id = %id))]
pub async fn update_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ProjectResponse>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::Validation("Invalid project ID".into()))?;

    let form = read_project_form(&mut multipart).await?;
    let existing = find_by_id(&state.db, id).await?;

    // Everything that can fail validation runs before the first side effect.
    if let Some(cover) = &form.cover_image {
        validate_image(&cover.file_name, &cover.content_type, cover.data.len())
            .map_err(|e| AppError::Validation(e.message()))?;
    }
    for image in &form.gallery_images {
        validate_image(&image.file_name, &image.content_type, image.data.len())
            .map_err(|e| AppError::Validation(e.message()))?;
    }

    // The cover can be replaced but never dropped: the form must carry a new
    // file or name the stored URL it keeps.
    let keeps_cover = form
        .existing_cover_url
        .as_deref()
        .is_some_and(|url| !url.is_empty());
    if form.cover_image.is_none() && !keeps_cover {
        return Err(AppError::Validation("Cover image is required".into()));
    }

    let category = form
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(str::parse::<Category>)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let year = form
        .year
        .clone()
        .map(|raw| optional_int("year", Some(raw)))
        .transpose()?;
    let area_sqm = form
        .area_sqm
        .clone()
        .map(|raw| optional_int("area_sqm", Some(raw)))
        .transpose()?;

    let old_gallery = project::gallery_from_json(&existing.gallery);
    let kept: Vec<String> = match &form.existing_gallery_urls {
        Some(raw) => parse_existing_gallery_urls(raw)?
            .into_iter()
            .filter(|url| old_gallery.contains(url))
            .collect(),
        // No keep-list means the client kept nothing.
        None => Vec::new(),
    };

    // A changed name regenerates the slug, excluding this row from the
    // uniqueness check.
    let name = form
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| existing.name.clone());
    let slug = if name != existing.name {
        choose_slug(&state.db, &slugify(&name), Some(id)).await?
    } else {
        existing.slug.clone()
    };

    let mut cover_url = existing.cover_image_url.clone();
    if let Some(cover) = &form.cover_image {
        if let Some(path) = state.assets.extract_path(&existing.cover_image_url) {
            state.assets.delete_all(&[path]).await;
        }
        cover_url = upload_image(&*state.assets, Folder::Covers, &slug, cover).await?;
    }

    let removed: Vec<String> = old_gallery
        .iter()
        .filter(|url| !kept.contains(url))
        .filter_map(|url| state.assets.extract_path(url))
        .collect();
    if !removed.is_empty() {
        state.assets.delete_all(&removed).await;
    }

    let mut gallery = kept;
    for image in &form.gallery_images {
        gallery.push(upload_image(&*state.assets, Folder::Gallery, &slug, image).await?);
    }

    let mut active: project::ActiveModel = existing.into();
    active.name = Set(name);
    active.slug = Set(slug.clone());
    if let Some(category) = category {
        active.category = Set(category);
    }
    if form.location.is_some() {
        active.location = Set(optional_text(form.location.clone()));
    }
    if let Some(year) = year {
        active.year = Set(year);
    }
    if let Some(area_sqm) = area_sqm {
        active.area_sqm = Set(area_sqm);
    }
    if form.client_name.is_some() {
        active.client_name = Set(optional_text(form.client_name.clone()));
    }
    if form.summary.is_some() {
        active.summary = Set(optional_text(form.summary.clone()));
    }
    if form.story.is_some() {
        active.story = Set(optional_text(form.story.clone()));
    }
    if form.scope.is_some() {
        active.scope = Set(optional_text(form.scope.clone()));
    }
    if form.materials.is_some() {
        active.materials = Set(optional_text(form.materials.clone()));
    }
    if let Some(flag) = form.is_featured.as_deref() {
        active.is_featured = Set(flag == "true");
    }
    active.cover_image_url = Set(cover_url);
    active.gallery = Set(project::gallery_to_json(&gallery));
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(format!("A project with slug '{slug}' already exists"))
        }
        _ => AppError::from(e),
    })?;

    Ok(Json(ProjectResponse::from(updated)))
}

/// Delete a project and reclaim its stored assets.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Admin Projects",
    operation_id = "deleteProject",
    summary = "Delete a project",
    description = "Deletes the project row and removes its cover and gallery objects from \
        storage. Storage removal is best-effort: failures are logged and never block the delete.",
    params(("id" = String, Path, description = "Project ID (UUID)")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (SESSION_MISSING, SESSION_INVALID)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session" = [])),
)]
#[instrument(skip(state, _session), fields(id = %id))]
pub async fn delete_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::Validation("Invalid project ID".into()))?;

    let existing = find_by_id(&state.db, id).await?;

    let mut paths: Vec<String> = Vec::new();
    if let Some(path) = state.assets.extract_path(&existing.cover_image_url) {
        paths.push(path);
    }
    for url in project::gallery_from_json(&existing.gallery) {
        if let Some(path) = state.assets.extract_path(&url) {
            paths.push(path);
        }
    }

    let removed = state.assets.delete_all(&paths).await;
    tracing::info!(removed, total = paths.len(), "reclaimed project assets");

    project::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Collect the fields of a project multipart form. Unknown fields are
/// ignored; blank file inputs arrive as empty parts and are skipped.
async fn read_project_form(multipart: &mut Multipart) -> Result<ProjectForm, AppError> {
    let mut form = ProjectForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("cover_image") => {
                if let Some(image) = read_image_field(field).await? {
                    form.cover_image = Some(image);
                }
            }
            Some("gallery_images") => {
                if let Some(image) = read_image_field(field).await? {
                    form.gallery_images.push(image);
                }
            }
            Some("name") => form.name = Some(read_text_field("name", field).await?),
            Some("category") => form.category = Some(read_text_field("category", field).await?),
            Some("location") => form.location = Some(read_text_field("location", field).await?),
            Some("year") => form.year = Some(read_text_field("year", field).await?),
            Some("area_sqm") => form.area_sqm = Some(read_text_field("area_sqm", field).await?),
            Some("client_name") => {
                form.client_name = Some(read_text_field("client_name", field).await?)
            }
            Some("summary") => form.summary = Some(read_text_field("summary", field).await?),
            Some("story") => form.story = Some(read_text_field("story", field).await?),
            Some("scope") => form.scope = Some(read_text_field("scope", field).await?),
            Some("materials") => form.materials = Some(read_text_field("materials", field).await?),
            Some("is_featured") => {
                form.is_featured = Some(read_text_field("is_featured", field).await?)
            }
            Some("existing_cover_url") => {
                form.existing_cover_url =
                    Some(read_text_field("existing_cover_url", field).await?)
            }
            Some("existing_gallery_urls") => {
                form.existing_gallery_urls =
                    Some(read_text_field("existing_gallery_urls", field).await?)
            }
            _ => {} // Ignore unknown fields.
        }
    }

    Ok(form)
}

async fn read_text_field(
    name: &str,
    field: axum::extract::multipart::Field<'_>,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))
}

async fn read_image_field(
    field: axum::extract::multipart::Field<'_>,
) -> Result<Option<UploadedImage>, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?;

    // A file input left blank still produces a part, just an empty one.
    if data.is_empty() {
        return Ok(None);
    }

    if file_name.is_empty() {
        return Err(AppError::Validation("File field must have a filename".into()));
    }

    Ok(Some(UploadedImage {
        file_name,
        content_type,
        data: data.to_vec(),
    }))
}

async fn upload_image(
    assets: &dyn ObjectStore,
    folder: Folder,
    slug: &str,
    image: &UploadedImage,
) -> Result<String, AppError> {
    let path = object_path(folder, slug, &image.file_name);
    assets.put(&path, &image.content_type, &image.data).await?;
    Ok(assets.public_url(&path))
}

/// Picks a slug, appending a millisecond token when the base slug is already
/// taken by another row.
async fn choose_slug<C: sea_orm::ConnectionTrait>(
    db: &C,
    base: &str,
    exclude_id: Option<Uuid>,
) -> Result<String, AppError> {
    let mut query = project::Entity::find().filter(project::Column::Slug.eq(base));
    if let Some(id) = exclude_id {
        query = query.filter(project::Column::Id.ne(id));
    }

    if query.one(db).await?.is_some() {
        Ok(suffixed_slug(base))
    } else {
        Ok(base.to_string())
    }
}

fn suffixed_slug(base: &str) -> String {
    format!("{}-{}", base, Utc::now().timestamp_millis())
}

async fn find_by_id<C: sea_orm::ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<project::Model, AppError> {
    project::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))
}
