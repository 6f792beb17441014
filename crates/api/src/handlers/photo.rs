//! Handlers for the `/photos` resource: single and bulk download and delete.

use std::collections::BTreeSet;
use std::io::ErrorKind;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use friendtrip_core::error::CoreError;
use friendtrip_core::naming::selection_archive_name;
use friendtrip_core::types::DbId;
use friendtrip_core::uploads::content_type_for;
use friendtrip_db::models::photo::PhotoContext;
use friendtrip_db::repositories::{PhotoRepo, TripRepo};
use serde::{Deserialize, Serialize};

use crate::archive::build_zip_blocking;
use crate::error::{AppError, AppResult};
use crate::handlers::{attachment, photo_download_url, require_member};
use crate::middleware::auth::AuthUser;
use crate::response::{CountResponse, SuccessResponse};
use crate::state::AppState;
use crate::storage::{photo_path, remove_photo_file};

const NO_SELECTION: &str = "No photos selected";

/// Request body for the bulk endpoints.
#[derive(Debug, Deserialize)]
pub struct PhotoSelection {
    #[serde(default)]
    pub photo_ids: Vec<DbId>,
}

/// Reply for a one-photo selection: the client fetches it from `url`.
#[derive(Debug, Serialize)]
pub struct SingleDownload {
    pub success: bool,
    pub single: bool,
    pub url: String,
}

/// GET /api/v1/photos/{id}/download
pub async fn download_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let photo = find_photo(&state, id).await?;
    require_member(&state.pool, photo.trip_id, auth.user_id, "Access Denied").await?;

    let path = photo_path(&state.config.upload_dir, &photo.filename);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound("Photo file is missing".into()))
        }
        Err(e) => {
            return Err(AppError::InternalError(format!(
                "Failed to read {}: {e}",
                photo.filename
            )))
        }
    };

    attachment(content_type_for(&photo.filename), &photo.filename, bytes)
}

/// DELETE /api/v1/photos/{id}
///
/// Only the album owner may delete.
pub async fn delete_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let photo = find_photo(&state, id).await?;
    if photo.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Permission denied".into(),
        )));
    }

    remove_photo_file(&photo_path(&state.config.upload_dir, &photo.filename))
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to remove {}: {e}", photo.filename)))?;
    PhotoRepo::delete(&state.pool, photo.id).await?;

    tracing::info!(photo_id = photo.id, user_id = auth.user_id, "Photo deleted");
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/v1/photos/download
///
/// One photo yields a pointer to its download route; more yield a ZIP.
pub async fn download_selected(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<PhotoSelection>,
) -> AppResult<Response> {
    if input.photo_ids.is_empty() {
        return Err(AppError::BadRequest(NO_SELECTION.into()));
    }

    let photos = PhotoRepo::find_many(&state.pool, &input.photo_ids).await?;
    if photos.is_empty() {
        return Err(AppError::NotFound("Photos not found".into()));
    }

    let trip_ids: BTreeSet<DbId> = photos.iter().map(|p| p.trip_id).collect();
    for trip_id in trip_ids {
        if !TripRepo::is_member(&state.pool, trip_id, auth.user_id).await? {
            return Err(AppError::Core(CoreError::Forbidden("Unauthorized".into())));
        }
    }

    if let [photo] = photos.as_slice() {
        return Ok(Json(SingleDownload {
            success: true,
            single: true,
            url: photo_download_url(photo.id),
        })
        .into_response());
    }

    let entries = photos
        .into_iter()
        .map(|p| {
            let path = photo_path(&state.config.upload_dir, &p.filename);
            (p.filename, path)
        })
        .collect();
    let bytes = build_zip_blocking(entries).await?;

    attachment("application/zip", &selection_archive_name(Utc::now()), bytes)
}

/// POST /api/v1/photos/delete
///
/// Deletes the caller's own photos from the selection and skips the rest.
pub async fn delete_selected(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<PhotoSelection>,
) -> AppResult<Json<CountResponse>> {
    if input.photo_ids.is_empty() {
        return Err(AppError::BadRequest(NO_SELECTION.into()));
    }

    let photos = PhotoRepo::find_many(&state.pool, &input.photo_ids).await?;

    let mut count = 0;
    for photo in photos.into_iter().filter(|p| p.owner_id == auth.user_id) {
        let path = photo_path(&state.config.upload_dir, &photo.filename);
        if let Err(e) = remove_photo_file(&path).await {
            tracing::error!(photo_id = photo.id, error = %e, "Failed to remove photo file, skipping");
            continue;
        }
        match PhotoRepo::delete(&state.pool, photo.id).await {
            Ok(true) => count += 1,
            Ok(false) => {}
            Err(e) => {
                tracing::error!(photo_id = photo.id, error = %e, "Failed to delete photo row, skipping");
            }
        }
    }

    tracing::info!(user_id = auth.user_id, count, "Selected photos deleted");
    Ok(Json(CountResponse::new(count)))
}

async fn find_photo(state: &AppState, id: DbId) -> AppResult<PhotoContext> {
    PhotoRepo::find_with_owner(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Photo", id }))
}
