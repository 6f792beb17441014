//! Handlers for the `/albums` resource.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use friendtrip_core::error::CoreError;
use friendtrip_core::naming::album_archive_name;
use friendtrip_core::types::{DbId, Timestamp};
use friendtrip_db::models::album::AlbumContext;
use friendtrip_db::models::photo::Photo;
use friendtrip_db::repositories::{AlbumRepo, PhotoRepo};
use serde::Serialize;

use crate::archive::build_zip_blocking;
use crate::error::{AppError, AppResult};
use crate::handlers::{attachment, photo_download_url, require_member, upload_url};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::photo_path;

const ACCESS_DENIED: &str = "Access Denied";

/// A photo as shown in an album view.
#[derive(Debug, Serialize)]
pub struct PhotoView {
    pub id: DbId,
    pub filename: String,
    pub uploaded_at: Timestamp,
    pub url: String,
    pub download_url: String,
}

impl From<Photo> for PhotoView {
    fn from(photo: Photo) -> Self {
        Self {
            url: upload_url(&photo.filename),
            download_url: photo_download_url(photo.id),
            id: photo.id,
            filename: photo.filename,
            uploaded_at: photo.uploaded_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlbumDetail {
    pub album_id: DbId,
    pub trip_id: DbId,
    pub trip_name: String,
    pub owner_id: DbId,
    pub owner_name: String,
    /// Whether the caller owns the album and may delete from it.
    pub is_owner: bool,
    pub photos: Vec<PhotoView>,
}

/// GET /api/v1/albums/{id}
///
/// One member's album, newest photo first.
pub async fn get_album(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AlbumDetail>>> {
    let album = find_visible_album(&state, &auth, id).await?;
    let photos = PhotoRepo::list_by_album(&state.pool, album.id).await?;

    Ok(Json(DataResponse {
        data: AlbumDetail {
            album_id: album.id,
            trip_id: album.trip_id,
            trip_name: album.trip_name,
            owner_id: album.user_id,
            owner_name: album.owner_username,
            is_owner: album.user_id == auth.user_id,
            photos: photos.into_iter().map(PhotoView::from).collect(),
        },
    }))
}

/// GET /api/v1/albums/{id}/download
///
/// The whole album as `{owner}_{trip}.zip`.
pub async fn download_album(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let album = find_visible_album(&state, &auth, id).await?;

    let photos = PhotoRepo::list_by_album_oldest_first(&state.pool, album.id).await?;
    if photos.is_empty() {
        return Err(AppError::NotFound("Album empty".into()));
    }

    let entries = photos
        .into_iter()
        .map(|p| {
            let path = photo_path(&state.config.upload_dir, &p.filename);
            (p.filename, path)
        })
        .collect();
    let bytes = build_zip_blocking(entries).await?;

    tracing::info!(album_id = album.id, user_id = auth.user_id, size = bytes.len(), "Album downloaded");

    attachment(
        "application/zip",
        &album_archive_name(&album.owner_username, &album.trip_name),
        bytes,
    )
}

/// Load an album and check the caller belongs to its trip.
async fn find_visible_album(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<AlbumContext> {
    let album = AlbumRepo::find_with_context(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Album", id }))?;
    require_member(&state.pool, album.trip_id, auth.user_id, ACCESS_DENIED).await?;
    Ok(album)
}
