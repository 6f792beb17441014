pub mod album;
pub mod auth;
pub mod photo;
pub mod trip;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use friendtrip_core::error::CoreError;
use friendtrip_core::types::DbId;
use friendtrip_db::repositories::TripRepo;
use friendtrip_db::DbPool;

use crate::error::{AppError, AppResult};

/// Reject with 403 `message` unless `user_id` belongs to `trip_id`.
pub(crate) async fn require_member(
    pool: &DbPool,
    trip_id: DbId,
    user_id: DbId,
    message: &str,
) -> AppResult<()> {
    if TripRepo::is_member(pool, trip_id, user_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(message.to_string())))
    }
}

/// Public URL of a stored photo, served from the upload directory.
pub(crate) fn upload_url(filename: &str) -> String {
    format!("/uploads/{filename}")
}

/// Route that downloads a single photo as an attachment.
pub(crate) fn photo_download_url(photo_id: DbId) -> String {
    format!("/api/v1/photos/{photo_id}/download")
}

/// A `200 OK` file download with `Content-Disposition: attachment`.
pub(crate) fn attachment(content_type: &'static str, filename: &str, body: Vec<u8>) -> AppResult<Response> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| AppError::InternalError(format!("Invalid download name {filename}: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
