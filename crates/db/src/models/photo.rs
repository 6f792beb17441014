//! Photo entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use friendtrip_core::types::{DbId, Timestamp};

/// A row from the `photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    /// Name of the stored file inside the upload directory.
    pub filename: String,
    pub album_id: DbId,
    pub uploaded_at: Timestamp,
}

/// DTO for recording an uploaded photo.
#[derive(Debug)]
pub struct CreatePhoto {
    pub filename: String,
    pub album_id: DbId,
}

/// A photo joined with its album owner and trip, for permission checks.
#[derive(Debug, Clone, FromRow)]
pub struct PhotoContext {
    pub id: DbId,
    pub filename: String,
    pub album_id: DbId,
    pub uploaded_at: Timestamp,
    pub owner_id: DbId,
    pub trip_id: DbId,
}
