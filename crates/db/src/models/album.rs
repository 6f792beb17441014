//! Album entity model and joined read models.

use serde::Serialize;
use sqlx::FromRow;
use friendtrip_core::types::{DbId, Timestamp};

/// A row from the `albums` table: one member's photos within one trip.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Album {
    pub id: DbId,
    pub user_id: DbId,
    pub trip_id: DbId,
    pub created_at: Timestamp,
}

/// Album card on the trip page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlbumSummary {
    pub id: DbId,
    pub user_id: DbId,
    /// Owner's username.
    pub owner: String,
    pub photo_count: i64,
    /// Filename of the most recently uploaded photo, if any.
    pub cover: Option<String>,
    pub created_at: Timestamp,
}

/// An album with the trip and owner fields needed for access checks and naming.
#[derive(Debug, Clone, FromRow)]
pub struct AlbumContext {
    pub id: DbId,
    pub user_id: DbId,
    pub trip_id: DbId,
    pub created_at: Timestamp,
    pub owner_username: String,
    pub trip_name: String,
    pub trip_code: String,
}
