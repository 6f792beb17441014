//! Repository for the `albums` table.

use friendtrip_core::types::{self, DbId};

use crate::models::album::{Album, AlbumContext, AlbumSummary};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, trip_id, created_at";

/// Provides album operations.
pub struct AlbumRepo;

impl AlbumRepo {
    /// Find an album by internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Album>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM albums WHERE id = $1");
        sqlx::query_as::<_, Album>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the album a user owns within a trip.
    pub async fn find_by_user_and_trip(
        pool: &DbPool,
        user_id: DbId,
        trip_id: DbId,
    ) -> Result<Option<Album>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM albums WHERE user_id = $1 AND trip_id = $2");
        sqlx::query_as::<_, Album>(&query)
            .bind(user_id)
            .bind(trip_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the user's album for the trip, creating it on first use.
    ///
    /// Safe under concurrent uploads: the `(user_id, trip_id)` unique key makes
    /// the insert a no-op for the loser.
    pub async fn get_or_create(pool: &DbPool, user_id: DbId, trip_id: DbId) -> Result<Album, sqlx::Error> {
        sqlx::query(
            "INSERT INTO albums (user_id, trip_id, created_at) VALUES ($1, $2, $3)
             ON CONFLICT (user_id, trip_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(trip_id)
        .bind(types::now())
        .execute(pool)
        .await?;

        Self::find_by_user_and_trip(pool, user_id, trip_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Album cards for a trip: owner, photo count and cover, oldest album first.
    pub async fn list_summaries_for_trip(
        pool: &DbPool,
        trip_id: DbId,
    ) -> Result<Vec<AlbumSummary>, sqlx::Error> {
        sqlx::query_as::<_, AlbumSummary>(
            "SELECT a.id, a.user_id, u.username AS owner,
                    (SELECT COUNT(*) FROM photos p WHERE p.album_id = a.id) AS photo_count,
                    (SELECT p.filename FROM photos p WHERE p.album_id = a.id
                     ORDER BY p.uploaded_at DESC, p.id DESC LIMIT 1) AS cover,
                    a.created_at
             FROM albums a
             JOIN users u ON u.id = a.user_id
             WHERE a.trip_id = $1
             ORDER BY a.created_at ASC, a.id ASC",
        )
        .bind(trip_id)
        .fetch_all(pool)
        .await
    }

    /// Album joined with its owner's username and its trip's name and code.
    pub async fn find_with_context(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<AlbumContext>, sqlx::Error> {
        sqlx::query_as::<_, AlbumContext>(
            "SELECT a.id, a.user_id, a.trip_id, a.created_at,
                    u.username AS owner_username, t.name AS trip_name, t.code AS trip_code
             FROM albums a
             JOIN users u ON u.id = a.user_id
             JOIN trips t ON t.id = a.trip_id
             WHERE a.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
