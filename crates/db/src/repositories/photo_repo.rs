//! Repository for the `photos` table.

use friendtrip_core::types::{self, DbId};

use crate::models::photo::{CreatePhoto, Photo, PhotoContext};
use crate::{placeholders, DbPool};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, filename, album_id, uploaded_at";

/// Photo columns joined with the owning album's user and trip.
const CONTEXT_SELECT: &str = "SELECT p.id, p.filename, p.album_id, p.uploaded_at,
                                     a.user_id AS owner_id, a.trip_id
                              FROM photos p
                              JOIN albums a ON a.id = p.album_id";

/// Provides photo operations.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Record an uploaded photo, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (filename, album_id, uploaded_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(&input.filename)
            .bind(input.album_id)
            .bind(types::now())
            .fetch_one(pool)
            .await
    }

    /// Find a photo by internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1");
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a photo together with its album owner and trip.
    pub async fn find_with_owner(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<PhotoContext>, sqlx::Error> {
        let query = format!("{CONTEXT_SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, PhotoContext>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find several photos (with owner and trip) by ID. Unknown IDs are skipped.
    pub async fn find_many(pool: &DbPool, ids: &[DbId]) -> Result<Vec<PhotoContext>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "{CONTEXT_SELECT} WHERE p.id IN ({}) ORDER BY p.id ASC",
            placeholders(1, ids.len())
        );
        let mut q = sqlx::query_as::<_, PhotoContext>(&query);
        for id in ids {
            q = q.bind(*id);
        }
        q.fetch_all(pool).await
    }

    /// Photos of an album, newest first.
    pub async fn list_by_album(pool: &DbPool, album_id: DbId) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photos WHERE album_id = $1
             ORDER BY uploaded_at DESC, id DESC"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(album_id)
            .fetch_all(pool)
            .await
    }

    /// Photos of an album in upload order, for archives.
    pub async fn list_by_album_oldest_first(
        pool: &DbPool,
        album_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photos WHERE album_id = $1
             ORDER BY uploaded_at ASC, id ASC"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(album_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a stored filename is already taken.
    pub async fn filename_exists(pool: &DbPool, filename: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM photos WHERE filename = $1")
            .bind(filename)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    /// Delete a photo row. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
