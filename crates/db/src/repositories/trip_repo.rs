//! Repository for the `trips` and `trip_members` tables.

use friendtrip_core::types::{self, DbId};

use crate::models::trip::{CreateTrip, Trip, TripMember};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, created_by_id, created_at";

/// Provides trip and membership operations.
pub struct TripRepo;

impl TripRepo {
    /// Insert a trip and make its creator the first member, atomically.
    ///
    /// Fails with a unique violation if `input.code` is already taken.
    pub async fn create_with_creator(pool: &DbPool, input: &CreateTrip) -> Result<Trip, sqlx::Error> {
        let now = types::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO trips (name, code, created_by_id, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let trip = sqlx::query_as::<_, Trip>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.created_by_id)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO trip_members (user_id, trip_id, joined_at) VALUES ($1, $2, $3)")
            .bind(input.created_by_id)
            .bind(trip.id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(trip)
    }

    /// Find a trip by internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trips WHERE id = $1");
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a trip by its join code (expects the canonical uppercase form).
    pub async fn find_by_code(pool: &DbPool, code: &str) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trips WHERE code = $1");
        sqlx::query_as::<_, Trip>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Whether any trip already uses `code`.
    pub async fn code_exists(pool: &DbPool, code: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trips WHERE code = $1")
            .bind(code)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    /// Trips the user belongs to, most recently created first.
    pub async fn list_for_user(pool: &DbPool, user_id: DbId) -> Result<Vec<Trip>, sqlx::Error> {
        sqlx::query_as::<_, Trip>(
            "SELECT t.id, t.name, t.code, t.created_by_id, t.created_at
             FROM trips t
             JOIN trip_members m ON m.trip_id = t.id
             WHERE m.user_id = $1
             ORDER BY t.created_at DESC, t.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Whether `user_id` is a member of `trip_id`.
    pub async fn is_member(pool: &DbPool, trip_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM trip_members WHERE trip_id = $1 AND user_id = $2",
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// Add a member. Returns `false` if the user was already a member.
    pub async fn add_member(pool: &DbPool, trip_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO trip_members (user_id, trip_id, joined_at) VALUES ($1, $2, $3)
             ON CONFLICT (user_id, trip_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(trip_id)
        .bind(types::now())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Members of a trip in the order they joined.
    pub async fn list_members(pool: &DbPool, trip_id: DbId) -> Result<Vec<TripMember>, sqlx::Error> {
        sqlx::query_as::<_, TripMember>(
            "SELECT u.id AS user_id, u.username, m.joined_at
             FROM trip_members m
             JOIN users u ON u.id = m.user_id
             WHERE m.trip_id = $1
             ORDER BY m.joined_at ASC, u.id ASC",
        )
        .bind(trip_id)
        .fetch_all(pool)
        .await
    }
}
