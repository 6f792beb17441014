//! Trip entity model and membership read models.

use serde::Serialize;
use sqlx::FromRow;
use friendtrip_core::types::{DbId, Timestamp};

/// A row from the `trips` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trip {
    pub id: DbId,
    pub name: String,
    /// Six-character join code, unique across trips.
    pub code: String,
    pub created_by_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a trip together with its creator's membership.
#[derive(Debug)]
pub struct CreateTrip {
    pub name: String,
    pub code: String,
    pub created_by_id: DbId,
}

/// A trip member as shown on the trip page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TripMember {
    pub user_id: DbId,
    pub username: String,
    pub joined_at: Timestamp,
}
