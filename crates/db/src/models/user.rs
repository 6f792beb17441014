//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use friendtrip_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub mobile: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub mobile: String,
    pub username: String,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            mobile: user.mobile,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. Fields are expected to be normalized already.
#[derive(Debug)]
pub struct CreateUser {
    pub mobile: String,
    pub username: String,
    pub password_hash: String,
}
