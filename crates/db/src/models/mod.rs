//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts where the table has one
//! - Joined read models used by the API (`*Summary`, `*Context`)

pub mod album;
pub mod photo;
pub mod session;
pub mod trip;
pub mod user;
