pub mod album;
pub mod auth;
pub mod health;
pub mod photo;
pub mod trip;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                      signup (public)
/// /auth/login                       login (public)
/// /auth/refresh                     refresh (public)
/// /auth/logout                      logout (requires auth)
/// /auth/me                          current user
///
/// /trips                            list, create
/// /trips/join                       join by code (POST)
/// /trips/{id}                       trip page
/// /trips/{id}/photos                multipart upload (POST)
///
/// /albums/{id}                      album view
/// /albums/{id}/download             album ZIP
///
/// /photos/{id}                      delete
/// /photos/{id}/download             single download
/// /photos/download                  selection download (POST)
/// /photos/delete                    selection delete (POST)
///
/// /debug/db                         database diagnostics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/trips", trip::router())
        .nest("/albums", album::router())
        .nest("/photos", photo::router())
        .nest("/debug", health::debug_router())
}
