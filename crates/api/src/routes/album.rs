//! Route definitions for the `/albums` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::album;
use crate::state::AppState;

/// Routes mounted at `/albums`.
///
/// ```text
/// GET /{id}            -> get_album
/// GET /{id}/download   -> download_album
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(album::get_album))
        .route("/{id}/download", get(album::download_album))
}
