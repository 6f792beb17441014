//! Route definitions for the `/photos` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::photo;
use crate::state::AppState;

/// Routes mounted at `/photos`.
///
/// ```text
/// POST   /download        -> download_selected
/// POST   /delete          -> delete_selected
/// DELETE /{id}            -> delete_photo
/// GET    /{id}/download   -> download_photo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/download", post(photo::download_selected))
        .route("/delete", post(photo::delete_selected))
        .route("/{id}", delete(photo::delete_photo))
        .route("/{id}/download", get(photo::download_photo))
}
