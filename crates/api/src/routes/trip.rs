//! Route definitions for the `/trips` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::trip;
use crate::state::AppState;

/// Routes mounted at `/trips`.
///
/// ```text
/// GET  /              -> list_trips
/// POST /              -> create_trip
/// POST /join          -> join_trip
/// GET  /{id}          -> get_trip
/// POST /{id}/photos   -> upload_photos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trip::list_trips).post(trip::create_trip))
        .route("/join", post(trip::join_trip))
        .route("/{id}", get(trip::get_trip))
        .route("/{id}/photos", post(trip::upload_photos))
}
