use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// `postgres` or `sqlite`.
    pub backend: &'static str,
}

/// Database diagnostics payload. Failures are reported, not raised.
#[derive(Serialize)]
pub struct DbDebugResponse {
    pub connected: bool,
    pub backend: &'static str,
    pub tables: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = friendtrip_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        backend: state.db_backend.as_str(),
    })
}

/// GET /api/v1/debug/db -- connectivity check plus the list of tables.
async fn debug_db(State(state): State<AppState>) -> Json<DbDebugResponse> {
    let backend = state.db_backend.as_str();
    let check = async {
        friendtrip_db::health_check(&state.pool).await?;
        friendtrip_db::list_tables(&state.pool, state.db_backend).await
    };

    let response = match check.await {
        Ok(tables) => DbDebugResponse {
            connected: true,
            backend,
            tables,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Database diagnostics failed");
            DbDebugResponse {
                connected: false,
                backend,
                tables: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    };
    Json(response)
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Routes mounted at `/api/v1/debug`.
pub fn debug_router() -> Router<AppState> {
    Router::new().route("/db", get(debug_db))
}
