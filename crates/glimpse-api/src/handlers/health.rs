//! Health check handlers.

use axum::Json;
use axum::extract::State;

use glimpse_database::connection::health_check;

use crate::dto::response::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/db
pub async fn health_db(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    health_check(&state.db_pool).await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
