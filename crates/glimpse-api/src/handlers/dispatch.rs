//! Dispatch trigger and status handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;

use crate::dto::response::{DispatchRunResponse, DispatchStatusResponse, EmptyDispatchResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/dispatch/run
///
/// Execute one dispatch pass. Per-record failures are reported in the
/// body with a 200; only a failed due-window query yields a 500.
pub async fn run(State(state): State<AppState>) -> Response {
    match state.dispatcher.run_once(Utc::now()).await {
        Ok(report) => {
            if report.total() == 0 {
                Json(EmptyDispatchResponse::new()).into_response()
            } else {
                Json(DispatchRunResponse::from_report(&report)).into_response()
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Dispatch pass could not query due schedules");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to query schedules",
                    "details": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// GET /api/dispatch/status
pub async fn status(
    State(state): State<AppState>,
) -> Result<Json<DispatchStatusResponse>, ApiError> {
    let now = Utc::now();
    let pending = state.schedule_repo.count_pending().await?;
    let due = state.schedule_repo.count_due(now).await?;

    Ok(Json(DispatchStatusResponse { pending, due }))
}
