//! Service health endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /health — verifies database connectivity.
pub async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    lancer_db::health_check(&state.pool)
        .await
        .map_err(|e| AppError::Internal(format!("database unreachable: {e}")))?;
    Ok(Json(json!({ "status": "ok" })))
}
