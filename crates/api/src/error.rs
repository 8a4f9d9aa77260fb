//! API error type and its mapping onto HTTP responses.
//!
//! Every handler returns `Result<_, AppError>`. The `IntoResponse`
//! impl renders a JSON body of the shape
//! `{"error": {"code": "...", "message": "..."}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lancer_core::error::CoreError;
use serde_json::json;

/// Top-level error type for API handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        classify_sqlx_error(err)
    }
}

/// Map database errors onto the API error taxonomy.
///
/// - `RowNotFound` becomes 404.
/// - Unique violations (constraints named `uq_*`) become 400
///   `DUPLICATE_ENTITY` so clients can surface "already exists".
/// - Foreign-key violations become 409, covering deletion of a client
///   that projects or invoices still reference.
pub fn classify_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => {
            AppError::Core(CoreError::NotFound { entity: "resource", id: 0 })
        }
        sqlx::Error::Database(db_err) => {
            let code = db_err.code();
            let constraint = db_err.constraint().unwrap_or_default();
            match code.as_deref() {
                Some("23505") if constraint.starts_with("uq_") => AppError::Core(
                    CoreError::Duplicate(duplicate_message(constraint)),
                ),
                Some("23503") => AppError::Core(CoreError::Conflict(
                    "the record is still referenced by other data".to_string(),
                )),
                _ => AppError::Database(err),
            }
        }
        _ => AppError::Database(err),
    }
}

/// Human-readable message for a unique-constraint violation.
fn duplicate_message(constraint: &str) -> String {
    match constraint {
        "uq_clients_email" | "uq_freelancers_email" | "uq_team_members_email" => {
            "a record with this email already exists".to_string()
        }
        "uq_clients_mobile" | "uq_freelancers_mobile" => {
            "a record with this mobile number already exists".to_string()
        }
        other => format!("duplicate value violates {other}"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    if *id == 0 {
                        format!("{entity} not found")
                    } else {
                        format!("{entity} {id} not found")
                    },
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION", msg.clone())
                }
                CoreError::Duplicate(msg) => {
                    (StatusCode::BAD_REQUEST, "DUPLICATE_ENTITY", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", msg.clone())
                }
            },
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    err.to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "VALIDATION", msg.clone()),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));
        (status, body).into_response()
    }
}

impl AppError {
    /// 404 for a missing entity.
    pub fn not_found(entity: &'static str, id: lancer_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}
