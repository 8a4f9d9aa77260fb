use crate::types::DbId;

/// Domain-level error type shared by the `db` and `api` crates.
///
/// The HTTP layer maps each variant to a status code in `lancer-api`'s
/// `AppError`; see that crate's `error` module.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row matched the given id (or the id plus an ownership scope).
    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: DbId,
    },

    /// Request payload failed validation (missing field, bad enum value,
    /// mismatched password confirmation, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A uniqueness constraint was violated (duplicate email/mobile).
    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    /// The operation would break referential integrity (e.g. deleting a
    /// client that projects or invoices still point at).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to act on this resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
