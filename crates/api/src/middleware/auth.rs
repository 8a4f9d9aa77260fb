//! Request authentication.
//!
//! `AuthUser` is an extractor: adding it to a handler's signature makes
//! the route require a valid bearer token. Handlers that serve
//! actor-scoped paths additionally call [`AuthUser::require`] to check
//! that the token belongs to the actor named in the path.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use lancer_core::types::DbId;
use lancer_db::models::session::ActorKind;

use crate::auth::jwt;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, extracted from the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: DbId,
    pub actor: ActorKind,
}

impl AuthUser {
    /// Check that this token belongs to the given actor id of the given
    /// kind. Callers own only their own path-scoped resources.
    pub fn require(&self, actor: ActorKind, user_id: DbId) -> Result<(), AppError> {
        if self.actor != actor || self.user_id != user_id {
            return Err(AppError::Forbidden(
                "you do not have access to this resource".to_string(),
            ));
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("malformed authorization header".to_string()))?;

        let claims = jwt::validate_token(&state.config.jwt, token)
            .map_err(|_| AppError::Unauthorized("invalid or expired token".to_string()))?;

        Ok(AuthUser { user_id: claims.sub, actor: claims.actor })
    }
}
