//! Auth session model backing refresh-token rotation.

use lancer_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Which kind of account a session (or token) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "actor_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Client,
    Freelancer,
}

/// A session row from the `sessions` table. Only the SHA-256 digest of
/// the refresh token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub actor: ActorKind,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub actor: ActorKind,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
