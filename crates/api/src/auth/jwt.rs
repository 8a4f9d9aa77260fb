//! JWT issuance and validation.
//!
//! Access tokens are short-lived HS256 JWTs carrying the user id and
//! actor kind. Refresh tokens are opaque random strings; only their
//! SHA-256 hash is persisted in the sessions table.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lancer_core::types::DbId;
use lancer_db::models::session::ActorKind;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// JWT configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret.
    pub secret: String,
    /// Access token lifetime in minutes.
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days.
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Load from environment variables. Panics if `JWT_SECRET` is unset
    /// since issuing unsigned tokens is never acceptable.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        let access_token_expiry_mins = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a number");
        let refresh_token_expiry_days = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a number");
        Self { secret, access_token_expiry_mins, refresh_token_expiry_days }
    }
}

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (client or freelancer, per `actor`).
    pub sub: DbId,
    /// Which table `sub` refers to.
    pub actor: ActorKind,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
    /// Unique token id.
    pub jti: String,
}

/// Sign a new access token for the given user.
pub fn generate_access_token(
    config: &JwtConfig,
    user_id: DbId,
    actor: ActorKind,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        actor,
        iat: now.timestamp(),
        exp: (now + Duration::minutes(config.access_token_expiry_mins)).timestamp(),
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate an access token and return its claims. Expired or
/// tampered tokens produce an error.
pub fn validate_token(
    config: &JwtConfig,
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Generate an opaque refresh token. Two UUIDs give 256 bits of
/// randomness.
pub fn generate_refresh_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Hash a refresh token for storage; the plaintext never touches the
/// database.
pub fn hash_refresh_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{digest:x}")
}
