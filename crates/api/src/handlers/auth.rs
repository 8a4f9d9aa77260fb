//! Registration, login, token refresh, and logout for both actor
//! kinds. Passwords are Argon2id-hashed before they reach the
//! repositories; responses never include password material.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use lancer_db::models::client::CreateClient;
use lancer_db::models::freelancer::CreateFreelancer;
use lancer_db::models::session::{ActorKind, CreateSession};
use lancer_db::repositories::{ClientRepo, FreelancerRepo, SessionRepo};
use serde::{Deserialize, Serialize};

use crate::auth::{jwt, password};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(alias = "refreshToken")]
    pub refresh_token: String,
}

/// Token bundle plus the authenticated user's row.
#[derive(Debug, Serialize)]
pub struct AuthResponse<T: Serialize> {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: T,
}

struct TokenBundle {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
}

/// Issue an access/refresh token pair and persist the refresh session.
async fn issue_tokens(
    state: &AppState,
    user_id: i64,
    actor: ActorKind,
) -> Result<TokenBundle, AppError> {
    let jwt_config = &state.config.jwt;
    let access_token = jwt::generate_access_token(jwt_config, user_id, actor)
        .map_err(|e| AppError::Internal(format!("token generation failed: {e}")))?;
    let refresh_token = jwt::generate_refresh_token();

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id,
            actor,
            refresh_token_hash: jwt::hash_refresh_token(&refresh_token),
            expires_at: Utc::now() + Duration::days(jwt_config.refresh_token_expiry_days),
        },
    )
    .await?;

    Ok(TokenBundle {
        access_token,
        refresh_token,
        expires_in: jwt_config.access_token_expiry_mins * 60,
    })
}

fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.mobile.trim().is_empty()
        || req.password.is_empty()
    {
        return Err(AppError::BadRequest(
            "name, email, mobile and password are required".to_string(),
        ));
    }
    if req.password != req.confirm_password {
        return Err(AppError::BadRequest("passwords do not match".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

/// POST /auth/clients/register
pub async fn register_client(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse<lancer_db::models::client::Client>>), AppError> {
    validate_registration(&req)?;
    let password_hash = password::hash_password(&req.password)?;
    let client = ClientRepo::create(
        &state.pool,
        &CreateClient {
            name: req.name,
            email: req.email,
            mobile: req.mobile,
            password_hash,
            company_name: None,
            profile_image: None,
            address: None,
            bio: None,
            website: None,
            terms_agreed: None,
        },
    )
    .await?;

    let tokens = issue_tokens(&state, client.id, ActorKind::Client).await?;
    tracing::info!(client_id = client.id, "client registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            user: client,
        }),
    ))
}

/// POST /auth/clients/login
pub async fn login_client(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse<lancer_db::models::client::Client>>, AppError> {
    let client = ClientRepo::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid email or password".to_string()))?;

    if !password::verify_password(&req.password, &client.password_hash) {
        return Err(AppError::Unauthorized("invalid email or password".to_string()));
    }

    let tokens = issue_tokens(&state, client.id, ActorKind::Client).await?;
    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: client,
    }))
}

/// POST /auth/freelancers/register
pub async fn register_freelancer(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse<lancer_db::models::freelancer::Freelancer>>), AppError>
{
    validate_registration(&req)?;
    let password_hash = password::hash_password(&req.password)?;
    let freelancer = FreelancerRepo::create(
        &state.pool,
        &CreateFreelancer {
            name: req.name,
            email: req.email,
            mobile: req.mobile,
            password_hash,
        },
    )
    .await?;

    let tokens = issue_tokens(&state, freelancer.id, ActorKind::Freelancer).await?;
    tracing::info!(freelancer_id = freelancer.id, "freelancer registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            user: freelancer,
        }),
    ))
}

/// POST /auth/freelancers/login
pub async fn login_freelancer(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse<lancer_db::models::freelancer::Freelancer>>, AppError> {
    let freelancer = FreelancerRepo::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid email or password".to_string()))?;

    if !password::verify_password(&req.password, &freelancer.password_hash) {
        return Err(AppError::Unauthorized("invalid email or password".to_string()));
    }

    let tokens = issue_tokens(&state, freelancer.id, ActorKind::Freelancer).await?;
    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: freelancer,
    }))
}

/// POST /auth/refresh
///
/// Rotates the refresh token: the presented session is revoked and a
/// fresh pair is issued.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<AuthResponse<serde_json::Value>>, AppError> {
    let hash = jwt::hash_refresh_token(&req.refresh_token);
    let session = SessionRepo::find_active_by_hash(&state.pool, &hash)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid or expired refresh token".to_string()))?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = match session.actor {
        ActorKind::Client => {
            let client = ClientRepo::find_by_id(&state.pool, session.user_id)
                .await?
                .ok_or_else(|| AppError::not_found("client", session.user_id))?;
            serde_json::to_value(client)
                .map_err(|e| AppError::Internal(format!("serialization failed: {e}")))?
        }
        ActorKind::Freelancer => {
            let freelancer = FreelancerRepo::find_by_id(&state.pool, session.user_id)
                .await?
                .ok_or_else(|| AppError::not_found("freelancer", session.user_id))?;
            serde_json::to_value(freelancer)
                .map_err(|e| AppError::Internal(format!("serialization failed: {e}")))?
        }
    };

    let tokens = issue_tokens(&state, session.user_id, session.actor).await?;
    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user,
    }))
}

/// POST /auth/logout
///
/// Revokes every active session of the authenticated caller.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, AppError> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id, auth.actor).await?;
    tracing::debug!(user_id = auth.user_id, revoked, "logout");
    Ok(StatusCode::NO_CONTENT)
}
