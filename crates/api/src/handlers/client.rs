//! Client directory and the freelancer's client book.
//!
//! Clients created through the book get a linking row in
//! `freelancer_clients`, so they appear in the freelancer's client list
//! alongside clients gained through accepted proposals.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lancer_core::types::DbId;
use lancer_db::models::client::{Address, Client, CreateClient, UpdateClient};
use lancer_db::models::session::ActorKind;
use lancer_db::repositories::{ClientRepo, FreelancerRepo};
use serde::Deserialize;

use crate::auth::password;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    #[serde(alias = "companyName")]
    pub company_name: Option<String>,
    pub address: Option<Address>,
    pub bio: Option<String>,
    pub website: Option<String>,
    #[serde(alias = "termsAgreed")]
    pub terms_agreed: Option<bool>,
}

/// GET /clients — the directory listing. Any authenticated caller.
pub async fn list_directory(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Client>>, AppError> {
    let clients = ClientRepo::list(&state.pool).await?;
    Ok(Json(clients))
}

/// POST /freelancers/{freelancer_id}/clients
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
    Json(req): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    if req.name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.mobile.trim().is_empty()
        || req.password.is_empty()
    {
        return Err(AppError::BadRequest(
            "name, email, mobile and password are required".to_string(),
        ));
    }

    let password_hash = password::hash_password(&req.password)?;
    let client = FreelancerRepo::add_client(
        &state.pool,
        freelancer_id,
        &CreateClient {
            name: req.name,
            email: req.email,
            mobile: req.mobile,
            password_hash,
            company_name: req.company_name,
            profile_image: None,
            address: req.address,
            bio: req.bio,
            website: req.website,
            terms_agreed: req.terms_agreed,
        },
    )
    .await?;

    tracing::info!(freelancer_id, client_id = client.id, "client added to book");
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /freelancers/{freelancer_id}/clients — live rows of the book.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
) -> Result<Json<Vec<Client>>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let clients = FreelancerRepo::list_clients(&state.pool, freelancer_id).await?;
    Ok(Json(clients))
}

/// GET /freelancers/{freelancer_id}/clients/{client_id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, client_id)): Path<(DbId, DbId)>,
) -> Result<Json<Client>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let client = ClientRepo::find_by_id(&state.pool, client_id)
        .await?
        .ok_or_else(|| AppError::not_found("client", client_id))?;
    Ok(Json(client))
}

/// PUT /freelancers/{freelancer_id}/clients/{client_id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, client_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateClient>,
) -> Result<Json<Client>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let client = ClientRepo::update(&state.pool, client_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("client", client_id))?;
    Ok(Json(client))
}

/// DELETE /freelancers/{freelancer_id}/clients/{client_id}
///
/// Refused with 409 while projects, proposals, or invoices still
/// reference the client (RESTRICT foreign keys).
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, client_id)): Path<(DbId, DbId)>,
) -> Result<StatusCode, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let removed = ClientRepo::delete(&state.pool, client_id).await?;
    if !removed {
        return Err(AppError::not_found("client", client_id));
    }
    Ok(StatusCode::NO_CONTENT)
}
