//! Proposal endpoints for both surfaces.
//!
//! Freelancers author and maintain proposal content; clients review
//! them and drive the status machine. The accept/reject side effects on
//! the freelancer's client book live in the repository transaction.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lancer_core::types::DbId;
use lancer_db::models::proposal::{CreateProposal, Proposal, ProposalStatus, UpdateProposal};
use lancer_db::models::session::ActorKind;
use lancer_db::repositories::{ClientRepo, ProposalRepo};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StatusFilter {
    pub status: Option<ProposalStatus>,
}

/// The status is carried as a raw string so an unknown value surfaces
/// as a validation failure instead of a body-deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

fn parse_status(raw: &str) -> Result<ProposalStatus, AppError> {
    match raw {
        "Pending" => Ok(ProposalStatus::Pending),
        "Accepted" => Ok(ProposalStatus::Accepted),
        "Rejected" => Ok(ProposalStatus::Rejected),
        other => Err(AppError::BadRequest(format!(
            "invalid proposal status: {other}"
        ))),
    }
}

/// POST /freelancers/{freelancer_id}/proposals
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
    Json(input): Json<CreateProposal>,
) -> Result<(StatusCode, Json<Proposal>), AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    ClientRepo::find_by_id(&state.pool, input.client_id)
        .await?
        .ok_or_else(|| AppError::not_found("client", input.client_id))?;
    let proposal = ProposalRepo::create(&state.pool, freelancer_id, &input).await?;
    tracing::info!(freelancer_id, proposal_id = proposal.id, "proposal created");
    Ok((StatusCode::CREATED, Json(proposal)))
}

/// GET /freelancers/{freelancer_id}/proposals?status=
pub async fn list_for_freelancer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<Proposal>>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let proposals =
        ProposalRepo::list_by_freelancer(&state.pool, freelancer_id, filter.status).await?;
    Ok(Json(proposals))
}

/// GET /freelancers/{freelancer_id}/proposals/{proposal_id}
pub async fn get_for_freelancer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, proposal_id)): Path<(DbId, DbId)>,
) -> Result<Json<Proposal>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let proposal = ProposalRepo::find_for_freelancer(&state.pool, freelancer_id, proposal_id)
        .await?
        .ok_or_else(|| AppError::not_found("proposal", proposal_id))?;
    Ok(Json(proposal))
}

/// PUT /freelancers/{freelancer_id}/proposals/{proposal_id}
///
/// Content-only update; identity and status are immutable here.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, proposal_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProposal>,
) -> Result<Json<Proposal>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let proposal = ProposalRepo::update(&state.pool, freelancer_id, proposal_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("proposal", proposal_id))?;
    Ok(Json(proposal))
}

/// DELETE /freelancers/{freelancer_id}/proposals/{proposal_id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, proposal_id)): Path<(DbId, DbId)>,
) -> Result<StatusCode, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let removed =
        ProposalRepo::delete_for_freelancer(&state.pool, freelancer_id, proposal_id).await?;
    if !removed {
        return Err(AppError::not_found("proposal", proposal_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /clients/{client_id}/proposals?status=
pub async fn list_for_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(client_id): Path<DbId>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<Proposal>>, AppError> {
    auth.require(ActorKind::Client, client_id)?;
    let proposals = ProposalRepo::list_by_client(&state.pool, client_id, filter.status).await?;
    Ok(Json(proposals))
}

/// GET /clients/{client_id}/proposals/{proposal_id}
pub async fn get_for_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((client_id, proposal_id)): Path<(DbId, DbId)>,
) -> Result<Json<Proposal>, AppError> {
    auth.require(ActorKind::Client, client_id)?;
    let proposal = ProposalRepo::find_for_client(&state.pool, client_id, proposal_id, None)
        .await?
        .ok_or_else(|| AppError::not_found("proposal", proposal_id))?;
    Ok(Json(proposal))
}

/// PUT /clients/{client_id}/proposals/{proposal_id}/status
///
/// The status transition, with its side effects on the freelancer's
/// client book, runs in a single transaction. Accepting twice is
/// idempotent; rejecting removes only the matching book entry.
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((client_id, proposal_id)): Path<(DbId, DbId)>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<Proposal>, AppError> {
    auth.require(ActorKind::Client, client_id)?;
    let status = parse_status(&req.status)?;
    let proposal = ProposalRepo::set_status(&state.pool, client_id, proposal_id, status)
        .await?
        .ok_or_else(|| AppError::not_found("proposal", proposal_id))?;
    tracing::info!(client_id, proposal_id, ?status, "proposal status changed");
    Ok(Json(proposal))
}

/// GET /clients/{client_id}/projects — the client's engagements, i.e.
/// accepted proposals, newest first.
pub async fn list_accepted(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(client_id): Path<DbId>,
) -> Result<Json<Vec<Proposal>>, AppError> {
    auth.require(ActorKind::Client, client_id)?;
    let proposals =
        ProposalRepo::list_by_client(&state.pool, client_id, Some(ProposalStatus::Accepted))
            .await?;
    Ok(Json(proposals))
}

/// GET /clients/{client_id}/projects/{proposal_id}
pub async fn get_accepted(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((client_id, proposal_id)): Path<(DbId, DbId)>,
) -> Result<Json<Proposal>, AppError> {
    auth.require(ActorKind::Client, client_id)?;
    let proposal = ProposalRepo::find_for_client(
        &state.pool,
        client_id,
        proposal_id,
        Some(ProposalStatus::Accepted),
    )
    .await?
    .ok_or_else(|| AppError::not_found("proposal", proposal_id))?;
    Ok(Json(proposal))
}

/// DELETE /clients/{client_id}/projects/{proposal_id} — only an
/// accepted proposal can be removed from the engagement list.
pub async fn delete_accepted(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((client_id, proposal_id)): Path<(DbId, DbId)>,
) -> Result<StatusCode, AppError> {
    auth.require(ActorKind::Client, client_id)?;
    let removed =
        ProposalRepo::delete_accepted_for_client(&state.pool, client_id, proposal_id).await?;
    if !removed {
        return Err(AppError::not_found("proposal", proposal_id));
    }
    Ok(StatusCode::NO_CONTENT)
}
