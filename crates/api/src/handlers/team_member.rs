//! Team member CRUD for the freelancer surface.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lancer_core::types::DbId;
use lancer_db::models::session::ActorKind;
use lancer_db::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};
use lancer_db::repositories::TeamMemberRepo;
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// A team member together with the ids of projects it is assigned to
/// (the inverse side of the assignment set).
#[derive(Debug, Serialize)]
pub struct TeamMemberResponse {
    #[serde(flatten)]
    pub member: TeamMember,
    pub assigned_projects: Vec<DbId>,
}

/// POST /freelancers/{freelancer_id}/team-members
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
    Json(input): Json<CreateTeamMember>,
) -> Result<(StatusCode, Json<TeamMember>), AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    if input.name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(AppError::BadRequest("name and email are required".to_string()));
    }
    let member = TeamMemberRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /freelancers/{freelancer_id}/team-members
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let members = TeamMemberRepo::list(&state.pool).await?;
    Ok(Json(members))
}

/// GET /freelancers/{freelancer_id}/team-members/{member_id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, member_id)): Path<(DbId, DbId)>,
) -> Result<Json<TeamMemberResponse>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let member = TeamMemberRepo::find_by_id(&state.pool, member_id)
        .await?
        .ok_or_else(|| AppError::not_found("team member", member_id))?;
    let assigned_projects = TeamMemberRepo::assigned_project_ids(&state.pool, member_id).await?;
    Ok(Json(TeamMemberResponse { member, assigned_projects }))
}

/// PUT /freelancers/{freelancer_id}/team-members/{member_id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, member_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTeamMember>,
) -> Result<Json<TeamMember>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let member = TeamMemberRepo::update(&state.pool, member_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("team member", member_id))?;
    Ok(Json(member))
}

/// DELETE /freelancers/{freelancer_id}/team-members/{member_id}
///
/// Removes the member's assignment rows along with the member.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, member_id)): Path<(DbId, DbId)>,
) -> Result<StatusCode, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let removed = TeamMemberRepo::delete(&state.pool, member_id).await?;
    if !removed {
        return Err(AppError::not_found("team member", member_id));
    }
    Ok(StatusCode::NO_CONTENT)
}
