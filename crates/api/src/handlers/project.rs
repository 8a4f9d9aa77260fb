//! Project CRUD with team assignment reconciliation and the activity
//! log. Assignment changes and activity appends happen inside the
//! repository transactions; handlers only shape the responses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lancer_core::types::DbId;
use lancer_db::models::project::{ActivityEntry, CreateProject, Project, UpdateProject};
use lancer_db::models::session::ActorKind;
use lancer_db::repositories::{ClientRepo, ProjectRepo};
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// A project together with its assigned team member ids.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: Project,
    pub assigned_to: Vec<DbId>,
}

/// A single project, expanded with its activity log.
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: Project,
    pub assigned_to: Vec<DbId>,
    pub activity: Vec<ActivityEntry>,
}

/// POST /freelancers/{freelancer_id}/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
    Json(input): Json<CreateProject>,
) -> Result<(StatusCode, Json<ProjectResponse>), AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }
    ClientRepo::find_by_id(&state.pool, input.client_id)
        .await?
        .ok_or_else(|| AppError::not_found("client", input.client_id))?;
    let (project, assigned_to) = ProjectRepo::create(&state.pool, freelancer_id, &input).await?;
    tracing::info!(freelancer_id, project_id = project.id, "project created");
    Ok((StatusCode::CREATED, Json(ProjectResponse { project, assigned_to })))
}

/// GET /freelancers/{freelancer_id}/projects
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let projects = ProjectRepo::list_by_freelancer(&state.pool, freelancer_id).await?;
    let mut out = Vec::with_capacity(projects.len());
    for project in projects {
        let assigned_to = ProjectRepo::assigned_member_ids(&state.pool, project.id).await?;
        out.push(ProjectResponse { project, assigned_to });
    }
    Ok(Json(out))
}

/// GET /freelancers/{freelancer_id}/projects/{project_id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, project_id)): Path<(DbId, DbId)>,
) -> Result<Json<ProjectDetailResponse>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let project = ProjectRepo::find_by_id_for_freelancer(&state.pool, freelancer_id, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("project", project_id))?;
    let assigned_to = ProjectRepo::assigned_member_ids(&state.pool, project_id).await?;
    let activity = ProjectRepo::activity(&state.pool, project_id).await?;
    Ok(Json(ProjectDetailResponse { project, assigned_to, activity }))
}

/// PUT /freelancers/{freelancer_id}/projects/{project_id}
///
/// Partial update. When `assigned_to` is present the assignment set is
/// reconciled against it: members missing from the new set are
/// unassigned, new members are assigned, survivors are untouched.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, project_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProject>,
) -> Result<Json<ProjectResponse>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let (project, assigned_to) =
        ProjectRepo::update(&state.pool, freelancer_id, project_id, &input)
            .await?
            .ok_or_else(|| AppError::not_found("project", project_id))?;
    Ok(Json(ProjectResponse { project, assigned_to }))
}

/// DELETE /freelancers/{freelancer_id}/projects/{project_id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, project_id)): Path<(DbId, DbId)>,
) -> Result<StatusCode, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let removed = ProjectRepo::delete(&state.pool, freelancer_id, project_id).await?;
    if !removed {
        return Err(AppError::not_found("project", project_id));
    }
    tracing::info!(freelancer_id, project_id, "project deleted");
    Ok(StatusCode::NO_CONTENT)
}
