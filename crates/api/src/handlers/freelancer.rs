//! Freelancer profile endpoints, including the profile-image upload.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use lancer_core::types::DbId;
use lancer_core::upload;
use lancer_db::models::freelancer::{ClientSnapshot, Freelancer, UpdateFreelancer};
use lancer_db::models::session::ActorKind;
use lancer_db::repositories::FreelancerRepo;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /freelancers/{freelancer_id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
) -> Result<Json<Freelancer>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let freelancer = FreelancerRepo::find_by_id(&state.pool, freelancer_id)
        .await?
        .ok_or_else(|| AppError::not_found("freelancer", freelancer_id))?;
    Ok(Json(freelancer))
}

/// PUT /freelancers/{freelancer_id} — partial profile update.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
    Json(input): Json<UpdateFreelancer>,
) -> Result<Json<Freelancer>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let freelancer = FreelancerRepo::update(&state.pool, freelancer_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("freelancer", freelancer_id))?;
    Ok(Json(freelancer))
}

/// PUT /freelancers/{freelancer_id}/profile-image
///
/// Accepts a single multipart field named `profileImage`, validates it
/// (size and type allow-list), stores it under the upload directory,
/// and points the profile at the stored file.
pub async fn upload_profile_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;

    let mut stored: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("profileImage") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;

        let ext = upload::validate_profile_image(&file_name, &content_type, data.len())?;

        let dir = std::path::Path::new(&state.config.upload_dir).join("profile-images");
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal(format!("failed to create upload dir: {e}")))?;
        let stored_name = format!("{}.{ext}", Uuid::new_v4());
        tokio::fs::write(dir.join(&stored_name), &data)
            .await
            .map_err(|e| AppError::Internal(format!("failed to store upload: {e}")))?;

        stored = Some(format!("/uploads/profile-images/{stored_name}"));
        break;
    }

    let path = stored
        .ok_or_else(|| AppError::BadRequest("missing profileImage field".to_string()))?;

    let found = FreelancerRepo::set_profile_image(&state.pool, freelancer_id, &path).await?;
    if !found {
        return Err(AppError::not_found("freelancer", freelancer_id));
    }

    tracing::info!(freelancer_id, path = %path, "profile image updated");
    Ok(Json(json!({ "profile_image": path })))
}

/// GET /freelancers/{freelancer_id}/my-clients — the snapshot list
/// accumulated from accepted proposals and the client book.
pub async fn my_clients(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
) -> Result<Json<Vec<ClientSnapshot>>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let snapshots = FreelancerRepo::list_client_snapshots(&state.pool, freelancer_id).await?;
    Ok(Json(snapshots))
}
