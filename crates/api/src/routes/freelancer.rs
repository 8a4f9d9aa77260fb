use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use lancer_core::upload::MAX_UPLOAD_BYTES;

use crate::handlers::{client, freelancer, invoice, project, proposal, team_member};
use crate::state::AppState;

/// Routes nested under `/api/v1/freelancers/{freelancer_id}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(freelancer::get).put(freelancer::update))
        .route(
            "/profile-image",
            // Limit raised above the validated maximum to leave room
            // for multipart framing; the exact cap is enforced in the
            // handler.
            put(freelancer::upload_profile_image)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        .route("/clients", post(client::create).get(client::list))
        .route(
            "/clients/{client_id}",
            get(client::get).put(client::update).delete(client::delete),
        )
        .route("/clients/{client_id}/invoices", post(invoice::create))
        .route(
            "/team-members",
            post(team_member::create).get(team_member::list),
        )
        .route(
            "/team-members/{member_id}",
            get(team_member::get)
                .put(team_member::update)
                .delete(team_member::delete),
        )
        .route("/projects", post(project::create).get(project::list))
        .route(
            "/projects/{project_id}",
            get(project::get).put(project::update).delete(project::delete),
        )
        .route(
            "/proposals",
            post(proposal::create).get(proposal::list_for_freelancer),
        )
        .route(
            "/proposals/{proposal_id}",
            get(proposal::get_for_freelancer)
                .put(proposal::update)
                .delete(proposal::delete),
        )
        .route("/my-clients", get(freelancer::my_clients))
        .route("/invoices", get(invoice::list_for_freelancer))
}
