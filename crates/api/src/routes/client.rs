use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{client, invoice, proposal};
use crate::state::AppState;

/// Routes nested under `/api/v1/clients`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(client::list_directory))
        .route("/{client_id}/proposals", get(proposal::list_for_client))
        .route(
            "/{client_id}/proposals/{proposal_id}",
            get(proposal::get_for_client),
        )
        .route(
            "/{client_id}/proposals/{proposal_id}/status",
            put(proposal::set_status),
        )
        .route("/{client_id}/projects", get(proposal::list_accepted))
        .route(
            "/{client_id}/projects/{proposal_id}",
            get(proposal::get_accepted).delete(proposal::delete_accepted),
        )
        .route("/{client_id}/invoices", get(invoice::list_for_client))
}
