//! Route tables. Handlers live in `crate::handlers`; this module only
//! wires paths to them.

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

mod auth;
mod client;
mod freelancer;

/// The full application router, minus middleware (applied in `main`).
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api/v1/auth", auth::router())
        .nest(
            "/api/v1/freelancers/{freelancer_id}",
            freelancer::router(),
        )
        .nest("/api/v1/clients", client::router())
}
