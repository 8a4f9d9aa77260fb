use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clients/register", post(auth::register_client))
        .route("/clients/login", post(auth::login_client))
        .route("/freelancers/register", post(auth::register_freelancer))
        .route("/freelancers/login", post(auth::login_freelancer))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
}
