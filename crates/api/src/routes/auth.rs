//! Route definitions for registration and tokens.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST /register/        -> register
/// POST /token/           -> obtain_token
/// POST /token/refresh/   -> refresh_token
/// POST /logout/          -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/", post(auth::register))
        .route("/token/", post(auth::obtain_token))
        .route("/token/refresh/", post(auth::refresh_token))
        .route("/logout/", post(auth::logout))
}
