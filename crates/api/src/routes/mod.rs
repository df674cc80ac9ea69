pub mod account;
pub mod auth;
pub mod categories;
pub mod health;
pub mod notes;
pub mod subcategories;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Paths keep their trailing slash, which is what existing clients send.
///
/// ```text
/// /register/                    register (public)
/// /token/                       obtain token pair (public)
/// /token/refresh/               rotate refresh token (public)
/// /logout/                      revoke refresh tokens
///
/// /me/                          get, delete own account
///
/// /notes/                       list, create
/// /notes/{id}/                  get, replace, patch, delete
///
/// /categories/                  list, create
/// /categories/{id}/             get, rename, delete
///
/// /subcategories/               list (?category=), create
/// /subcategories/{id}/          get, rename, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(account::router())
        .merge(notes::router())
        .merge(categories::router())
        .merge(subcategories::router())
}
