use axum::routing::get;
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// ```text
/// GET    /me/   -> get_me
/// DELETE /me/   -> delete_me
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me/", get(account::get_me).delete(account::delete_me))
}
