//! Handlers for the authenticated user's own account.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use notty_core::error::CoreError;
use notty_db::models::user::UserResponse;
use notty_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/me/
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id,
            })
        })?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/me/
///
/// Delete the account together with every category, subcategory, note, and
/// session it owns. Returns 204.
pub async fn delete_me(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let summary = UserRepo::delete(&state.pool, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        notes_deleted = summary.notes_deleted,
        subcategories_deleted = summary.subcategories_deleted,
        categories_deleted = summary.categories_deleted,
        sessions_deleted = summary.sessions_deleted,
        "User account deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
