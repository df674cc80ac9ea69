//! Handlers for the `/subcategories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use notty_core::error::CoreError;
use notty_core::notes::validate_subcategory_name;
use notty_core::types::DbId;
use notty_db::models::subcategory::{CreateSubcategory, Subcategory, UpdateSubcategory};
use notty_db::repositories::SubcategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::SubcategoryListParams;
use crate::state::AppState;

/// GET /subcategories/?category=
pub async fn list_subcategories(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SubcategoryListParams>,
) -> AppResult<Json<Vec<Subcategory>>> {
    let subcategories = SubcategoryRepo::list(&state.pool, auth.user_id, params.category).await?;
    Ok(Json(subcategories))
}

/// POST /subcategories/
///
/// The parent category must exist and belong to the caller (400 otherwise).
pub async fn create_subcategory(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSubcategory>,
) -> AppResult<(StatusCode, Json<Subcategory>)> {
    validate_subcategory_name(&input.name)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let subcategory = SubcategoryRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        subcategory_id = subcategory.id,
        parent_category_id = subcategory.parent_category_id,
        "Subcategory created"
    );

    Ok((StatusCode::CREATED, Json(subcategory)))
}

/// GET /subcategories/{id}/
pub async fn get_subcategory(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Subcategory>> {
    let subcategory = SubcategoryRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subcategory",
            id,
        }))?;

    Ok(Json(subcategory))
}

/// PUT /subcategories/{id}/
///
/// Renames only; `parent_category_id` is not accepted here.
pub async fn update_subcategory(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubcategory>,
) -> AppResult<Json<Subcategory>> {
    validate_subcategory_name(&input.name)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let subcategory = SubcategoryRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subcategory",
            id,
        }))?;

    Ok(Json(subcategory))
}

/// DELETE /subcategories/{id}/
pub async fn delete_subcategory(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let summary = SubcategoryRepo::delete(&state.pool, auth.user_id, id).await?;

    tracing::info!(
        user_id = auth.user_id,
        subcategory_id = id,
        notes_detached = summary.notes_detached,
        "Subcategory deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
