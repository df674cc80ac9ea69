//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use notty_core::error::CoreError;
use notty_core::notes::validate_category_name;
use notty_core::types::DbId;
use notty_db::models::category::{Category, CreateCategory, UpdateCategory};
use notty_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /categories/
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool, auth.user_id).await?;
    Ok(Json(categories))
}

/// POST /categories/
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    validate_category_name(&input.name).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let category = CategoryRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        category_id = category.id,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /categories/{id}/
pub async fn get_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    Ok(Json(category))
}

/// PUT /categories/{id}/
pub async fn update_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    validate_category_name(&input.name).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let category = CategoryRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    Ok(Json(category))
}

/// DELETE /categories/{id}/
///
/// Deletes the category's subcategories and detaches its notes.
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let summary = CategoryRepo::delete(&state.pool, auth.user_id, id).await?;

    tracing::info!(
        user_id = auth.user_id,
        category_id = id,
        subcategories_deleted = summary.subcategories_deleted,
        notes_detached_from_category = summary.notes_detached_from_category,
        notes_detached_from_subcategory = summary.notes_detached_from_subcategory,
        "Category deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
