//! Handlers for the `/notes` resource.
//!
//! List, create, retrieve, replace (`PUT`), partially update (`PATCH`), and
//! delete notes. Every operation is scoped to the authenticated user; a
//! note id belonging to someone else behaves exactly like a missing one.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use notty_core::error::CoreError;
use notty_core::notes::validate_note_title;
use notty_core::types::DbId;
use notty_db::models::note::{Note, NoteInput, PatchNote};
use notty_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::NoteListParams;
use crate::state::AppState;

/// GET /notes/?category=&subcategory=&limit=&offset=
///
/// Newest first.
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NoteListParams>,
) -> AppResult<Json<Vec<Note>>> {
    let (limit, offset) = params.page();
    let notes = NoteRepo::list(&state.pool, auth.user_id, params.filter(), limit, offset).await?;
    Ok(Json(notes))
}

/// POST /notes/
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<NoteInput>,
) -> AppResult<(StatusCode, Json<Note>)> {
    validate_note_title(&input.title).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let note = NoteRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        note_id = note.id,
        category_id = ?note.category_id,
        subcategory_id = ?note.subcategory_id,
        "Note created"
    );

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notes/{id}/
pub async fn get_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Note>> {
    let note = NoteRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Note", id }))?;

    Ok(Json(note))
}

/// PUT /notes/{id}/
pub async fn replace_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<NoteInput>,
) -> AppResult<Json<Note>> {
    validate_note_title(&input.title).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let note = NoteRepo::replace(&state.pool, auth.user_id, id, &input).await?;

    tracing::info!(user_id = auth.user_id, note_id = id, "Note replaced");

    Ok(Json(note))
}

/// PATCH /notes/{id}/
pub async fn patch_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PatchNote>,
) -> AppResult<Json<Note>> {
    if let Some(ref title) = input.title {
        validate_note_title(title).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let note = NoteRepo::patch(&state.pool, auth.user_id, id, &input).await?;

    tracing::info!(user_id = auth.user_id, note_id = id, "Note updated");

    Ok(Json(note))
}

/// DELETE /notes/{id}/
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    NoteRepo::delete(&state.pool, auth.user_id, id).await?;

    tracing::info!(user_id = auth.user_id, note_id = id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}
