//! Handlers for registration and token issuance.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use notty_core::error::CoreError;
use notty_core::types::DbId;
use notty_core::users::{validate_username, MIN_PASSWORD_LENGTH};
use notty_db::models::session::CreateSession;
use notty_db::models::user::{CreateUser, UserResponse};
use notty_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /register/`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub username: String,
    #[validate(email)]
    pub email: Option<String>,
    pub password: String,
}

/// Request body for `POST /token/`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /token/refresh/`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Token pair returned by `/token/` and `/token/refresh/`.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/register/
///
/// Create a new account. Returns 201 with the public user representation.
pub async fn register(
    State(state): State<AppState>,
    Json(mut input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    // A blank email means "no email".
    input.email = input.email.take().filter(|e| !e.trim().is_empty());
    input.validate()?;

    validate_username(&input.username).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Username '{}' is already taken",
            input.username
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
    };

    // The unique constraint still guards a concurrent registration race.
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /api/token/
///
/// Exchange username + password for an access/refresh token pair.
pub async fn obtain_token(
    State(state): State<AppState>,
    Json(input): Json<TokenRequest>,
) -> AppResult<Json<TokenPair>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid_credentials());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let pair = issue_token_pair(&state, user.id).await?;
    tracing::info!(user_id = user.id, "Issued token pair");
    Ok(Json(pair))
}

/// POST /api/token/refresh/
///
/// Exchange a valid refresh token for a new pair. The presented refresh
/// token is revoked (rotation), so each one works exactly once.
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<TokenPair>> {
    let token_hash = hash_refresh_token(&input.refresh);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid_refresh_token)?;

    if !SessionRepo::revoke(&state.pool, session.id).await? {
        // Another request rotated this token first.
        return Err(invalid_refresh_token());
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let pair = issue_token_pair(&state, user.id).await?;
    Ok(Json(pair))
}

/// POST /api/logout/
///
/// Revoke all refresh tokens for the authenticated user. Returns 204.
/// Access tokens already issued stay valid until they expire.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row for the refresh
/// token, and drop the user's revoked or expired sessions.
async fn issue_token_pair(state: &AppState, user_id: DbId) -> AppResult<TokenPair> {
    let access = generate_access_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let pruned = SessionRepo::delete_stale_for_user(&state.pool, user_id).await?;
    if pruned > 0 {
        tracing::debug!(user_id, pruned, "Deleted stale sessions");
    }

    Ok(TokenPair {
        access,
        refresh: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_secs(),
    })
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

fn invalid_refresh_token() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid or expired refresh token".into(),
    ))
}
