//! Handlers for the `/auth` resource (register, login, user directory).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use projecthub_core::error::CoreError;
use projecthub_db::models::user::{CreateUser, User, UserSummary};
use projecthub_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::AuthResponse;
use crate::state::AppState;

/// Unique constraint on `users.email`.
const EMAIL_CONSTRAINT: &str = "uq_users_email";

/// Message shared by every login failure so callers cannot discover registered emails.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default, alias = "profilePicUrl")]
    pub profile_picture_url: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and return a token for it.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(user_exists());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
            profile_picture_url: input.profile_picture_url,
        },
    )
    .await
    .map_err(registration_error)?;

    tracing::info!(user_id = user.id, "User registered");

    let response = auth_response(&state, &user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    input.validate()?;

    let invalid = || AppError::Core(CoreError::Validation(INVALID_CREDENTIALS.into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected");
        return Err(invalid());
    }

    Ok(Json(auth_response(&state, &user)?))
}

/// GET /api/auth/users
///
/// Every registered user, without credentials.
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<UserSummary>>> {
    let users = UserRepo::list_summaries(&state.pool).await?;
    Ok(Json(users))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn user_exists() -> AppError {
    AppError::Core(CoreError::Validation("User already exists".into()))
}

/// Translate an insert failure. A concurrent registration that wins the race
/// for the same email surfaces here as a unique violation.
pub fn registration_error(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err, EMAIL_CONSTRAINT) {
        user_exists()
    } else {
        AppError::Database(err)
    }
}

fn auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        token,
        user: UserSummary::from(user),
    })
}
