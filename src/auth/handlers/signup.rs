/**
 * Signup Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate the email, display name and password
 * 2. Check that no user with the email exists
 * 3. Hash the password using bcrypt
 * 4. Create the user in the database
 * 5. Issue the session cookie
 * 6. Return the public user info
 *
 * # Validation
 *
 * - All fields are required
 * - Email must contain '@' (basic validation)
 * - Password must be at least 6 characters long
 */

use crate::auth::handlers::types::{SignupRequest, UserResponse};
use crate::auth::sessions::{create_token, session_cookie};
use crate::auth::users::{create_user, get_user_by_email};
use crate::error::AppError;
use crate::server::state::AppState;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Json},
};
use bcrypt::{hash, DEFAULT_COST};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate a signup request
///
/// Returns the first validation failure, if any.
pub fn validate_signup(request: &SignupRequest) -> Result<(), AppError> {
    if request.email.is_empty() || request.full_name.is_empty() || request.password.is_empty() {
        return Err(AppError::bad_request("All fields are required"));
    }
    if !request.email.contains('@') {
        return Err(AppError::bad_request("Invalid email address"));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

/// Sign up handler (POST /api/auth/signup)
///
/// # Errors
///
/// * `400 Bad Request` - Missing field, bad email, or short password
/// * `409 Conflict` - A user with this email already exists
/// * `503 Service Unavailable` - Database is not configured
/// * `500 Internal Server Error` - Hashing, insertion or token failure
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let pool = state.db_pool.as_ref().ok_or(AppError::DatabaseUnavailable)?;

    validate_signup(&request)?;

    if get_user_by_email(pool, &request.email).await?.is_some() {
        return Err(AppError::handler(
            StatusCode::CONFLICT,
            "Email already exists",
        ));
    }

    let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Password hashing failed: {:?}", e);
        AppError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    })?;

    let user = create_user(pool, request.email, request.full_name, password_hash).await?;

    let token = create_token(user.id, user.email.clone()).map_err(|e| {
        tracing::error!("Failed to create session token: {:?}", e);
        AppError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    })?;

    tracing::info!("User signed up: {} ({})", user.full_name, user.email);

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, session_cookie(&token))],
        Json(UserResponse::from(user)),
    ))
}
