/**
 * Login and Logout Handlers
 *
 * This module implements POST /api/auth/login and POST /api/auth/logout.
 *
 * # Security
 *
 * An unknown email and a wrong password produce the same 401 response,
 * so the endpoint does not reveal which accounts exist.
 */

use crate::auth::handlers::types::{LoginRequest, StatusResponse, UserResponse};
use crate::auth::sessions::{clear_session_cookie, create_token, session_cookie};
use crate::auth::users::get_user_by_email;
use crate::error::AppError;
use crate::server::state::AppState;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Json},
};
use bcrypt::verify;

/// Login handler (POST /api/auth/login)
///
/// Verifies the credentials, issues the session cookie and returns the
/// public user info.
///
/// # Errors
///
/// * `400 Bad Request` - Missing email or password
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `503 Service Unavailable` - Database is not configured
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let pool = state.db_pool.as_ref().ok_or(AppError::DatabaseUnavailable)?;

    if request.email.is_empty() || request.password.is_empty() {
        return Err(AppError::bad_request("All fields are required"));
    }

    let user = get_user_by_email(pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login attempt for unknown email");
            AppError::handler(StatusCode::UNAUTHORIZED, "Wrong email or password")
        })?;

    let valid = verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        AppError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    })?;

    if !valid {
        tracing::warn!("Invalid password for user {}", user.id);
        return Err(AppError::handler(
            StatusCode::UNAUTHORIZED,
            "Wrong email or password",
        ));
    }

    let token = create_token(user.id, user.email.clone()).map_err(|e| {
        tracing::error!("Failed to create session token: {:?}", e);
        AppError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    })?;

    tracing::info!("User logged in: {}", user.id);

    Ok((
        [(SET_COOKIE, session_cookie(&token))],
        Json(UserResponse::from(user)),
    ))
}

/// Logout handler (POST /api/auth/logout)
///
/// Clears the session cookie. Always succeeds; there is no server-side
/// session state to tear down.
pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie())],
        Json(StatusResponse {
            message: "Logout success".to_string(),
        }),
    )
}
