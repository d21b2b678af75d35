/**
 * Session Check Handler
 *
 * This module implements GET /api/auth/check, which returns the
 * authenticated user's public info. The route sits behind the auth
 * middleware, so reaching the handler means the session is valid.
 */

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::get_user_by_id;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;
use axum::{extract::State, response::Json};

/// Session check handler (GET /api/auth/check)
///
/// # Errors
///
/// * `401 Unauthorized` - No valid session (rejected by the middleware)
/// * `404 Not Found` - The session's user no longer exists
/// * `503 Service Unavailable` - Database is not configured
pub async fn check_auth(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let pool = state.db_pool.as_ref().ok_or(AppError::DatabaseUnavailable)?;

    let user = get_user_by_id(pool, user.user_id)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;

    Ok(Json(UserResponse::from(user)))
}
