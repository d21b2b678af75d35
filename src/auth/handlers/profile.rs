/**
 * Profile Update Handler
 *
 * This module implements PUT /api/auth/profile: store a new profile
 * picture (sent inline as a base64 data URL) and persist its public path
 * on the user record.
 */

use crate::auth::handlers::types::{UpdateProfileRequest, UserResponse};
use crate::auth::users::update_profile_pic;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;
use axum::{extract::State, response::Json};

/// Profile update handler (PUT /api/auth/profile)
///
/// # Errors
///
/// * `400 Bad Request` - Missing or malformed picture payload
/// * `401 Unauthorized` - No valid session (rejected by the middleware)
/// * `503 Service Unavailable` - Database is not configured
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let pool = state.db_pool.as_ref().ok_or(AppError::DatabaseUnavailable)?;

    if request.profile_pic.is_empty() {
        return Err(AppError::bad_request("Profile picture is required"));
    }

    let pic_url = state.media.save_data_url(&request.profile_pic).await?;
    let updated = update_profile_pic(pool, user.user_id, pic_url).await?;

    tracing::info!("Profile picture updated for user {}", user.user_id);

    Ok(Json(UserResponse::from(updated)))
}
