/**
 * Messaging HTTP Handlers
 *
 * This module contains the REST handlers for direct messaging:
 *
 * - `GET /api/messages/users` - every other user (the chat sidebar)
 * - `GET /api/messages/{id}` - full history with one user
 * - `POST /api/messages/send/{id}` - create a message
 *
 * All three routes sit behind the auth middleware.
 *
 * # Send Path
 *
 * Sending first persists the message, then hands it to the realtime
 * dispatcher. Dispatch is best-effort: an offline receiver (or a stalled
 * connection) changes nothing about the response, the message is stored
 * and retrievable through the history endpoint either way.
 */

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::list_users_except;
use crate::error::AppError;
use crate::messages::db::{create_message, find_messages_between, Message};
use crate::middleware::auth::AuthUser;
use crate::realtime::dispatch;
use crate::server::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Send message request
///
/// At least one of `text` and `image` must be present. `image` is a
/// base64 data URL; it is stored through the media store and the message
/// carries the resulting public path.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub text: Option<String>,
    pub image: Option<String>,
}

impl SendMessageRequest {
    /// A request is empty when it carries neither text nor an image
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().map_or(true, str::is_empty)
            && self.image.as_deref().map_or(true, str::is_empty)
    }
}

/// Map an insert failure, surfacing an unknown receiver as 404
///
/// The messages table carries a foreign key on `receiver_id`; a violation
/// there means the addressed user does not exist.
fn map_insert_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::handler(StatusCode::NOT_FOUND, "Receiver not found")
        }
        _ => e.into(),
    }
}

/// Sidebar user list handler (GET /api/messages/users)
///
/// Returns every registered user except the caller.
///
/// # Errors
///
/// * `401 Unauthorized` - No valid session (rejected by the middleware)
/// * `503 Service Unavailable` - Database is not configured
pub async fn get_sidebar_users(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let pool = state.db_pool.as_ref().ok_or(AppError::DatabaseUnavailable)?;

    let users = list_users_except(pool, user.user_id).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Message history handler (GET /api/messages/{id})
///
/// Returns the full history between the caller and the given user, both
/// directions, ordered ascending by creation time.
///
/// # Errors
///
/// * `401 Unauthorized` - No valid session (rejected by the middleware)
/// * `503 Service Unavailable` - Database is not configured
pub async fn get_messages(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(other_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, AppError> {
    let pool = state.db_pool.as_ref().ok_or(AppError::DatabaseUnavailable)?;

    let messages = find_messages_between(pool, user.user_id, other_id).await?;
    Ok(Json(messages))
}

/// Send message handler (POST /api/messages/send/{id})
///
/// Persists the message, then pushes it to the receiver's live connection
/// if one exists.
///
/// # Errors
///
/// * `400 Bad Request` - Neither text nor image present, or malformed image
/// * `401 Unauthorized` - No valid session (rejected by the middleware)
/// * `503 Service Unavailable` - Database is not configured
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(receiver_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let pool = state.db_pool.as_ref().ok_or(AppError::DatabaseUnavailable)?;

    if request.is_empty() {
        return Err(AppError::bad_request("Message must have text or an image"));
    }

    let image_url = match request.image.as_deref().filter(|s| !s.is_empty()) {
        Some(data_url) => Some(state.media.save_data_url(data_url).await?),
        None => None,
    };

    let message = create_message(
        pool,
        user.user_id,
        receiver_id,
        request.text.filter(|s| !s.is_empty()),
        image_url,
    )
    .await
    .map_err(map_insert_error)?;

    // Best-effort push; the response is decided by the insert above.
    dispatch(&state.registry, &message);

    Ok((StatusCode::CREATED, Json(message)))
}
