/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require a
 * valid session. The session JWT is read from the `jwt` cookie (with a
 * `Bearer` Authorization header accepted as a fallback), verified, and
 * the resulting user identity is attached to request extensions for use
 * in handlers.
 */

use crate::auth::sessions::{verify_token, SESSION_COOKIE};
use crate::auth::users::get_user_by_id;
use crate::error::AppError;
use crate::server::state::AppState;
use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Authenticated user data extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Extract the session token from request headers
///
/// Looks for the `jwt` cookie first, then a `Bearer` Authorization header.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(cookies) = headers.get(COOKIE).and_then(|v| v.to_str().ok()) {
        for pair in cookies.split(';') {
            let pair = pair.trim();
            if let Some(value) = pair.strip_prefix(SESSION_COOKIE) {
                if let Some(token) = value.strip_prefix('=') {
                    if !token.is_empty() {
                        return Some(token.to_string());
                    }
                }
            }
        }
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the session token from the cookie or Authorization header
/// 2. Verifies the token
/// 3. Confirms the user still exists in the database (when configured)
/// 4. Attaches an `AuthenticatedUser` to request extensions
///
/// Returns 401 Unauthorized if the token is missing or invalid.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = token_from_headers(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing session token");
        AppError::Unauthorized
    })?;

    let claims = verify_token(&token).map_err(|e| {
        tracing::warn!("Invalid session token: {:?}", e);
        AppError::Unauthorized
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::warn!("Invalid user id in session token: {:?}", e);
        AppError::Unauthorized
    })?;

    if let Some(pool) = &state.db_pool {
        if get_user_by_id(pool, user_id).await?.is_none() {
            tracing::warn!("Session for deleted user {}", user_id);
            return Err(AppError::Unauthorized);
        }
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Used as a handler parameter to pick up the `AuthenticatedUser` the
/// middleware stored in request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                AppError::Unauthorized
            })?;

        Ok(AuthUser(user))
    }
}
