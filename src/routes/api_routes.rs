/**
 * API Route Handlers
 *
 * This module wires the REST API endpoints:
 *
 * ## Authentication
 * - `POST /api/auth/signup` - User registration (public)
 * - `POST /api/auth/login` - User login (public)
 * - `POST /api/auth/logout` - Clear the session cookie (public)
 * - `GET /api/auth/check` - Current user info (requires session)
 * - `PUT /api/auth/profile` - Update profile picture (requires session)
 *
 * ## Messages
 * - `GET /api/messages/users` - Sidebar user list (requires session)
 * - `GET /api/messages/{id}` - History with one user (requires session)
 * - `POST /api/messages/send/{id}` - Send a message (requires session)
 *
 * Protected routes sit behind the auth middleware, which validates the
 * session cookie and attaches the authenticated user to the request.
 */

use crate::auth::{check_auth, login, logout, signup, update_profile};
use crate::messages::{get_messages, get_sidebar_users, send_message};
use crate::middleware::auth::auth_middleware;
use crate::server::state::AppState;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

/// Configure REST API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - Application state, needed by the auth middleware
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/check", get(check_auth))
        .route("/api/auth/profile", put(update_profile))
        .route("/api/messages/users", get(get_sidebar_users))
        .route("/api/messages/{id}", get(get_messages))
        .route("/api/messages/send/{id}", post(send_message))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    router
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .merge(protected)
}
