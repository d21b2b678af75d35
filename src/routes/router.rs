/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * the realtime gateway, the REST API and static upload serving into a
 * single Axum router.
 *
 * # Routes
 *
 * - `GET /ws` - realtime gateway (WebSocket upgrade)
 * - `/api/...` - REST API (see `api_routes`)
 * - `/uploads/...` - stored images (ServeDir)
 * - anything else - 404
 */

use crate::realtime::gateway::ws_handler;
use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;
use axum::{routing::get, Router};
use tower_http::services::ServeDir;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (registry, database pool, media store)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/ws", get(ws_handler));

    // REST API routes (auth + messages)
    let router = configure_api_routes(router, app_state.clone());

    // Serve stored images
    let router = router.nest_service("/uploads", ServeDir::new(app_state.media.root()));

    // Fallback handler for 404
    let router = router.fallback(|| async { "404 Not Found" });

    router.with_state(app_state)
}
