/**
 * Server Initialization
 *
 * This module assembles the Axum application: registry, media store,
 * optional database pool and the router.
 *
 * # Initialization Process
 *
 * 1. Create the connection registry
 * 2. Create the media store for uploaded images
 * 3. Load the optional database pool and run migrations
 * 4. Build the router around the shared state
 *
 * # Error Handling
 *
 * Initialization is resilient: a missing database disables the
 * database-backed handlers (they answer 503) but the server starts and
 * the realtime subsystem works. An unusable upload directory falls back
 * to a temp directory.
 */

use crate::media::MediaStore;
use crate::realtime::registry::ConnectionRegistry;
use crate::routes::router::create_router;
use crate::server::config::{load_database, upload_dir};
use crate::server::state::AppState;
use axum::Router;
use std::sync::Arc;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing pulsechat backend server");

    // Step 1: the process-wide presence registry, shared by the gateway
    // and the REST send path.
    let registry = Arc::new(ConnectionRegistry::new());

    // Step 2: blob store for uploaded images.
    let media = match MediaStore::new(upload_dir()) {
        Ok(media) => media,
        Err(e) => {
            let fallback = std::env::temp_dir().join("pulsechat-uploads");
            tracing::error!(
                "Upload directory unusable ({:?}), falling back to {}",
                e,
                fallback.display()
            );
            MediaStore::new(fallback).expect("usable upload directory")
        }
    };

    // Step 3: optional database.
    let db_pool = load_database().await;

    let app_state = AppState {
        registry,
        db_pool,
        media,
    };

    // Step 4: router with all routes.
    let app = create_router(app_state);
    tracing::info!("Router configured");

    app
}
