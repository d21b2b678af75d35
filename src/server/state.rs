/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, holding:
 * - The connection registry (presence + live connection handles)
 * - An optional PostgreSQL connection pool
 * - The media store for uploaded images
 *
 * It is created once at process start and handed to the router; both the
 * realtime gateway and the REST message-creation path reach the same
 * registry through it. There is no static/global registry.
 *
 * # Thread Safety
 *
 * - `Arc<ConnectionRegistry>` - internally synchronized, shared by clone
 * - `PgPool` - already a cheap clonable handle
 * - `MediaStore` - immutable configuration, clonable
 */

use crate::media::MediaStore;
use crate::realtime::registry::ConnectionRegistry;
use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Live user-to-connection mapping
    ///
    /// Shared between the WebSocket gateway (register/unregister) and the
    /// REST send-message path (receiver lookup for push delivery).
    pub registry: Arc<ConnectionRegistry>,

    /// Database connection pool
    ///
    /// `None` when the database is not configured (`DATABASE_URL` unset or
    /// unreachable). Database-backed handlers answer 503 in that case; the
    /// realtime subsystem works regardless.
    pub db_pool: Option<PgPool>,

    /// Blob store for uploaded images
    pub media: MediaStore,
}

/// Allow handlers to extract the registry directly
///
/// The WebSocket gateway takes `State<Arc<ConnectionRegistry>>` instead of
/// the whole `AppState`.
impl FromRef<AppState> for Arc<ConnectionRegistry> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

/// Allow handlers to extract the optional database pool directly
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to extract the media store directly
impl FromRef<AppState> for MediaStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.media.clone()
    }
}

#[cfg(test)]
impl AppState {
    /// State with an empty registry, no database and a temp-dir media store
    pub fn for_tests() -> Self {
        let dir = std::env::temp_dir().join(format!("pulsechat-test-{}", uuid::Uuid::new_v4()));
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
            db_pool: None,
            media: MediaStore::new(dir).expect("temp media store"),
        }
    }
}
