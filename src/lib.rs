//! Pulsechat - Main Library
//!
//! Pulsechat is a minimal real-time chat backend built with Rust. It provides
//! user accounts with session-cookie authentication, direct messaging between
//! user pairs, and live delivery/presence over a persistent WebSocket
//! connection.
//!
//! # Overview
//!
//! This library provides the core functionality for Pulsechat, including:
//! - Account signup/login with bcrypt password hashing and JWT session cookies
//! - Direct message creation and history queries (PostgreSQL via sqlx)
//! - A presence registry mapping online users to live connections
//! - Best-effort push delivery of new messages to online receivers
//! - Full online-set broadcast to every connection on connect/disconnect
//!
//! # Module Structure
//!
//! The library is organized into focused modules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Session tokens, user records, signup/login handlers
//! - **`middleware`** - Request authentication middleware
//! - **`messages`** - Message persistence and REST handlers
//! - **`media`** - Local blob store for uploaded images
//! - **`realtime`** - Connection registry, presence broadcast, dispatch, gateway
//! - **`error`** - Application error types
//!
//! # State Management
//!
//! The backend uses shared state (`AppState`) that contains:
//! - The connection registry (`Arc<ConnectionRegistry>`)
//! - An optional PostgreSQL connection pool
//! - The media store for uploaded images
//!
//! State is passed by reference to both the realtime gateway and the REST
//! message-creation path, so a message persisted over REST can be pushed to
//! the receiver's live connection without any ambient global state.
//!
//! # Realtime Protocol
//!
//! Clients connect to `GET /ws?userId=<uuid>`. The server pushes JSON text
//! frames, one event per frame:
//!
//! - `{"event":"onlineUsers","data":[...]}` - full set of online user ids,
//!   re-sent to every connection after each connect/disconnect
//! - `{"event":"newMessage","data":{...}}` - a newly created message,
//!   pushed only to the receiver's connection
//!
//! Client-to-server traffic (message creation, history) goes over REST;
//! inbound WebSocket frames are drained and ignored.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Message persistence and REST handlers
pub mod messages;

/// Local blob store for uploaded images
pub mod media;

/// Presence registry, broadcast, dispatch and the WebSocket gateway
pub mod realtime;

/// Application error types
pub mod error;

// Re-export commonly used types
pub use error::AppError;
pub use realtime::events::ServerEvent;
pub use realtime::registry::{ConnectionHandle, ConnectionRegistry};
pub use server::init::create_app;
pub use server::state::AppState;
