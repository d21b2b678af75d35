//! Realtime Presence and Delivery Module
//!
//! This module implements the presence and realtime message-delivery
//! subsystem: the mapping of authenticated users to live WebSocket
//! connections, the push of newly created messages to the correct
//! connection, and the broadcast of online-set changes on every
//! connect/disconnect.
//!
//! # Architecture
//!
//! The realtime module is organized into focused submodules:
//!
//! - **`registry`** - The live user-to-connection lookup table
//! - **`presence`** - Online-set broadcast to all connections
//! - **`dispatch`** - Best-effort push of new messages to the receiver
//! - **`gateway`** - WebSocket connection lifecycle (the only transport code)
//! - **`events`** - Server-to-client wire event types
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs      - Module exports and documentation
//! ├── registry.rs - Connection registry
//! ├── presence.rs - Presence broadcaster
//! ├── dispatch.rs - Message dispatcher
//! ├── gateway.rs  - WebSocket gateway
//! └── events.rs   - Wire event types
//! ```
//!
//! # Connection Lifecycle
//!
//! A client opens `GET /ws?userId=<uuid>`. The gateway registers the
//! connection in the registry, broadcasts the updated online set, and then
//! pumps outbound events until the peer disconnects. On disconnect it
//! unregisters (identity-checked, so a stale disconnect of a superseded
//! connection never evicts a newer one) and broadcasts the online set again.
//!
//! # Delivery Semantics
//!
//! Delivery is best-effort and decoupled from storage: `dispatch` is called
//! by the REST send-message handler after the insert succeeds, performs a
//! point-in-time registry lookup, and pushes to at most one connection.
//! An offline receiver is a silent no-op; the message remains queryable
//! through the history endpoint.

/// Connection registry
pub mod registry;

/// Presence broadcaster
pub mod presence;

/// Message dispatcher
pub mod dispatch;

/// WebSocket gateway
pub mod gateway;

/// Wire event types
pub mod events;

// Re-export commonly used types and functions
pub use dispatch::dispatch;
pub use events::ServerEvent;
pub use gateway::ws_handler;
pub use presence::announce;
pub use registry::{ConnId, ConnectionHandle, ConnectionRegistry};
