//! Messages Module
//!
//! Direct messaging between user pairs:
//!
//! - **`db`** - The message model and its database operations
//! - **`handlers`** - REST handlers for the sidebar user list, history
//!   queries and message creation
//!
//! Message creation is where persistence meets the realtime core: after a
//! message is inserted, the handler asks the dispatcher to push it to the
//! receiver's live connection. Delivery is best-effort; the request
//! succeeds or fails on persistence alone.

/// Message model and database operations
pub mod db;

/// Messaging REST handlers
pub mod handlers;

// Re-export commonly used items
pub use db::Message;
pub use handlers::{get_messages, get_sidebar_users, send_message};
