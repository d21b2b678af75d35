//! Authentication Module
//!
//! This module handles user accounts and session authentication:
//!
//! - **`sessions`** - JWT session tokens and the session cookie
//! - **`users`** - User model and database operations
//! - **`handlers`** - Signup, login, logout, session check and profile update
//!
//! Sessions are JWTs carried in an `HttpOnly` cookie named `jwt` (a
//! `Bearer` Authorization header is accepted as a fallback). Tokens expire
//! after seven days.

/// JWT session tokens and cookie helpers
pub mod sessions;

/// User model and database operations
pub mod users;

/// Authentication HTTP handlers
pub mod handlers;

// Re-export commonly used items
pub use handlers::{check_auth, login, logout, signup, update_profile};
