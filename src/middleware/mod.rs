//! Middleware Module
//!
//! Request-processing middleware. Currently contains the authentication
//! middleware that guards the protected API routes.

/// Authentication middleware and extractor
pub mod auth;

// Re-export commonly used items
pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
