//! Routes Module
//!
//! HTTP route configuration and router assembly.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports and documentation
//! ├── router.rs     - Router assembly (ws, uploads, fallback)
//! └── api_routes.rs - REST API routes (auth, messages)
//! ```

/// Router assembly
pub mod router;

/// REST API routes
pub mod api_routes;

// Re-export commonly used items
pub use router::create_router;
