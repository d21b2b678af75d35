//! Server Module
//!
//! Server initialization, shared application state and configuration.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── init.rs   - Application assembly (create_app)
//! ├── state.rs  - AppState and FromRef implementations
//! └── config.rs - Environment-driven configuration loading
//! ```

/// Application assembly
pub mod init;

/// Application state
pub mod state;

/// Configuration loading
pub mod config;

// Re-export commonly used items
pub use init::create_app;
pub use state::AppState;
