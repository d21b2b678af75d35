//! Application Error Module
//!
//! This module defines the error types used by the HTTP handlers and their
//! conversion to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations (IntoResponse)
//! ```
//!
//! # HTTP Response Conversion
//!
//! `AppError` implements `IntoResponse` from Axum, allowing handlers to
//! return it directly. Errors are converted to a JSON body of the form
//! `{"error": "...", "status": 400}` with the appropriate status code.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::AppError;
