//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - Login and logout handlers
//! ├── me.rs       - Session check handler
//! └── profile.rs  - Profile picture update handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`logout`** - POST /api/auth/logout - Clear the session cookie
//! - **`check_auth`** - GET /api/auth/check - Get current user info
//! - **`update_profile`** - PUT /api/auth/profile - Update profile picture
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - The session JWT travels in an HttpOnly cookie
//! - Wrong email and wrong password return the same 401, no information
//!   leakage
//! - Password hashes never appear in responses

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login and logout handlers
pub mod login;

/// Session check handler
pub mod me;

/// Profile update handler
pub mod profile;

// Re-export commonly used types
pub use types::{LoginRequest, SignupRequest, UpdateProfileRequest, UserResponse};

// Re-export handlers
pub use login::{login, logout};
pub use me::check_auth;
pub use profile::update_profile;
pub use signup::signup;
