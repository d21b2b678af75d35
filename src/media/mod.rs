//! Media Module
//!
//! Local blob store for uploaded images. Clients send images inline as
//! `data:` URLs (profile pictures and message attachments); this module
//! decodes them, writes them under the upload directory and hands back the
//! public path they are served from.

/// Blob store implementation
pub mod store;

// Re-export commonly used types
pub use store::{MediaError, MediaStore};
