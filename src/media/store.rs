/**
 * Image Blob Store
 *
 * This module stores images uploaded inline as base64 data URLs. Files are
 * written under the configured upload directory with a random name and are
 * served back under `/uploads` (see the router's ServeDir mount).
 *
 * # Data URL Format
 *
 * ```text
 * data:image/png;base64,iVBORw0KGgo...
 * ```
 */

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Public URL prefix the upload directory is mounted under
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Errors from the media store
#[derive(Debug, Error)]
pub enum MediaError {
    /// The payload is not a `data:<mime>;base64,<payload>` URL
    #[error("Invalid image data URL")]
    InvalidDataUrl,

    /// The base64 payload failed to decode
    #[error("Invalid image encoding")]
    Decode(#[from] base64::DecodeError),

    /// Writing the decoded image to disk failed
    #[error("Failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed store for uploaded images
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory is created if it does not exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, MediaError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory uploaded files live in
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decode a data URL and persist it
    ///
    /// # Arguments
    ///
    /// * `data_url` - `data:<mime>;base64,<payload>` string
    ///
    /// # Returns
    ///
    /// The public path of the stored file, e.g. `/uploads/<uuid>.png`
    ///
    /// # Errors
    ///
    /// * `MediaError::InvalidDataUrl` - malformed data URL
    /// * `MediaError::Decode` - payload is not valid base64
    /// * `MediaError::Io` - the file could not be written
    pub async fn save_data_url(&self, data_url: &str) -> Result<String, MediaError> {
        let (mime, payload) = split_data_url(data_url).ok_or(MediaError::InvalidDataUrl)?;
        let bytes = BASE64.decode(payload)?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension_for(mime));
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, &bytes).await?;

        tracing::debug!("[Media] Stored {} byte upload as {}", bytes.len(), file_name);
        Ok(format!("{}/{}", UPLOADS_PREFIX, file_name))
    }
}

/// Split a data URL into its mime type and base64 payload
fn split_data_url(data_url: &str) -> Option<(&str, &str)> {
    let rest = data_url.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    if mime.is_empty() || payload.is_empty() {
        return None;
    }
    Some((mime, payload))
}

/// File extension for a handful of known image mime types
fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}
