//! Intake of user-supplied image files

use image::ImageFormat;
use std::fs;
use std::path::Path;

use crate::io::error::{PuzzleError, Result};
use crate::puzzle::tiles::ImageHandle;

/// Declared MIME type of a file, derived from its extension
///
/// Returns `None` when the extension does not name an image format.
pub fn declared_image_type(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type())
        .filter(|mime| mime.starts_with("image/"))
}

/// Accept an image file and return a handle to it
///
/// # Errors
///
/// Returns [`PuzzleError::InvalidFile`] if the file does not declare an image
/// type, or [`PuzzleError::FileSystem`] if it cannot be found
pub fn intake_image_file(path: &Path) -> Result<ImageHandle> {
    if declared_image_type(path).is_none() {
        let declared_type = path
            .extension()
            .map_or_else(|| "unknown".to_string(), |ext| ext.to_string_lossy().to_string());
        tracing::info!(path = %path.display(), "rejected non-image upload");
        return Err(PuzzleError::InvalidFile {
            path: path.to_path_buf(),
            declared_type,
        });
    }

    let resolved = fs::canonicalize(path).map_err(|e| PuzzleError::FileSystem {
        path: path.to_path_buf(),
        operation: "open upload",
        source: e,
    })?;
    if !resolved.is_file() {
        return Err(PuzzleError::FileSystem {
            path: resolved,
            operation: "open upload",
            source: std::io::Error::other("not a regular file"),
        });
    }

    Ok(ImageHandle::new(resolved.to_string_lossy().into_owned()))
}
