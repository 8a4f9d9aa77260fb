//! Profile-image upload validation.
//!
//! Uploads are bounded, synchronous, single-file operations: at most
//! 5 MiB, and only JPEG/PNG images by both file extension and declared
//! MIME type.

use crate::error::CoreError;

/// Maximum accepted upload size in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Extensions accepted for profile images, lowercase.
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// MIME types accepted for profile images.
const ALLOWED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Validate an uploaded profile image's name, declared content type, and
/// size. Returns the normalized (lowercase) extension to store the file
/// under.
pub fn validate_profile_image(
    file_name: &str,
    content_type: &str,
    size_bytes: usize,
) -> Result<String, CoreError> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "Profile image exceeds the {} byte limit",
            MAX_UPLOAD_BYTES
        )));
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(CoreError::Validation(
            "Only image files are allowed (jpg, jpeg, png)".into(),
        ));
    }

    if !ALLOWED_MIME_TYPES.contains(&content_type) {
        return Err(CoreError::Validation(format!(
            "Unsupported content type '{content_type}' for a profile image"
        )));
    }

    Ok(extension)
}
