//! Loading local images for multimodal tutor requests.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use std::path::Path;
use studybuddy_core::error::{Result, StudyBuddyError};
use studybuddy_core::tutor::ImageInput;

/// Reads an image file and encodes it for inline upload.
///
/// The MIME type is guessed from the extension; anything that is not an
/// image is rejected.
pub async fn load_image(path: &Path) -> Result<ImageInput> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(StudyBuddyError::validation(format!(
            "'{}' is not an image ({})",
            path.display(),
            mime
        )));
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        StudyBuddyError::io(format!("Failed to read '{}': {}", path.display(), e))
    })?;

    Ok(ImageInput {
        mime_type: mime.essence_str().to_string(),
        data: BASE64_STANDARD.encode(bytes),
    })
}
