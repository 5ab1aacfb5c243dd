use crate::{
    config::UploadLimits,
    error::{PromptError, Result},
    models::ImageReference,
};
use std::path::Path;

/// Media type for an accepted image file, by extension. Anything outside the
/// filter is rejected before it enters a draft.
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Validates already-read bytes against the configured bounds and wraps them
/// into an [`ImageReference`].
pub fn image_reference_from_bytes(
    path: &Path,
    bytes: Vec<u8>,
    limits: &UploadLimits,
) -> Result<ImageReference> {
    let mime_type = mime_from_path(path)
        .ok_or_else(|| PromptError::Validation("仅支持图片文件。".into()))?;
    if bytes.len() > limits.max_image_bytes {
        return Err(PromptError::Validation(format!(
            "图片超过大小上限（{} MB）。",
            limits.max_image_bytes / (1024 * 1024)
        )));
    }
    Ok(ImageReference::new(bytes, mime_type))
}

/// Reads an image from disk for the click-to-browse and drag-and-drop paths.
pub fn read_image_reference(path: &Path, limits: &UploadLimits) -> Result<ImageReference> {
    let bytes = std::fs::read(path)
        .map_err(|e| PromptError::Validation(format!("无法读取文件: {}", e)))?;
    image_reference_from_bytes(path, bytes, limits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn mime_detection_by_extension() {
        assert_eq!(
            mime_from_path(Path::new("/tmp/frame.PNG")),
            Some("image/png")
        );
        assert_eq!(
            mime_from_path(Path::new("cover.jpeg")),
            Some("image/jpeg")
        );
        assert_eq!(mime_from_path(Path::new("notes.txt")), None);
        assert_eq!(mime_from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn non_image_files_are_rejected() {
        let limits = UploadLimits::default();
        let err = image_reference_from_bytes(&PathBuf::from("a.pdf"), vec![0; 10], &limits)
            .err()
            .unwrap();
        assert!(matches!(err, PromptError::Validation(_)));
    }

    #[test]
    fn oversized_uploads_are_rejected() {
        let limits = UploadLimits::new().with_max_image_bytes(4);
        let err = image_reference_from_bytes(&PathBuf::from("a.png"), vec![0; 5], &limits)
            .err()
            .unwrap();
        assert!(matches!(err, PromptError::Validation(_)));

        let ok = image_reference_from_bytes(&PathBuf::from("a.png"), vec![0; 4], &limits);
        assert_eq!(ok.unwrap().mime_type, "image/png");
    }
}
