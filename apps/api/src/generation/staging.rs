//! Image staging — writes an uploaded profile picture to a scoped temp file.
//!
//! The file lives exactly as long as the returned `StagedImage`; dropping it
//! removes the file, whether assembly succeeded or not.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::AppError;
use crate::render::ImageKind;

#[derive(Debug)]
pub struct StagedImage {
    file: NamedTempFile,
}

impl StagedImage {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Only PNG and JPEG uploads are accepted.
pub fn validate_image(bytes: &[u8]) -> Result<ImageKind, AppError> {
    ImageKind::sniff(bytes).ok_or_else(|| {
        AppError::Validation("Profile image must be a PNG or JPEG file".to_string())
    })
}

/// Stages `bytes` under `dir` with a suffix matching the sniffed image kind.
pub fn stage_image(dir: &Path, bytes: &[u8]) -> Result<StagedImage, AppError> {
    let kind = validate_image(bytes)?;

    let mut file = tempfile::Builder::new()
        .prefix("profile-")
        .suffix(&format!(".{}", kind.extension()))
        .tempfile_in(dir)
        .map_err(AppError::ImageStaging)?;
    file.write_all(bytes).map_err(AppError::ImageStaging)?;
    file.flush().map_err(AppError::ImageStaging)?;

    debug!("Staged {} byte image at {}", bytes.len(), file.path().display());
    Ok(StagedImage { file })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::image::fixtures::{jpeg_header, png_header};

    #[test]
    fn test_staged_file_exists_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let staged = stage_image(dir.path(), &png_header(2, 2)).unwrap();
        let path = staged.path().to_path_buf();

        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), png_header(2, 2));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));

        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn test_jpeg_gets_jpeg_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let staged = stage_image(dir.path(), &jpeg_header(2, 2)).unwrap();
        assert!(staged.path().to_string_lossy().ends_with(".jpeg"));
    }

    #[test]
    fn test_unsupported_format_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = stage_image(dir.path(), b"GIF89a").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_directory_is_staging_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = stage_image(&missing, &png_header(2, 2)).unwrap_err();
        assert!(matches!(err, AppError::ImageStaging(_)));
    }
}
