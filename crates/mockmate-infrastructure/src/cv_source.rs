//! Reads CV files from disk for upload.

use mockmate_core::cv::CvFile;
use mockmate_core::{MockMateError, Result};
use std::path::Path;

/// Reads `path` into a [`CvFile`], guessing the MIME type from the
/// extension the way a browser file picker reports it.
pub fn read_cv_file(path: &Path) -> Result<CvFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| MockMateError::validation(format!("{} is not a file", path.display())))?;

    if !path.is_file() {
        return Err(MockMateError::not_found("file", path.display().to_string()));
    }

    let mime = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string());
    let bytes = std::fs::read(path)?;

    tracing::debug!(
        "[CvSource] Read {} ({} bytes, mime {:?})",
        name,
        bytes.len(),
        mime
    );
    Ok(CvFile::new(name, mime, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pdf_mime_is_guessed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let file = read_cv_file(&path).unwrap();
        assert_eq!(file.name, "resume.pdf");
        assert_eq!(file.mime.as_deref(), Some("application/pdf"));
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_non_pdf_is_read_but_fails_validation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.docx");
        std::fs::write(&path, b"PK").unwrap();

        let file = read_cv_file(&path).unwrap();
        assert!(file.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_cv_file(&temp_dir.path().join("nope.pdf")).unwrap_err();
        assert!(err.is_not_found());
    }
}
