//! CV files selected for upload.

use crate::error::{MockMateError, Result};

pub const PDF_MIME: &str = "application/pdf";

/// A file picked by the user, held in memory until uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct CvFile {
    pub name: String,
    /// MIME type reported by the picker, if any.
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for CvFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CvFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl CvFile {
    pub fn new(name: impl Into<String>, mime: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Size in megabytes with two decimals, e.g. `0.25 MB`.
    pub fn display_size(&self) -> String {
        format!("{:.2} MB", self.size() as f64 / 1024.0 / 1024.0)
    }

    /// A reported MIME type decides; without one, the `.pdf` extension does.
    pub fn is_pdf(&self) -> bool {
        match self.mime.as_deref() {
            Some(mime) => mime.eq_ignore_ascii_case(PDF_MIME),
            None => self.name.to_lowercase().ends_with(".pdf"),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.is_pdf() {
            return Err(MockMateError::validation("Please upload a PDF file"));
        }
        if self.bytes.is_empty() {
            return Err(MockMateError::validation("The selected file is empty"));
        }
        Ok(())
    }
}
