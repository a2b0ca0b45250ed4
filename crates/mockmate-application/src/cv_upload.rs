//! CvUploadForm - select a PDF and upload it.

use mockmate_core::api::{CatalogApi, UploadReceipt};
use mockmate_core::cv::CvFile;
use mockmate_core::notification::{NotificationLevel, Notifier};
use mockmate_core::{MockMateError, Result};
use std::sync::Arc;

/// Holds at most one selected file.
pub struct CvUploadForm {
    api: Arc<dyn CatalogApi>,
    notifier: Arc<dyn Notifier>,
    selected: Option<CvFile>,
    uploaded: bool,
}

impl CvUploadForm {
    pub fn new(api: Arc<dyn CatalogApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            selected: None,
            uploaded: false,
        }
    }

    /// Replaces the selection. Anything but a non-empty PDF is rejected and
    /// leaves the form empty.
    pub fn select(&mut self, file: CvFile) -> Result<&CvFile> {
        self.uploaded = false;
        if let Err(e) = file.validate() {
            tracing::debug!("[CvUpload] Rejected {:?}: {}", file, e);
            self.selected = None;
            self.notifier.notify(NotificationLevel::Error, e.to_string());
            return Err(e);
        }
        tracing::debug!("[CvUpload] Selected {} ({})", file.name, file.display_size());
        Ok(self.selected.insert(file))
    }

    pub fn selected(&self) -> Option<&CvFile> {
        self.selected.as_ref()
    }

    /// Name and formatted size of the selection.
    pub fn summary(&self) -> Option<(&str, String)> {
        self.selected
            .as_ref()
            .map(|file| (file.name.as_str(), file.display_size()))
    }

    pub fn can_upload(&self) -> bool {
        self.selected.is_some()
    }

    /// True after a successful upload until the next selection.
    pub fn is_uploaded(&self) -> bool {
        self.uploaded
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Uploads the selection. On success the form resets; on failure the
    /// selection is kept so the user can retry.
    pub async fn upload(&mut self) -> Result<UploadReceipt> {
        let Some(file) = self.selected.as_ref() else {
            return Err(MockMateError::validation("Please select a file to upload"));
        };

        match self.api.upload_cv(file).await {
            Ok(receipt) => {
                tracing::info!("[CvUpload] Uploaded {}", file.name);
                self.selected = None;
                self.uploaded = true;
                self.notifier.notify(
                    NotificationLevel::Success,
                    "CV uploaded successfully!".to_string(),
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!("[CvUpload] Upload of {} failed: {}", file.name, e);
                self.notifier.notify(
                    NotificationLevel::Error,
                    format!("Failed to upload CV: {}", e),
                );
                Err(e)
            }
        }
    }
}
