//! JobCatalog - cached job postings with search.

use mockmate_core::Result;
use mockmate_core::api::CatalogApi;
use mockmate_core::job::{JobPosting, filter_jobs};
use mockmate_core::notification::{NotificationLevel, Notifier};
use std::sync::Arc;

pub struct JobCatalog {
    api: Arc<dyn CatalogApi>,
    notifier: Arc<dyn Notifier>,
    jobs: Vec<JobPosting>,
}

impl JobCatalog {
    pub fn new(api: Arc<dyn CatalogApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            jobs: Vec::new(),
        }
    }

    /// Reloads the postings. The previous list is kept on failure.
    pub async fn refresh(&mut self) -> Result<&[JobPosting]> {
        match self.api.list_jobs().await {
            Ok(jobs) => {
                tracing::debug!("[JobCatalog] Loaded {} postings", jobs.len());
                self.jobs = jobs;
                Ok(&self.jobs)
            }
            Err(e) => {
                self.notifier.notify(
                    NotificationLevel::Error,
                    format!("Failed to load jobs: {}", e),
                );
                Err(e)
            }
        }
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    /// Postings matching `term` (case-insensitive; empty matches all).
    pub fn search(&self, term: &str) -> Vec<&JobPosting> {
        filter_jobs(&self.jobs, term)
    }

    pub fn find(&self, job_id: &str) -> Option<&JobPosting> {
        self.jobs.iter().find(|job| job.id == job_id)
    }
}
