//! ResultFinalizer - turns accumulated evaluations into the final decision.

use mockmate_core::api::{InterviewApi, ResultRequest};
use mockmate_core::interview::{Evaluation, InterviewResult};
use mockmate_core::job::JobPosting;
use mockmate_core::{MockMateError, Result};
use std::sync::Arc;

/// Inputs for the result endpoint.
#[derive(Debug, Clone, Default)]
pub struct FinalizeRequest {
    pub evaluations: Vec<Evaluation>,
    pub job: Option<JobPosting>,
    pub assessment_id: Option<String>,
    pub candidate_id: Option<String>,
}

/// Requests the final result once per interview.
///
/// Runs automatically when the answered count reaches `question_limit`, or
/// whenever the user finishes early. With nothing answered the endpoint is
/// never called.
pub struct ResultFinalizer {
    api: Arc<dyn InterviewApi>,
    question_limit: usize,
    result: Option<InterviewResult>,
}

impl ResultFinalizer {
    pub fn new(api: Arc<dyn InterviewApi>, question_limit: usize) -> Self {
        Self {
            api,
            question_limit: question_limit.max(1),
            result: None,
        }
    }

    pub fn question_limit(&self) -> usize {
        self.question_limit
    }

    /// Whether `answered` questions should trigger the automatic run.
    pub fn should_finalize(&self, answered: usize) -> bool {
        self.result.is_none() && answered >= self.question_limit
    }

    pub fn result(&self) -> Option<&InterviewResult> {
        self.result.as_ref()
    }

    pub fn is_finalized(&self) -> bool {
        self.result.is_some()
    }

    /// Submits the evaluations and returns the decision. A second call
    /// returns the first result without contacting the server.
    pub async fn finalize(&mut self, request: FinalizeRequest) -> Result<InterviewResult> {
        if let Some(result) = &self.result {
            return Ok(result.clone());
        }
        if request.evaluations.is_empty() {
            return Err(MockMateError::validation(
                "Answer at least one question before finishing the interview.",
            ));
        }

        tracing::info!(
            "[ResultFinalizer] Requesting result for {} evaluations",
            request.evaluations.len()
        );
        let response = self
            .api
            .final_result(&ResultRequest {
                evaluations: request.evaluations,
                job_details: request.job,
                assessment_id: request.assessment_id,
                candidate_id: request.candidate_id,
            })
            .await?;
        let result = response.into_result()?;

        tracing::info!(
            "[ResultFinalizer] Decision: {} ({}%)",
            result.decision,
            result.confidence_percent()
        );
        self.result = Some(result.clone());
        Ok(result)
    }
}
