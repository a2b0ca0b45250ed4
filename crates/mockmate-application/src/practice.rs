//! PracticeInterview - the REST driven interview flow.
//!
//! Questions are generated one at a time for a job posting, answers are
//! scored by the evaluation endpoint and the final decision is requested
//! through [`ResultFinalizer`] once the question limit is reached.

use crate::finalizer::{FinalizeRequest, ResultFinalizer};
use mockmate_core::api::{CatalogApi, EvaluationRequest, InterviewApi, QuestionRequest};
use mockmate_core::interview::{
    Difficulty, Evaluation, InterviewResult, MessageKind, NewMessage, Question, Ticket,
    Transcript, TranscriptMessage,
};
use mockmate_core::job::JobPosting;
use mockmate_core::notification::{NotificationLevel, Notifier};
use mockmate_core::{MockMateError, Result};
use std::sync::Arc;

/// What happened after an answer was submitted.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub evaluation: Evaluation,
    /// The following question, unless the limit was reached or generating
    /// it failed (retry with [`PracticeInterview::next_question`]).
    pub next_question: Option<Question>,
    /// Set when this answer completed the interview.
    pub result: Option<InterviewResult>,
}

pub struct PracticeInterview {
    interview_api: Arc<dyn InterviewApi>,
    notifier: Arc<dyn Notifier>,
    job: JobPosting,
    candidate_id: Option<String>,
    current: Option<Question>,
    evaluations: Vec<Evaluation>,
    assessment_id: Option<String>,
    transcript: Transcript,
    finalizer: ResultFinalizer,
}

impl PracticeInterview {
    /// Loads the job posting. Failure is fatal for the flow; the caller
    /// should return to the job list.
    pub async fn start(
        interview_api: Arc<dyn InterviewApi>,
        catalog: &dyn CatalogApi,
        notifier: Arc<dyn Notifier>,
        job_id: &str,
        candidate_id: Option<String>,
        question_limit: usize,
    ) -> Result<Self> {
        let job = match catalog.get_job(job_id).await {
            Ok(job) => job,
            Err(e) => {
                tracing::error!("[PracticeInterview] Failed to load job {}: {}", job_id, e);
                notifier.notify(
                    NotificationLevel::Error,
                    format!("Failed to load job details: {}", e),
                );
                return Err(e);
            }
        };

        tracing::info!("[PracticeInterview] Started for '{}'", job.title);
        Ok(Self {
            finalizer: ResultFinalizer::new(interview_api.clone(), question_limit),
            interview_api,
            notifier,
            job,
            candidate_id,
            current: None,
            evaluations: Vec::new(),
            assessment_id: None,
            transcript: Transcript::new(),
        })
    }

    pub fn job(&self) -> &JobPosting {
        &self.job
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn answered(&self) -> usize {
        self.evaluations.len()
    }

    pub fn question_limit(&self) -> usize {
        self.finalizer.question_limit()
    }

    pub fn assessment_id(&self) -> Option<&str> {
        self.assessment_id.as_deref()
    }

    pub fn result(&self) -> Option<&InterviewResult> {
        self.finalizer.result()
    }

    pub fn is_complete(&self) -> bool {
        self.finalizer.is_finalized()
    }

    pub fn messages(&self) -> &[TranscriptMessage] {
        self.transcript.messages()
    }

    /// Context line for question generation.
    pub fn context(&self) -> String {
        if self.job.title.trim().is_empty() && self.job.description.trim().is_empty() {
            format!("Technical interview for job ID: {}", self.job.id)
        } else {
            self.job.interview_context()
        }
    }

    fn question_request(&self, extra: Option<&Question>) -> QuestionRequest {
        let mut previous: Vec<String> =
            self.evaluations.iter().map(|e| e.question.clone()).collect();
        let mut answered = self.evaluations.len();
        if let Some(question) = extra {
            previous.push(question.text.clone());
            answered += 1;
        }
        QuestionRequest {
            context: self.context(),
            previous_questions: previous,
            difficulty: Difficulty::for_answered(answered),
            job_id: self.job.id.clone(),
            candidate_id: self.candidate_id.clone(),
        }
    }

    /// Fetches the next question.
    pub async fn next_question(&mut self) -> Result<Question> {
        self.ensure_open()?;
        let request = self.question_request(None);
        let ticket = self.transcript.reserve();

        match self.interview_api.generate_question(&request).await {
            Ok(response) => {
                if let Some(id) = &response.assessment_id {
                    self.assessment_id = Some(id.clone());
                }
                let question = response.into_question();
                self.accept_question(ticket, &question);
                Ok(question)
            }
            Err(e) => {
                self.transcript.abandon(ticket);
                self.notifier.notify(
                    NotificationLevel::Error,
                    format!("Failed to generate question: {}", e),
                );
                Err(e)
            }
        }
    }

    /// Scores `answer` for the current question.
    ///
    /// While below the question limit the next question is requested
    /// together with the evaluation; at the limit the result is requested
    /// instead.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<AnswerOutcome> {
        self.ensure_open()?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(MockMateError::validation("Please provide an answer"));
        }
        let question = self
            .current
            .clone()
            .ok_or_else(|| MockMateError::validation("No question is awaiting an answer"))?;

        let evaluation_request = EvaluationRequest {
            question_id: question.id.clone(),
            question: question.text.clone(),
            answer: answer.to_string(),
            context: self.job.description.clone(),
            assessment_id: self.assessment_id.clone(),
        };
        let reaches_limit = self.evaluations.len() + 1 >= self.finalizer.question_limit();

        let answer_ticket = self.transcript.reserve();
        let evaluation_ticket = self.transcript.reserve();

        let (evaluated, prefetched) = if reaches_limit {
            let evaluated = self.interview_api.evaluate_answer(&evaluation_request).await;
            (evaluated, None)
        } else {
            let question_request = self.question_request(Some(&question));
            let question_ticket = self.transcript.reserve();
            let (evaluated, generated) = tokio::join!(
                self.interview_api.evaluate_answer(&evaluation_request),
                self.interview_api.generate_question(&question_request),
            );
            (evaluated, Some((question_ticket, generated)))
        };

        let response = match evaluated {
            Ok(response) => response,
            Err(e) => {
                self.transcript.abandon(answer_ticket);
                self.transcript.abandon(evaluation_ticket);
                if let Some((ticket, _)) = prefetched {
                    self.transcript.abandon(ticket);
                }
                self.notifier.notify(
                    NotificationLevel::Error,
                    format!("Error evaluating answer: {}", e),
                );
                return Err(e);
            }
        };

        let evaluation = Evaluation {
            question_id: response.question_id.or(question.id.clone()),
            question: question.text.clone(),
            answer: answer.to_string(),
            similarity_score: response.score,
            feedback: response.feedback,
            assessment_id: response.assessment_id.or(self.assessment_id.clone()),
        };
        tracing::debug!(
            "[PracticeInterview] Answer {} scored {}%",
            self.evaluations.len() + 1,
            evaluation.score_percent()
        );

        self.transcript
            .complete(answer_ticket, NewMessage::answer(answer));
        self.transcript.complete(
            evaluation_ticket,
            NewMessage::from_ai(
                MessageKind::Evaluation,
                format!(
                    "Score: {}% ({}). {}",
                    evaluation.score_percent(),
                    evaluation.band(),
                    evaluation.feedback
                ),
            ),
        );
        self.evaluations.push(evaluation.clone());
        self.current = None;

        let mut next_question = None;
        if let Some((ticket, generated)) = prefetched {
            match generated {
                Ok(response) => {
                    if let Some(id) = &response.assessment_id {
                        self.assessment_id = Some(id.clone());
                    }
                    let question = response.into_question();
                    self.accept_question(ticket, &question);
                    next_question = Some(question);
                }
                Err(e) => {
                    self.transcript.abandon(ticket);
                    tracing::warn!("[PracticeInterview] Next question failed: {}", e);
                    self.notifier.notify(
                        NotificationLevel::Error,
                        format!("Failed to generate question: {}", e),
                    );
                }
            }
        }

        let mut result = None;
        if self.finalizer.should_finalize(self.evaluations.len()) {
            match self.finalize().await {
                Ok(finished) => result = Some(finished),
                Err(e) => {
                    tracing::warn!("[PracticeInterview] Automatic finalization failed: {}", e);
                }
            }
        }

        Ok(AnswerOutcome {
            evaluation,
            next_question,
            result,
        })
    }

    /// Ends the interview early and returns the result.
    pub async fn finish(&mut self) -> Result<InterviewResult> {
        self.finalize().await
    }

    async fn finalize(&mut self) -> Result<InterviewResult> {
        let already_final = self.finalizer.is_finalized();
        let request = FinalizeRequest {
            evaluations: self.evaluations.clone(),
            job: Some(self.job.clone()),
            assessment_id: self.assessment_id.clone(),
            candidate_id: self.candidate_id.clone(),
        };

        match self.finalizer.finalize(request).await {
            Ok(result) => {
                if !already_final {
                    self.current = None;
                    self.transcript.append(NewMessage::from_ai(
                        MessageKind::FinalDecision,
                        format!(
                            "{} ({}%) {}",
                            result.decision,
                            result.confidence_percent(),
                            result.summary
                        ),
                    ));
                }
                Ok(result)
            }
            Err(e) => {
                let message = if e.is_validation() {
                    e.to_string()
                } else {
                    format!("Error generating result: {}", e)
                };
                self.notifier.notify(NotificationLevel::Error, message);
                Err(e)
            }
        }
    }

    fn accept_question(&mut self, ticket: Ticket, question: &Question) {
        self.transcript.complete(
            ticket,
            NewMessage::from_ai(MessageKind::Question, question.text.clone()),
        );
        self.current = Some(question.clone());
    }

    fn ensure_open(&self) -> Result<()> {
        if self.finalizer.is_finalized() {
            return Err(MockMateError::validation("The interview is already complete"));
        }
        Ok(())
    }
}
