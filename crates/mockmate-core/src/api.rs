//! Service interfaces of the MockMate backend.
//!
//! Implemented over HTTP by `mockmate-interaction`; the application layer
//! only depends on these traits so flows can run against in-memory fakes.

use crate::auth::{Credentials, ProfileSkill, ProfileUpdate, Registration, User};
use crate::cv::CvFile;
use crate::error::Result;
use crate::id::{RemoteId, deserialize_opt_id};
use crate::interview::{Decision, Difficulty, Evaluation, InterviewResult, Question};
use crate::job::JobPosting;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Interview endpoints
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRequest {
    pub context: String,
    #[serde(rename = "previousQuestions")]
    pub previous_questions: Vec<String>,
    pub difficulty: Difficulty,
    pub job_id: String,
    pub candidate_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionResponse {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<RemoteId>,
    pub question: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub assessment_id: Option<RemoteId>,
}

impl QuestionResponse {
    pub fn into_question(self) -> Question {
        Question {
            id: self.id,
            text: self.question,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRequest {
    pub question_id: Option<String>,
    pub question: String,
    pub answer: String,
    pub context: String,
    pub assessment_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvaluationResponse {
    pub score: f64,
    #[serde(default)]
    pub feedback: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub question_id: Option<RemoteId>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub assessment_id: Option<RemoteId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRequest {
    pub evaluations: Vec<Evaluation>,
    #[serde(rename = "jobDetails")]
    pub job_details: Option<JobPosting>,
    pub assessment_id: Option<String>,
    pub candidate_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultResponse {
    pub decision: Decision,
    pub probability: Vec<f64>,
    #[serde(default)]
    pub summary: String,
}

impl ResultResponse {
    pub fn into_result(self) -> Result<InterviewResult> {
        InterviewResult::from_probability(self.decision, &self.probability, self.summary)
    }
}

/// Identifier returned by `start-interview`; the backend has used several
/// field names for it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StartInterviewResponse {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub session_id: Option<RemoteId>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub interview_id: Option<RemoteId>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<RemoteId>,
}

impl StartInterviewResponse {
    pub fn identifier(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .or(self.interview_id.as_deref())
            .or(self.id.as_deref())
    }
}

/// Question generation, answer evaluation and final result.
#[async_trait]
pub trait InterviewApi: Send + Sync {
    async fn start_interview(&self, job_id: &str) -> Result<StartInterviewResponse>;

    async fn generate_question(&self, request: &QuestionRequest) -> Result<QuestionResponse>;

    async fn evaluate_answer(&self, request: &EvaluationRequest) -> Result<EvaluationResponse>;

    async fn final_result(&self, request: &ResultRequest) -> Result<ResultResponse>;
}

// ============================================================================
// Catalog endpoints
// ============================================================================

/// Body of a successful CV upload; the shape is not versioned.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<JobPosting>>;

    async fn get_job(&self, job_id: &str) -> Result<JobPosting>;

    async fn upload_cv(&self, file: &CvFile) -> Result<UploadReceipt>;
}

// ============================================================================
// Account endpoints
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    async fn register(&self, registration: &Registration) -> Result<User>;

    async fn logout(&self) -> Result<()>;

    async fn get_profile(&self) -> Result<User>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User>;

    async fn list_skills(&self) -> Result<Vec<ProfileSkill>>;

    async fn add_skill(&self, skill: &ProfileSkill) -> Result<ProfileSkill>;

    async fn delete_skill(&self, skill_id: &str) -> Result<()>;

    /// Bearer token for the interview channel, from the session cookies.
    fn access_token(&self) -> Option<String>;
}
