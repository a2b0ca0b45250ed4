//! In-memory fakes shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use mockmate_core::api::{
    AccountApi, CatalogApi, EvaluationRequest, EvaluationResponse, InterviewApi, LoginResponse,
    QuestionRequest, QuestionResponse, ResultRequest, ResultResponse, StartInterviewResponse,
    UploadReceipt,
};
use mockmate_core::auth::{
    AuthRepository, AuthSession, Credentials, ProfileSkill, ProfileUpdate, Registration, User,
};
use mockmate_core::cv::CvFile;
use mockmate_core::job::JobPosting;
use mockmate_core::notification::{NotificationCenter, Notifier};
use mockmate_core::session::{ChannelConnector, ChannelTransport, TransportEvent};
use mockmate_core::{MockMateError, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

pub fn notifier() -> (Arc<NotificationCenter>, Arc<dyn Notifier>) {
    let center = Arc::new(NotificationCenter::new());
    let notifier: Arc<dyn Notifier> = center.clone();
    (center, notifier)
}

pub fn job(id: &str, title: &str) -> JobPosting {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "description": format!("{} role", title),
        "skills": [{"name": "Rust"}]
    }))
    .unwrap()
}

// ============================================================================
// Channel
// ============================================================================

/// Test side of one fake connection.
pub struct FakeConnection {
    events: mpsc::UnboundedSender<TransportEvent>,
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
    pub url: String,
}

#[derive(Default)]
struct ConnectorState {
    attempts: usize,
    failures_left: usize,
    connections: Vec<FakeConnection>,
}

/// Connector whose connections are driven by the test.
#[derive(Default)]
pub struct FakeConnector {
    state: Mutex<ConnectorState>,
}

impl FakeConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes the next `count` attempts fail.
    pub fn fail_next(&self, count: usize) {
        self.state.lock().unwrap().failures_left = count;
    }

    pub fn attempts(&self) -> usize {
        self.state.lock().unwrap().attempts
    }

    pub fn connections(&self) -> usize {
        self.state.lock().unwrap().connections.len()
    }

    pub fn push(&self, connection: usize, event: TransportEvent) {
        let state = self.state.lock().unwrap();
        state.connections[connection].events.send(event).unwrap();
    }

    pub fn push_text(&self, connection: usize, text: &str) {
        self.push(connection, TransportEvent::Text(text.to_string()));
    }

    pub fn sent(&self, connection: usize) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.connections[connection].sent.lock().unwrap().clone()
    }

    pub fn is_closed(&self, connection: usize) -> bool {
        let state = self.state.lock().unwrap();
        state.connections[connection].closed.load(Ordering::SeqCst)
    }

    pub fn url(&self, connection: usize) -> String {
        self.state.lock().unwrap().connections[connection].url.clone()
    }
}

#[async_trait]
impl ChannelConnector for FakeConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn ChannelTransport>> {
        let mut state = self.state.lock().unwrap();
        state.attempts += 1;
        if state.failures_left > 0 {
            state.failures_left -= 1;
            return Err(MockMateError::transport("connection refused"));
        }

        let (events, events_rx) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));
        state.connections.push(FakeConnection {
            events,
            sent: sent.clone(),
            closed: closed.clone(),
            url: url.to_string(),
        });
        Ok(Box::new(FakeTransport {
            events: events_rx,
            sent,
            closed,
        }))
    }
}

struct FakeTransport {
    events: mpsc::UnboundedReceiver<TransportEvent>,
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl ChannelTransport for FakeTransport {
    async fn send_text(&mut self, text: String) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(MockMateError::channel("closed"));
        }
        self.sent.lock().unwrap().push(text);
        Ok(())
    }

    async fn next_event(&mut self) -> Option<TransportEvent> {
        self.events.recv().await
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// REST
// ============================================================================

/// Interview and catalog endpoints backed by memory.
pub struct FakeBackend {
    pub jobs: Mutex<Vec<JobPosting>>,
    pub question_requests: Mutex<Vec<QuestionRequest>>,
    pub evaluation_requests: Mutex<Vec<EvaluationRequest>>,
    pub result_requests: Mutex<Vec<ResultRequest>>,
    pub uploads: Mutex<Vec<CvFile>>,
    pub fail_upload: AtomicBool,
    pub fail_questions: AtomicBool,
    /// Artificial latency of the evaluation endpoint.
    pub evaluation_delay: Mutex<Duration>,
    /// Artificial latency of the question endpoint.
    pub question_delay: Mutex<Duration>,
    /// Raw JSON body served by the result endpoint.
    pub result_body: Mutex<String>,
    questions_served: AtomicUsize,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            jobs: Mutex::new(vec![job("7", "Backend Engineer"), job("8", "Data Analyst")]),
            question_requests: Mutex::default(),
            evaluation_requests: Mutex::default(),
            result_requests: Mutex::default(),
            uploads: Mutex::default(),
            fail_upload: AtomicBool::new(false),
            fail_questions: AtomicBool::new(false),
            evaluation_delay: Mutex::new(Duration::ZERO),
            question_delay: Mutex::new(Duration::ZERO),
            result_body: Mutex::new(
                r#"{"decision": "Hire", "probability": [0.1, 0.9], "summary": "Strong answers."}"#
                    .to_string(),
            ),
            questions_served: AtomicUsize::new(0),
        }
    }
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn result_calls(&self) -> usize {
        self.result_requests.lock().unwrap().len()
    }

    pub fn upload_calls(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl InterviewApi for FakeBackend {
    async fn start_interview(&self, job_id: &str) -> Result<StartInterviewResponse> {
        Ok(serde_json::from_value(serde_json::json!({ "session_id": format!("s-{}", job_id) }))
            .unwrap())
    }

    async fn generate_question(&self, request: &QuestionRequest) -> Result<QuestionResponse> {
        self.question_requests.lock().unwrap().push(request.clone());
        let delay = *self.question_delay.lock().unwrap();
        tokio::time::sleep(delay).await;
        if self.fail_questions.load(Ordering::SeqCst) {
            return Err(MockMateError::api(500, "model unavailable"));
        }
        let n = self.questions_served.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(serde_json::from_value(serde_json::json!({
            "id": n,
            "question": format!("Question {}", n),
            "category": "technical",
            "difficulty": request.difficulty,
            "assessment_id": 99
        }))
        .unwrap())
    }

    async fn evaluate_answer(&self, request: &EvaluationRequest) -> Result<EvaluationResponse> {
        self.evaluation_requests.lock().unwrap().push(request.clone());
        let delay = *self.evaluation_delay.lock().unwrap();
        tokio::time::sleep(delay).await;
        Ok(EvaluationResponse {
            score: 0.85,
            feedback: "Clear and correct.".to_string(),
            question_id: request.question_id.clone(),
            assessment_id: request.assessment_id.clone(),
        })
    }

    async fn final_result(&self, request: &ResultRequest) -> Result<ResultResponse> {
        self.result_requests.lock().unwrap().push(request.clone());
        let body = self.result_body.lock().unwrap().clone();
        serde_json::from_str(&body).map_err(|e| MockMateError::Serialization {
            format: "JSON".to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogApi for FakeBackend {
    async fn list_jobs(&self) -> Result<Vec<JobPosting>> {
        Ok(self.jobs.lock().unwrap().clone())
    }

    async fn get_job(&self, job_id: &str) -> Result<JobPosting> {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .find(|job| job.id == job_id)
            .cloned()
            .ok_or_else(|| MockMateError::not_found("job", job_id))
    }

    async fn upload_cv(&self, file: &CvFile) -> Result<UploadReceipt> {
        self.uploads.lock().unwrap().push(file.clone());
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(MockMateError::api(500, "storage full"));
        }
        Ok(UploadReceipt {
            message: Some("CV uploaded".to_string()),
            ..Default::default()
        })
    }
}

/// Account endpoints backed by memory.
#[derive(Default)]
pub struct FakeAccountApi {
    pub fail_logout: AtomicBool,
    pub logins: AtomicUsize,
    pub skills: Mutex<Vec<ProfileSkill>>,
    token: Mutex<Option<String>>,
}

impl FakeAccountApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn user(email: &str) -> User {
        User {
            id: Some("1".to_string()),
            email: email.to_string(),
            fullname: "Ada Candidate".to_string(),
            is_candidate: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl AccountApi for FakeAccountApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        if credentials.password != "secret" {
            return Err(MockMateError::unauthorized("No active account found"));
        }
        self.logins.fetch_add(1, Ordering::SeqCst);
        *self.token.lock().unwrap() = Some("jwt-access".to_string());
        Ok(LoginResponse {
            message: Some("Login successful".to_string()),
            user: Some(Self::user(&credentials.email)),
        })
    }

    async fn register(&self, registration: &Registration) -> Result<User> {
        Ok(Self::user(&registration.email))
    }

    async fn logout(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(MockMateError::api(400, "Refresh token is required"));
        }
        Ok(())
    }

    async fn get_profile(&self) -> Result<User> {
        Ok(Self::user("candidate@example.com"))
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let mut user = Self::user("candidate@example.com");
        if let Some(bio) = &update.bio {
            user.bio = bio.clone();
        }
        Ok(user)
    }

    async fn list_skills(&self) -> Result<Vec<ProfileSkill>> {
        Ok(self.skills.lock().unwrap().clone())
    }

    async fn add_skill(&self, skill: &ProfileSkill) -> Result<ProfileSkill> {
        let mut skills = self.skills.lock().unwrap();
        let mut stored = skill.clone();
        stored.id = Some((skills.len() + 1).to_string());
        skills.push(stored.clone());
        Ok(stored)
    }

    async fn delete_skill(&self, skill_id: &str) -> Result<()> {
        self.skills
            .lock()
            .unwrap()
            .retain(|s| s.id.as_deref() != Some(skill_id));
        Ok(())
    }

    fn access_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct MemoryAuthRepository {
    pub stored: Mutex<Option<AuthSession>>,
}

impl AuthRepository for MemoryAuthRepository {
    fn load(&self) -> Result<Option<AuthSession>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    fn save(&self, session: &AuthSession) -> Result<()> {
        *self.stored.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}
