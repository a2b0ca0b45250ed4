//! ApiClient - reqwest implementation of the MockMate REST endpoints.
//!
//! Authentication is cookie based: `POST /api/login/` sets `access_token`
//! and `refresh_token` cookies which the shared jar replays on every
//! request. The access token is also captured from `Set-Cookie` so the
//! interview channel can pass it as a query parameter.

use async_trait::async_trait;
use mockmate_core::api::{
    AccountApi, CatalogApi, EvaluationRequest, EvaluationResponse, InterviewApi, LoginResponse,
    QuestionRequest, QuestionResponse, ResultRequest, ResultResponse, StartInterviewResponse,
    UploadReceipt,
};
use mockmate_core::auth::{Credentials, ProfileSkill, ProfileUpdate, Registration, User};
use mockmate_core::config::ApiSettings;
use mockmate_core::cv::{CvFile, PDF_MIME};
use mockmate_core::job::JobPosting;
use mockmate_core::{MockMateError, Result};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::SET_COOKIE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Multipart field name expected by `/api/upload-cv/`.
const CV_FIELD: &str = "cv";

#[derive(Debug, Default, Clone)]
struct SessionTokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// HTTP client for the MockMate backend.
pub struct ApiClient {
    client: Client,
    base_url: String,
    jobs_endpoint: String,
    cookie_url: Url,
    cookies: Arc<Jar>,
    tokens: RwLock<SessionTokens>,
}

/// Job listings come back either as a bare array or paginated.
#[derive(Deserialize)]
#[serde(untagged)]
enum JobListResponse {
    Plain(Vec<JobPosting>),
    Paginated { results: Vec<JobPosting> },
}

impl JobListResponse {
    fn into_jobs(self) -> Vec<JobPosting> {
        match self {
            Self::Plain(jobs) | Self::Paginated { results: jobs } => jobs,
        }
    }
}

impl ApiClient {
    /// Creates a client for the configured backend.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let base_url = settings.base_url().trim_end_matches('/').to_string();
        let cookie_url = Url::parse(&base_url)
            .map_err(|e| MockMateError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        let cookies = Arc::new(Jar::default());

        let client = Client::builder()
            .cookie_provider(cookies.clone())
            .timeout(settings.request_timeout())
            .build()
            .map_err(map_transport_error)?;

        Ok(Self {
            client,
            base_url,
            jobs_endpoint: settings.jobs_endpoint.clone(),
            cookie_url,
            cookies,
            tokens: RwLock::new(SessionTokens::default()),
        })
    }

    /// Seeds the cookie jar with a token persisted by an earlier login.
    pub fn with_access_token(self, token: Option<&str>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.cookies.add_cookie_str(
                &format!("{}={}; Path=/", ACCESS_TOKEN_COOKIE, token),
                &self.cookie_url,
            );
            self.write_tokens(|tokens| tokens.access = Some(token.to_string()));
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn job_url(&self, job_id: Option<&str>) -> String {
        let endpoint = self.jobs_endpoint.trim_end_matches('/');
        match job_id {
            Some(id) => self.url(&format!("{}/{}/", endpoint, id)),
            None => self.url(&format!("{}/", endpoint)),
        }
    }

    fn write_tokens(&self, f: impl FnOnce(&mut SessionTokens)) {
        let mut guard = match self.tokens.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard);
    }

    fn read_tokens(&self) -> SessionTokens {
        match self.tokens.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Records tokens from `Set-Cookie` headers. Deleted cookies (empty
    /// value) clear the stored token.
    fn capture_tokens(&self, response: &Response) {
        for header in response.headers().get_all(SET_COOKIE) {
            let Ok(header) = header.to_str() else {
                continue;
            };
            if let Some(value) = cookie_value(header, ACCESS_TOKEN_COOKIE) {
                tracing::debug!("[ApiClient] Access token cookie updated");
                self.write_tokens(|tokens| tokens.access = non_empty(value));
            } else if let Some(value) = cookie_value(header, REFRESH_TOKEN_COOKIE) {
                self.write_tokens(|tokens| tokens.refresh = non_empty(value));
            }
        }
    }

    /// Sends the request, returning the response for 2xx statuses and a
    /// mapped error otherwise.
    async fn execute(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let response = request.send().await.map_err(map_transport_error)?;
        self.capture_tokens(&response);

        let status = response.status();
        if status.is_success() {
            tracing::debug!("[ApiClient] {} -> {}", action, status);
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("[ApiClient] {} failed with {}: {}", action, status, body);
        Err(map_http_error(status, &body))
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<T> {
        let response = self.execute(request, action).await?;
        let body = response.text().await.map_err(map_transport_error)?;
        serde_json::from_str(&body).map_err(|e| MockMateError::Serialization {
            format: "JSON".to_string(),
            message: format!("{}: {}", action, e),
        })
    }
}

#[async_trait]
impl InterviewApi for ApiClient {
    async fn start_interview(&self, job_id: &str) -> Result<StartInterviewResponse> {
        let url = self.url(&format!("/api/start-interview/{}/", job_id));
        self.execute_json(self.client.post(url), "start interview")
            .await
    }

    async fn generate_question(&self, request: &QuestionRequest) -> Result<QuestionResponse> {
        let url = self.url("/api/gemini/question/");
        self.execute_json(self.client.post(url).json(request), "generate question")
            .await
    }

    async fn evaluate_answer(&self, request: &EvaluationRequest) -> Result<EvaluationResponse> {
        let url = self.url("/api/gemini/evaluate/");
        self.execute_json(self.client.post(url).json(request), "evaluate answer")
            .await
    }

    async fn final_result(&self, request: &ResultRequest) -> Result<ResultResponse> {
        let url = self.url("/api/gemini/result/");
        self.execute_json(self.client.post(url).json(request), "final result")
            .await
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn list_jobs(&self) -> Result<Vec<JobPosting>> {
        let response: JobListResponse = self
            .execute_json(self.client.get(self.job_url(None)), "list jobs")
            .await?;
        Ok(response.into_jobs())
    }

    async fn get_job(&self, job_id: &str) -> Result<JobPosting> {
        self.execute_json(self.client.get(self.job_url(Some(job_id))), "get job")
            .await
            .map_err(|err| match err {
                MockMateError::Api { status: 404, .. } => MockMateError::not_found("job", job_id),
                other => other,
            })
    }

    async fn upload_cv(&self, file: &CvFile) -> Result<UploadReceipt> {
        let mime = file.mime.as_deref().unwrap_or(PDF_MIME);
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(mime)
            .map_err(|e| MockMateError::validation(format!("Invalid MIME type '{}': {}", mime, e)))?;
        let form = Form::new().part(CV_FIELD, part);

        let response = self
            .execute(
                self.client.post(self.url("/api/upload-cv/")).multipart(form),
                "upload cv",
            )
            .await?;
        let body = response.text().await.map_err(map_transport_error)?;
        // The receipt is informational; tolerate empty or non-JSON bodies.
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}

#[async_trait]
impl AccountApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let url = self.url("/api/login/");
        self.execute_json(self.client.post(url).json(credentials), "login")
            .await
    }

    async fn register(&self, registration: &Registration) -> Result<User> {
        let url = self.url("/api/user/");
        self.execute_json(self.client.post(url).json(registration), "register")
            .await
    }

    async fn logout(&self) -> Result<()> {
        let tokens = self.read_tokens();
        let body = serde_json::json!({ "refresh_token": tokens.refresh });
        let result = self
            .execute(self.client.post(self.url("/api/logout/")).json(&body), "logout")
            .await;

        // Local tokens are dropped even when the server refuses.
        self.write_tokens(|tokens| *tokens = SessionTokens::default());
        result.map(|_| ())
    }

    async fn get_profile(&self) -> Result<User> {
        self.execute_json(self.client.get(self.url("/api/user/")), "get profile")
            .await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let url = self.url("/api/user/");
        self.execute_json(self.client.patch(url).json(update), "update profile")
            .await
    }

    async fn list_skills(&self) -> Result<Vec<ProfileSkill>> {
        self.execute_json(self.client.get(self.url("/api/skills/")), "list skills")
            .await
    }

    async fn add_skill(&self, skill: &ProfileSkill) -> Result<ProfileSkill> {
        let url = self.url("/api/skills/");
        self.execute_json(self.client.post(url).json(skill), "add skill")
            .await
    }

    async fn delete_skill(&self, skill_id: &str) -> Result<()> {
        let url = self.url(&format!("/api/skills/{}/", skill_id));
        self.execute(self.client.delete(url), "delete skill")
            .await
            .map(|_| ())
    }

    fn access_token(&self) -> Option<String> {
        if let Some(token) = self.read_tokens().access {
            return Some(token);
        }
        let header = self.cookies.cookies(&self.cookie_url)?;
        let header = header.to_str().ok()?;
        header
            .split(';')
            .find_map(|pair| cookie_value(pair, ACCESS_TOKEN_COOKIE))
            .and_then(non_empty)
    }
}

// ============================================================================
// Error mapping
// ============================================================================

fn map_transport_error(err: reqwest::Error) -> MockMateError {
    if err.is_timeout() {
        MockMateError::transport(format!("Request timed out: {}", err))
    } else if err.is_decode() {
        MockMateError::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    } else {
        MockMateError::transport(err.to_string())
    }
}

fn map_http_error(status: StatusCode, body: &str) -> MockMateError {
    let message = extract_error_message(body).unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        } else {
            trimmed.to_string()
        }
    });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => MockMateError::unauthorized(message),
        _ => MockMateError::api(status.as_u16(), message),
    }
}

/// Pulls a human readable message out of `{"error"}`, `{"detail"}` or
/// `{"message"}` payloads. Non-string values are rendered as JSON.
fn extract_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "detail", "message"].iter().find_map(|key| {
        json.get(key).map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    })
}

/// Value of cookie `name` in a `Set-Cookie` header or `name=value` pair.
fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    let pair = header.split(';').next()?.trim();
    let (key, value) = pair.split_once('=')?;
    (key.trim() == name).then(|| value.trim().trim_matches('"'))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
