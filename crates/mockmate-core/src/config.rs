use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::reconnect::ReconnectPolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_JOBS_ENDPOINT: &str = "/api/JobDescription/";
pub const DEFAULT_QUESTION_LIMIT: usize = 5;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub reconnect: ReconnectSettings,
    #[serde(default)]
    pub interview: InterviewSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    /// Derived from `base_url` when absent (`http` → `ws`, `https` → `wss`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_base_url: Option<String>,
    #[serde(default = "default_jobs_endpoint")]
    pub jobs_endpoint: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_jobs_endpoint() -> String {
    DEFAULT_JOBS_ENDPOINT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            ws_base_url: None,
            jobs_endpoint: default_jobs_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiSettings {
    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// WebSocket base URL, derived from the REST base when not configured.
    pub fn ws_base_url(&self) -> String {
        if let Some(url) = &self.ws_base_url {
            return url.trim_end_matches('/').to_string();
        }
        let base = self.base_url();
        if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            base.to_string()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ReconnectSettings {
    pub initial_delay_ms: u64,
    pub multiplier: f64,
    pub max_delay_ms: u64,
    pub max_attempts: u32,
}

impl Default for ReconnectSettings {
    fn default() -> Self {
        Self {
            initial_delay_ms: 5_000,
            multiplier: 2.0,
            max_delay_ms: 60_000,
            max_attempts: 8,
        }
    }
}

impl From<&ReconnectSettings> for ReconnectPolicy {
    fn from(settings: &ReconnectSettings) -> Self {
        ReconnectPolicy::new(
            Duration::from_millis(settings.initial_delay_ms),
            settings.multiplier,
            Duration::from_millis(settings.max_delay_ms),
            settings.max_attempts,
        )
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct InterviewSettings {
    /// Answers after which the result is requested automatically.
    pub question_limit: usize,
}

impl Default for InterviewSettings {
    fn default() -> Self {
        Self {
            question_limit: DEFAULT_QUESTION_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_base_derived_from_http() {
        let api = ApiSettings {
            base_url: "http://127.0.0.1:8000/".to_string(),
            ..Default::default()
        };
        assert_eq!(api.ws_base_url(), "ws://127.0.0.1:8000");

        let secure = ApiSettings {
            base_url: "https://mockmate.example".to_string(),
            ..Default::default()
        };
        assert_eq!(secure.ws_base_url(), "wss://mockmate.example");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
[api]
base_url = "http://api.local"

[interview]
question_limit = 3
"#,
        )
        .unwrap();

        assert_eq!(config.api.jobs_endpoint, DEFAULT_JOBS_ENDPOINT);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.reconnect, ReconnectSettings::default());
        assert_eq!(config.interview.question_limit, 3);
    }
}
