use crate::error::{MockMateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the interview channel.
///
/// `Connecting → Open → Closed`; an abnormal closure from `Open` goes back to
/// `Connecting`, a clean closure ends in `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelState {
    Connecting,
    Open,
    Closed,
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelState::Connecting => f.write_str("connecting"),
            ChannelState::Open => f.write_str("open"),
            ChannelState::Closed => f.write_str("closed"),
        }
    }
}

/// Identifiers an interview page is opened with. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTarget {
    pub session_id: Option<String>,
    pub job_id: Option<String>,
}

impl SessionTarget {
    pub fn new(session_id: impl Into<String>, job_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            job_id: Some(job_id.into()),
        }
    }

    /// Resolves the target into a session, requiring both identifiers.
    pub fn into_session(self) -> Result<Session> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        match (present(self.session_id), present(self.job_id)) {
            (Some(id), Some(job_id)) => Ok(Session { id, job_id }),
            _ => Err(MockMateError::MissingSessionId),
        }
    }
}

/// An interview session with a valid identifier pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub job_id: String,
}

impl Session {
    /// Channel endpoint: `{ws_base}/interview/{job_id}/?token={token}`.
    ///
    /// The server consumer resolves the job description from the path
    /// segment, so the job identifier goes there.
    pub fn channel_url(&self, ws_base: &str, token: Option<&str>) -> String {
        let base = ws_base.trim_end_matches('/');
        let mut url = format!("{base}/interview/{}/", self.job_id);
        if let Some(token) = token {
            url.push_str("?token=");
            url.push_str(token);
        }
        url
    }
}
