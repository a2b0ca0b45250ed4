//! Account domain models.

use crate::id::{RemoteId, deserialize_opt_id};
use serde::{Deserialize, Serialize};

/// The signed-in user as returned by `/api/user/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RemoteId>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub is_candidate: bool,
    #[serde(default)]
    pub is_recruiter: bool,
}

impl User {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        [&self.fullname, &self.username, &self.email]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("candidate")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    pub is_candidate: bool,
}

/// Partial profile update sent with `PATCH /api/user/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.fullname.is_none()
            && self.username.is_none()
            && self.phone_number.is_none()
            && self.bio.is_none()
    }
}

/// A skill on the user's profile with a self-assessed level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSkill {
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RemoteId>,
    pub name: String,
    /// 0..=100
    #[serde(default)]
    pub level: u8,
}

impl ProfileSkill {
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self {
            id: None,
            name: name.into(),
            level: level.min(100),
        }
    }
}

/// Persisted authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for the interview channel (the `access_token` cookie).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// RFC 3339
    pub logged_in_at: String,
    // Kept last: TOML writes nested tables after plain values.
    pub user: User,
}

impl AuthSession {
    pub fn new(user: User, access_token: Option<String>) -> Self {
        Self {
            user,
            access_token,
            logged_in_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
