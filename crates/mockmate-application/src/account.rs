//! AccountService - login, registration, logout and profile management.
//!
//! Every change to the signed-in user goes through the shared
//! [`AuthContext`] so the persisted state stays in sync.

use mockmate_core::api::AccountApi;
use mockmate_core::auth::{
    AuthContext, AuthSession, Credentials, ProfileSkill, ProfileUpdate, Registration, User,
};
use mockmate_core::notification::{NotificationLevel, Notifier};
use mockmate_core::{MockMateError, Result};
use std::sync::Arc;

pub struct AccountService {
    api: Arc<dyn AccountApi>,
    auth: Arc<AuthContext>,
    notifier: Arc<dyn Notifier>,
}

impl AccountService {
    pub fn new(api: Arc<dyn AccountApi>, auth: Arc<AuthContext>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            auth,
            notifier,
        }
    }

    pub fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    /// Signs in and persists the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(MockMateError::validation("Email and password are required"));
        }

        let response = match self.api.login(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                self.notifier
                    .notify(NotificationLevel::Error, format!("Login failed: {}", e));
                return Err(e);
            }
        };

        // Older backends only answer with a message; fetch the user then.
        let user = match response.user {
            Some(user) => user,
            None => self.api.get_profile().await?,
        };
        let token = self.api.access_token();
        if token.is_none() {
            tracing::warn!("[AccountService] Login succeeded without an access token cookie");
        }

        self.auth.set(AuthSession::new(user.clone(), token))?;
        tracing::info!("[AccountService] Signed in as {}", user.email);
        self.notifier.notify(
            NotificationLevel::Success,
            format!("Welcome, {}!", user.display_name()),
        );
        Ok(user)
    }

    /// Creates an account. The user still has to log in afterwards.
    pub async fn register(&self, registration: &Registration) -> Result<User> {
        if registration.email.trim().is_empty()
            || registration.username.trim().is_empty()
            || registration.password.is_empty()
        {
            return Err(MockMateError::validation(
                "Email, username and password are required",
            ));
        }

        match self.api.register(registration).await {
            Ok(user) => {
                self.notifier.notify(
                    NotificationLevel::Success,
                    "Registration successful! Please log in.".to_string(),
                );
                Ok(user)
            }
            Err(e) => {
                self.notifier.notify(
                    NotificationLevel::Error,
                    format!("Registration failed: {}", e),
                );
                Err(e)
            }
        }
    }

    /// Signs out. The local session is cleared even when the server call
    /// fails.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self.api.logout().await {
            tracing::warn!("[AccountService] Server logout failed: {}", e);
        }
        self.auth.clear()?;
        tracing::info!("[AccountService] Signed out");
        Ok(())
    }

    /// Fetches the profile and refreshes the stored user.
    pub async fn profile(&self) -> Result<User> {
        self.auth.require()?;
        let user = self.api.get_profile().await?;
        self.auth.update_user(user.clone())?;
        Ok(user)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.auth.require()?;
        if update.is_empty() {
            return Err(MockMateError::validation("Nothing to update"));
        }

        match self.api.update_profile(update).await {
            Ok(user) => {
                self.auth.update_user(user.clone())?;
                self.notifier.notify(
                    NotificationLevel::Success,
                    "Profile updated successfully".to_string(),
                );
                Ok(user)
            }
            Err(e) => {
                self.notifier.notify(
                    NotificationLevel::Error,
                    format!("Failed to update profile: {}", e),
                );
                Err(e)
            }
        }
    }

    pub async fn skills(&self) -> Result<Vec<ProfileSkill>> {
        self.auth.require()?;
        self.api.list_skills().await
    }

    pub async fn add_skill(&self, name: &str, level: u8) -> Result<ProfileSkill> {
        self.auth.require()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(MockMateError::validation("Skill name is required"));
        }
        self.api.add_skill(&ProfileSkill::new(name, level)).await
    }

    pub async fn remove_skill(&self, skill_id: &str) -> Result<()> {
        self.auth.require()?;
        self.api.delete_skill(skill_id).await
    }
}
