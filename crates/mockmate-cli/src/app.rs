//! Wiring of configuration, persisted auth state and service adapters.

use crate::console::ConsoleNotifier;
use anyhow::{Context, Result};
use mockmate_application::AccountService;
use mockmate_core::auth::{AuthContext, AuthSession};
use mockmate_core::config::ClientConfig;
use mockmate_core::notification::Notifier;
use mockmate_infrastructure::{ConfigService, MockMatePaths, TomlAuthRepository};
use mockmate_interaction::ApiClient;
use std::path::Path;
use std::sync::Arc;

pub struct App {
    pub config: ClientConfig,
    pub config_service: ConfigService,
    pub auth: Arc<AuthContext>,
    pub api: Arc<ApiClient>,
    pub notifier: Arc<dyn Notifier>,
}

impl App {
    pub fn init(config_dir: Option<&Path>) -> Result<Self> {
        let paths = MockMatePaths::new(config_dir);
        let config_service = ConfigService::new(&paths)?;
        let config = config_service
            .load()
            .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

        let repository = Arc::new(TomlAuthRepository::new(&paths)?);
        let auth = Arc::new(AuthContext::load_from(repository)?);

        let api = ApiClient::new(&config.api)?
            .with_access_token(auth.access_token().as_deref());
        tracing::debug!(
            "[App] Backend {} (signed in: {})",
            api.base_url(),
            auth.is_authenticated()
        );

        Ok(Self {
            config,
            config_service,
            auth,
            api: Arc::new(api),
            notifier: Arc::new(ConsoleNotifier::new()),
        })
    }

    pub fn account(&self) -> AccountService {
        AccountService::new(self.api.clone(), self.auth.clone(), self.notifier.clone())
    }

    /// The stored session, or an error telling the user to log in.
    pub fn require_login(&self) -> Result<AuthSession> {
        self.auth
            .require()
            .context("This command needs a signed-in user. Run `mockmate login` first")
    }
}
