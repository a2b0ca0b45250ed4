//! Client configuration loaded from `config.toml`.

use crate::paths::MockMatePaths;
use crate::storage::AtomicTomlFile;
use mockmate_core::Result;
use mockmate_core::config::ClientConfig;
use std::path::PathBuf;

pub const ENV_API_URL: &str = "MOCKMATE_API_URL";
pub const ENV_WS_URL: &str = "MOCKMATE_WS_URL";

pub struct ConfigService {
    file: AtomicTomlFile<ClientConfig>,
}

impl ConfigService {
    pub fn new(paths: &MockMatePaths) -> Result<Self> {
        Ok(Self::with_path(paths.config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Loads the file (defaults when missing) and applies environment
    /// overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self.load_file()?;
        Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
    }

    /// The file contents alone, without environment overrides.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let config = self.file.load()?.unwrap_or_default();
        tracing::debug!(
            "[ConfigService] Loaded {} (api: {})",
            self.file.path().display(),
            config.api.base_url
        );
        Ok(config)
    }

    /// Applies `f` to the stored configuration and writes it back.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ClientConfig),
    {
        self.file.update(ClientConfig::default(), f)?;
        Ok(())
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

/// Overrides URL settings from the environment. Blank values are ignored.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_blank(ENV_API_URL) {
        config.api.base_url = url;
    }
    if let Some(url) = non_blank(ENV_WS_URL) {
        config.api.ws_base_url = Some(url);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.load_file().unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_update_persists() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        service
            .update(|config| config.api.base_url = "http://api.internal:9000".to_string())
            .unwrap();

        let config = service.load_file().unwrap();
        assert_eq!(config.api.base_url, "http://api.internal:9000");
        assert_eq!(config.interview.question_limit, 5);
    }

    #[test]
    fn test_env_overrides() {
        let config = apply_env_overrides(ClientConfig::default(), |key| match key {
            ENV_API_URL => Some("https://mockmate.example".to_string()),
            ENV_WS_URL => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "https://mockmate.example");
        assert!(config.api.ws_base_url.is_none());
        assert_eq!(config.api.ws_base_url(), "wss://mockmate.example");
    }
}
