//! Path management for MockMate client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/mockmate/          # Config directory
//! ├── config.toml              # Client configuration
//! └── user.toml                # Signed-in user (auth context)
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "mockmate";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for mockmate_core::MockMateError {
    fn from(err: PathError) -> Self {
        mockmate_core::MockMateError::config(err.to_string())
    }
}

/// Resolves client file locations.
///
/// With a base path every file lives directly under it (used by tests and
/// the `--config-dir` flag); otherwise the platform config directory is used.
#[derive(Debug, Clone, Default)]
pub struct MockMatePaths {
    base: Option<PathBuf>,
}

impl MockMatePaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Persisted authentication state. Holds the bearer token, so it is
    /// written with owner-only permissions.
    pub fn user_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("user.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_dir() {
        if let Ok(config_dir) = MockMatePaths::default().config_dir() {
            assert!(config_dir.ends_with("mockmate"));
        }
    }

    #[test]
    fn test_files_under_base() {
        let paths = MockMatePaths::new(Some(Path::new("/tmp/mm")));
        assert_eq!(paths.config_file().unwrap(), Path::new("/tmp/mm/config.toml"));
        assert_eq!(paths.user_file().unwrap(), Path::new("/tmp/mm/user.toml"));
    }
}
