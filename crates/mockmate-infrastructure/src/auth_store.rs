//! File-backed authentication state (`user.toml`).

use crate::paths::MockMatePaths;
use crate::storage::AtomicTomlFile;
use mockmate_core::Result;
use mockmate_core::auth::{AuthRepository, AuthSession};
use std::path::PathBuf;

pub struct TomlAuthRepository {
    file: AtomicTomlFile<AuthSession>,
}

impl TomlAuthRepository {
    pub fn new(paths: &MockMatePaths) -> Result<Self> {
        Ok(Self::with_path(paths.user_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path).private(),
        }
    }
}

impl AuthRepository for TomlAuthRepository {
    fn load(&self) -> Result<Option<AuthSession>> {
        match self.file.load() {
            Ok(session) => Ok(session),
            Err(e) => {
                // A corrupt file means nobody is signed in; the next login
                // overwrites it.
                tracing::warn!(
                    "[AuthStore] Ignoring unreadable {}: {}",
                    self.file.path().display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn save(&self, session: &AuthSession) -> Result<()> {
        self.file.save(session)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.file.remove()?;
        Ok(())
    }
}
