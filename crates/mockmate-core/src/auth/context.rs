use super::model::{AuthSession, User};
use super::repository::AuthRepository;
use crate::error::{MockMateError, Result};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-wide authentication state.
///
/// Constructed once, loaded from its repository, then shared with every
/// consumer through an `Arc`. Nothing else reads the persisted user file.
pub struct AuthContext {
    repository: Arc<dyn AuthRepository>,
    state: RwLock<Option<AuthSession>>,
}

impl AuthContext {
    /// Creates an empty context. Call [`load`](Self::load) to restore a
    /// persisted session.
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self {
            repository,
            state: RwLock::new(None),
        }
    }

    /// Creates a context and restores the persisted session, if any.
    pub fn load_from(repository: Arc<dyn AuthRepository>) -> Result<Self> {
        let context = Self::new(repository);
        context.load()?;
        Ok(context)
    }

    /// Reloads the state from the repository.
    pub fn load(&self) -> Result<bool> {
        let loaded = self.repository.load()?;
        let present = loaded.is_some();
        *self.write() = loaded;
        tracing::debug!("[AuthContext] Loaded persisted session: {}", present);
        Ok(present)
    }

    /// Stores a fresh session (after login).
    pub fn set(&self, session: AuthSession) -> Result<()> {
        self.repository.save(&session)?;
        *self.write() = Some(session);
        Ok(())
    }

    /// Replaces the user of the current session (after a profile update).
    pub fn update_user(&self, user: User) -> Result<()> {
        let mut guard = self.write();
        let session = guard
            .as_mut()
            .ok_or_else(|| MockMateError::unauthorized("not signed in"))?;
        session.user = user;
        self.repository.save(session)
    }

    /// Forgets the session (logout).
    pub fn clear(&self) -> Result<()> {
        self.repository.clear()?;
        *self.write() = None;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn user(&self) -> Option<User> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().as_ref().and_then(|s| s.access_token.clone())
    }

    /// Returns the session or an authorization error.
    pub fn require(&self) -> Result<AuthSession> {
        self.read()
            .clone()
            .ok_or_else(|| MockMateError::unauthorized("please log in first"))
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<AuthSession>> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<AuthSession>> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
