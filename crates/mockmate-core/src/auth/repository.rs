use super::model::AuthSession;
use crate::error::Result;

/// Persistence for the authentication state.
pub trait AuthRepository: Send + Sync {
    /// Returns `None` when nobody is signed in.
    fn load(&self) -> Result<Option<AuthSession>>;

    fn save(&self, session: &AuthSession) -> Result<()>;

    /// Removes the persisted state. Succeeds when nothing is stored.
    fn clear(&self) -> Result<()>;
}
