//! Authentication and profile domain module.
//!
//! - `model`: User and profile types
//! - `context`: The injected authentication state (`AuthContext`)
//! - `repository`: Persistence trait for the authentication state

mod context;
mod model;
mod repository;

pub use context::AuthContext;
pub use model::{AuthSession, Credentials, ProfileSkill, ProfileUpdate, Registration, User};
pub use repository::AuthRepository;
