use mockmate_core::auth::{AuthContext, AuthSession, User};
use mockmate_infrastructure::{MockMatePaths, TomlAuthRepository};
use std::sync::Arc;
use tempfile::TempDir;

fn signed_in_user() -> User {
    User {
        id: Some("1".to_string()),
        email: "candidate@example.com".to_string(),
        fullname: "Ada Candidate".to_string(),
        is_candidate: true,
        ..Default::default()
    }
}

#[test]
fn test_login_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let paths = MockMatePaths::new(Some(temp_dir.path()));

    // First process: log in
    let repo = Arc::new(TomlAuthRepository::new(&paths).unwrap());
    let context = AuthContext::load_from(repo).unwrap();
    assert!(!context.is_authenticated());
    context
        .set(AuthSession::new(signed_in_user(), Some("access-jwt".to_string())))
        .unwrap();

    // Second process: the context is restored from user.toml
    let repo = Arc::new(TomlAuthRepository::new(&paths).unwrap());
    let restored = AuthContext::load_from(repo).unwrap();
    assert!(restored.is_authenticated());
    assert_eq!(restored.user().unwrap().display_name(), "Ada Candidate");
    assert_eq!(restored.access_token().as_deref(), Some("access-jwt"));
}

#[test]
fn test_logout_clears_file() {
    let temp_dir = TempDir::new().unwrap();
    let paths = MockMatePaths::new(Some(temp_dir.path()));
    let user_file = paths.user_file().unwrap();

    let context = AuthContext::new(Arc::new(TomlAuthRepository::new(&paths).unwrap()));
    context
        .set(AuthSession::new(signed_in_user(), None))
        .unwrap();
    assert!(user_file.exists());

    context.clear().unwrap();
    assert!(!user_file.exists());
    assert!(!context.is_authenticated());
}
