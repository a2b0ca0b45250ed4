mod common;

use common::{FakeAccountApi, MemoryAuthRepository, notifier};
use mockmate_application::AccountService;
use mockmate_core::auth::{AuthContext, ProfileUpdate, Registration};
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn service(api: &Arc<FakeAccountApi>) -> (AccountService, Arc<MemoryAuthRepository>) {
    let repository = Arc::new(MemoryAuthRepository::default());
    let auth = Arc::new(AuthContext::new(repository.clone()));
    let (_, notifier) = notifier();
    (AccountService::new(api.clone(), auth, notifier), repository)
}

#[tokio::test]
async fn test_login_persists_session_with_token() {
    let api = FakeAccountApi::new();
    let (service, repository) = service(&api);

    let user = service.login("candidate@example.com", "secret").await.unwrap();
    assert_eq!(user.display_name(), "Ada Candidate");
    assert!(service.auth().is_authenticated());
    assert_eq!(service.auth().access_token().as_deref(), Some("jwt-access"));

    let stored = repository.stored.lock().unwrap().clone().unwrap();
    assert_eq!(stored.user.email, "candidate@example.com");
}

#[tokio::test]
async fn test_login_failure_leaves_context_empty() {
    let api = FakeAccountApi::new();
    let (service, _) = service(&api);

    assert!(service.login("candidate@example.com", "wrong").await.unwrap_err().is_unauthorized());
    assert!(service.login("", "secret").await.unwrap_err().is_validation());
    assert!(!service.auth().is_authenticated());
    assert_eq!(api.logins.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_logout_clears_even_when_server_refuses() {
    let api = FakeAccountApi::new();
    api.fail_logout.store(true, Ordering::SeqCst);
    let (service, repository) = service(&api);

    service.login("candidate@example.com", "secret").await.unwrap();
    service.logout().await.unwrap();

    assert!(!service.auth().is_authenticated());
    assert!(repository.stored.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_profile_requires_login() {
    let api = FakeAccountApi::new();
    let (service, _) = service(&api);

    assert!(service.profile().await.unwrap_err().is_unauthorized());
    assert!(service.skills().await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn test_profile_update_refreshes_stored_user() {
    let api = FakeAccountApi::new();
    let (service, repository) = service(&api);
    service.login("candidate@example.com", "secret").await.unwrap();

    assert!(service
        .update_profile(&ProfileUpdate::default())
        .await
        .unwrap_err()
        .is_validation());

    let update = ProfileUpdate {
        bio: Some("Rustacean".to_string()),
        ..Default::default()
    };
    service.update_profile(&update).await.unwrap();
    assert_eq!(service.auth().user().unwrap().bio, "Rustacean");
    assert_eq!(repository.stored.lock().unwrap().clone().unwrap().user.bio, "Rustacean");
}

#[tokio::test]
async fn test_skills_round_trip() {
    let api = FakeAccountApi::new();
    let (service, _) = service(&api);
    service.login("candidate@example.com", "secret").await.unwrap();

    let skill = service.add_skill("Rust", 120).await.unwrap();
    assert_eq!(skill.level, 100);
    assert!(service.add_skill("  ", 50).await.unwrap_err().is_validation());

    service.add_skill("SQL", 60).await.unwrap();
    service.remove_skill(skill.id.as_deref().unwrap()).await.unwrap();
    let skills = service.skills().await.unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0].name, "SQL");
}

#[tokio::test]
async fn test_register_validates_required_fields() {
    let api = FakeAccountApi::new();
    let (service, _) = service(&api);

    let mut registration = Registration {
        email: "new@example.com".to_string(),
        username: "newbie".to_string(),
        password: String::new(),
        fullname: None,
        is_candidate: true,
    };
    assert!(service.register(&registration).await.unwrap_err().is_validation());

    registration.password = "hunter22".to_string();
    let user = service.register(&registration).await.unwrap();
    assert_eq!(user.email, "new@example.com");
    // Registering does not sign in.
    assert!(!service.auth().is_authenticated());
}
