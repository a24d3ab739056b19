mod common;

use std::sync::Arc;

use common::test_authenticator;
use common::InMemoryUserStore;
use common::SECRET;
use ticket_auth::AuthConfig;
use ticket_auth::AuthError;
use ticket_auth::Authenticator;
use ticket_auth::Claims;
use ticket_auth::RegisterCommand;
use ticket_auth::Rejection;
use ticket_auth::TokenSigner;
use ticket_auth::UserId;
use ticket_auth::UserLookup;

fn register_command(email: &str, password: &str) -> RegisterCommand {
    RegisterCommand {
        email: email.to_string(),
        password: password.to_string(),
        full_name: None,
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let (authenticator, _) = test_authenticator();

    let principal = authenticator
        .register(register_command("a@b.com", "secret1"))
        .await
        .expect("Registration failed");
    assert_eq!(principal.email, "a@b.com");

    let token = authenticator
        .login("a@b.com", "secret1")
        .await
        .expect("Login failed");
    assert_eq!(token.token_type, "bearer");

    let result = authenticator.login("a@b.com", "wrong").await;
    assert!(matches!(
        result,
        Err(AuthError::Unauthorized(Rejection::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_login_token_resolves_to_registered_user() {
    let (authenticator, _) = test_authenticator();

    let registered = authenticator
        .register(RegisterCommand {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
            full_name: Some("Ada Lovelace".to_string()),
        })
        .await
        .unwrap();

    let token = authenticator.login("a@b.com", "secret1").await.unwrap();
    let me = authenticator
        .current_user(&token.access_token)
        .await
        .expect("Token did not resolve");

    assert_eq!(me, registered);
    assert_eq!(me.full_name.as_deref(), Some("Ada Lovelace"));

    let via_header = authenticator
        .resolver()
        .resolve_bearer(&format!("Bearer {}", token.access_token))
        .await
        .unwrap();
    assert_eq!(via_header, registered);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (authenticator, store) = test_authenticator();

    authenticator
        .register(register_command("a@b.com", "secret1"))
        .await
        .unwrap();
    let result = authenticator
        .register(register_command("a@b.com", "secret2"))
        .await;

    assert!(matches!(result, Err(AuthError::EmailAlreadyRegistered(_))));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_token_for_deleted_user() {
    let (authenticator, store) = test_authenticator();

    let principal = authenticator
        .register(register_command("a@b.com", "secret1"))
        .await
        .unwrap();
    let token = authenticator.login("a@b.com", "secret1").await.unwrap();

    store.remove(principal.id).await;

    let result = authenticator.current_user(&token.access_token).await;
    assert!(matches!(
        result,
        Err(AuthError::Unauthorized(Rejection::UserNotFound))
    ));
}

#[tokio::test]
async fn test_unknown_subject_is_user_not_found() {
    let (authenticator, _) = test_authenticator();

    let token = TokenSigner::new(SECRET).issue(Claims::new().with_subject(42), 3600);
    let result = authenticator.current_user(&token).await;

    assert!(matches!(
        result,
        Err(AuthError::Unauthorized(Rejection::UserNotFound))
    ));
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let (authenticator, _) = test_authenticator();

    let principal = authenticator
        .register(register_command("a@b.com", "secret1"))
        .await
        .unwrap();
    let token = TokenSigner::new(SECRET).issue(Claims::new().with_subject(principal.id.0), -1);

    let result = authenticator.current_user(&token).await;
    assert!(matches!(
        result,
        Err(AuthError::Unauthorized(Rejection::InvalidToken))
    ));
}

#[tokio::test]
async fn test_tokens_from_other_deployment_are_rejected() {
    let store = Arc::new(InMemoryUserStore::default());
    let first = Authenticator::new(Arc::clone(&store), SECRET);
    let second = Authenticator::new(Arc::clone(&store), "a-completely-different-signing-secret!!");

    first
        .register(register_command("a@b.com", "secret1"))
        .await
        .unwrap();
    let token = first.login("a@b.com", "secret1").await.unwrap();

    assert!(first.current_user(&token.access_token).await.is_ok());
    assert!(matches!(
        second.current_user(&token.access_token).await,
        Err(AuthError::Unauthorized(Rejection::InvalidToken))
    ));
}

#[tokio::test]
async fn test_from_config() {
    let config = AuthConfig::from_toml(&format!(
        r#"
        [jwt]
        secret = "{SECRET}"
        ttl_seconds = 120

        [password]
        strategy = "legacy_sha256"
        min_length = 8
        "#
    ))
    .unwrap();

    let store = Arc::new(InMemoryUserStore::default());
    let authenticator = Authenticator::from_config(&config, Arc::clone(&store));

    let result = authenticator
        .register(register_command("a@b.com", "secret1"))
        .await;
    assert!(matches!(result, Err(AuthError::InvalidPassword(_))));

    authenticator
        .register(register_command("a@b.com", "longer-secret"))
        .await
        .unwrap();

    let stored = store
        .find_by_email("a@b.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.password_hash.len(), 64);

    let token = authenticator.login("a@b.com", "longer-secret").await.unwrap();
    let claims = TokenSigner::new(SECRET).verify(&token.access_token).unwrap();
    let issued_at = chrono::Utc::now().timestamp();
    let exp = claims.expiration().unwrap();
    assert!(exp <= issued_at + 120 && exp >= issued_at + 110);
    assert_eq!(claims.subject_id(), Some(stored.id.0));
    assert_eq!(stored.id, UserId(1));
}
