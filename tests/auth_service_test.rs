//! Auth service tests over the in-memory unit of work.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use placedex::errors::AppError;
use placedex::services::{AuthService, Authenticator, SignupInput};
use placedex::Config;

use common::{png, MemImages, MemUow};

fn authenticator(uow: &Arc<MemUow>, images: &Arc<MemImages>) -> Authenticator<MemUow> {
    Authenticator::new(uow.clone(), images.clone(), Config::from_env())
}

fn signup_input(username: &str, email: &str, password: &str) -> SignupInput {
    SignupInput {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        image: png("avatar.png"),
    }
}

#[tokio::test]
async fn signup_then_login_round_trip() {
    let uow = Arc::new(MemUow::default());
    let images = Arc::new(MemImages::default());
    let auth = authenticator(&uow, &images);

    let signed_up = auth
        .signup(signup_input("max", "  Max@Test.COM ", "secret1"))
        .await
        .unwrap();

    assert_eq!(signed_up.email, "max@test.com");
    assert!(!signed_up.token.is_empty());

    let claims = auth.verify_token(&signed_up.token).unwrap();
    assert_eq!(claims.sub, signed_up.user_id);
    assert_eq!(claims.email, "max@test.com");

    // Login is case-insensitive on the email
    let logged_in = auth
        .login("MAX@test.com".to_string(), "secret1".to_string())
        .await
        .unwrap();
    assert_eq!(logged_in.user_id, signed_up.user_id);
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let uow = Arc::new(MemUow::default());
    let images = Arc::new(MemImages::default());
    let auth = authenticator(&uow, &images);

    auth.signup(signup_input("max", "max@test.com", "secret1"))
        .await
        .unwrap();

    let result = auth
        .login("max@test.com".to_string(), "wrong1a".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn login_with_unknown_email_is_rejected() {
    let uow = Arc::new(MemUow::default());
    let images = Arc::new(MemImages::default());
    let auth = authenticator(&uow, &images);

    let result = auth
        .login("nobody@test.com".to_string(), "secret1".to_string())
        .await;

    // Indistinguishable from a wrong password
    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn duplicate_email_conflicts_regardless_of_case() {
    let uow = Arc::new(MemUow::default());
    let images = Arc::new(MemImages::default());
    let auth = authenticator(&uow, &images);

    auth.signup(signup_input("first", "A@B.com", "secret1"))
        .await
        .unwrap();

    let result = auth.signup(signup_input("second", "a@b.com", "secret2")).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    assert_eq!(uow.state.lock().unwrap().users.len(), 1);
}

#[tokio::test]
async fn short_password_is_rejected_before_any_side_effect() {
    let uow = Arc::new(MemUow::default());
    let images = Arc::new(MemImages::default());
    let auth = authenticator(&uow, &images);

    let result = auth.signup(signup_input("max", "max@test.com", "short1")).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    assert!(uow.state.lock().unwrap().users.is_empty());
}

#[tokio::test]
async fn image_upload_failure_creates_no_user() {
    let uow = Arc::new(MemUow::default());
    let images = Arc::new(MemImages::default());
    images.fail_upload.store(true, Ordering::SeqCst);
    let auth = authenticator(&uow, &images);

    let result = auth.signup(signup_input("max", "max@test.com", "secret1")).await;

    assert!(matches!(result.unwrap_err(), AppError::Upstream(_)));
    assert!(uow.state.lock().unwrap().users.is_empty());
}

#[tokio::test]
async fn plaintext_password_never_leaves_the_service() {
    let uow = Arc::new(MemUow::default());
    let images = Arc::new(MemImages::default());
    let auth = authenticator(&uow, &images);

    let response = auth
        .signup(signup_input("max", "max@test.com", "secret1"))
        .await
        .unwrap();

    let body = serde_json::to_string(&response).unwrap();
    assert!(!body.contains("secret1"));

    let state = uow.state.lock().unwrap();
    let user = state.users.values().next().unwrap();
    assert_ne!(user.password_hash, "secret1");
    assert!(user.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let uow = Arc::new(MemUow::default());
    let images = Arc::new(MemImages::default());
    let auth = authenticator(&uow, &images);

    let result = auth.verify_token("not-a-jwt");

    assert!(matches!(result.unwrap_err(), AppError::Jwt(_)));
}
