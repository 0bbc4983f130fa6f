mod common;

use chrono::{Duration, Utc};

use common::{seed_admin, seed_user, TestDb};
use tangible_market_api::entity::users;
use tangible_market_api::error::MarketError;
use tangible_market_api::services::auth_service;

#[tokio::test]
async fn register_login_and_authenticate() {
    let db = TestDb::new().await;
    let state = db.state();

    let user = seed_user(&state, "Ana", "ana@example.com", "0xaaa1").await;
    assert_eq!(user.role, users::ROLE_TOKENIZER);
    assert_eq!(user.email, "ana@example.com");

    let (token, logged_in) = auth_service::login(&state, "ana@example.com", "password123")
        .await
        .expect("login should succeed");
    assert_eq!(logged_in.id, user.id);

    let resolved = auth_service::authenticate(&state, &token)
        .await
        .expect("token should authenticate");
    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn email_addresses_are_unique_and_case_insensitive() {
    let db = TestDb::new().await;
    let state = db.state();

    seed_user(&state, "Ana", "ana@example.com", "0xaaa1").await;

    let duplicate =
        auth_service::register(&state, "Other", "Ana@Example.com", "password456", None).await;
    assert!(matches!(duplicate, Err(MarketError::Conflict(_))));

    // Login works regardless of the casing used at registration
    auth_service::login(&state, "ANA@example.com", "password123")
        .await
        .expect("case-insensitive login should succeed");
}

#[tokio::test]
async fn wrong_credentials_are_rejected() {
    let db = TestDb::new().await;
    let state = db.state();

    seed_user(&state, "Ana", "ana@example.com", "0xaaa1").await;

    let bad_password = auth_service::login(&state, "ana@example.com", "nope-nope").await;
    assert!(matches!(bad_password, Err(MarketError::Unauthorized(_))));

    let unknown_email = auth_service::login(&state, "ghost@example.com", "password123").await;
    assert!(matches!(unknown_email, Err(MarketError::Unauthorized(_))));
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let db = TestDb::new().await;
    let state = db.state();

    seed_user(&state, "Ana", "ana@example.com", "0xaaa1").await;
    let (token, _) = auth_service::login(&state, "ana@example.com", "password123")
        .await
        .unwrap();

    auth_service::logout(&state, &token).await.unwrap();

    let after = auth_service::authenticate(&state, &token).await;
    assert!(matches!(after, Err(MarketError::Unauthorized(_))));
}

#[tokio::test]
async fn expired_sessions_do_not_authenticate() {
    let db = TestDb::new().await;
    let state = db.state();

    let user = seed_user(&state, "Ana", "ana@example.com", "0xaaa1").await;

    let stale_token = "deadbeef".repeat(8);
    state
        .repositories
        .users
        .create_session(user.id, &stale_token, Utc::now() - Duration::hours(1))
        .await
        .unwrap();

    let result = auth_service::authenticate(&state, &stale_token).await;
    assert!(matches!(result, Err(MarketError::Unauthorized(_))));
}

#[tokio::test]
async fn role_assignment_validates_role_names() {
    let db = TestDb::new().await;
    let state = db.state();

    let admin = seed_admin(&state).await;
    assert_eq!(admin.role, users::ROLE_ADMIN);

    let user = seed_user(&state, "Ana", "ana@example.com", "0xaaa1").await;

    let promoted = auth_service::set_role(&state, user.id, users::ROLE_OPERATOR)
        .await
        .unwrap();
    assert_eq!(promoted.role, users::ROLE_OPERATOR);

    let bogus = auth_service::set_role(&state, user.id, "superuser").await;
    assert!(matches!(bogus, Err(MarketError::InvalidRequest(_))));
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let db = TestDb::new().await;
    let state = db.state();

    let result = auth_service::register(&state, "Ana", "ana@example.com", "short", None).await;
    assert!(matches!(result, Err(MarketError::InvalidRequest(_))));
}
