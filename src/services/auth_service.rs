// Account registration, login and session authentication

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

use crate::entity::users::{self, ROLE_ADMIN, ROLE_OPERATOR, ROLE_TOKENIZER};
use crate::error::{MarketError, MarketResult};
use crate::handlers::AppState;

/// Sessions stay valid for 30 days
const SESSION_TTL_DAYS: i64 = 30;

/// Creates a new account. New accounts always start with the tokenizer
/// (end-user) role; an admin promotes from there.
pub async fn register(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
    wallet_address: Option<String>,
) -> MarketResult<users::Model> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(MarketError::InvalidRequest(
            "name and email are required".to_string(),
        ));
    }
    if password.len() < 8 {
        return Err(MarketError::InvalidRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }

    // Emails are stored lowercased, so the duplicate check must be too
    let email = email.trim().to_lowercase();

    if state
        .repositories
        .users
        .get_by_email(&email)
        .await?
        .is_some()
    {
        return Err(MarketError::Conflict("email already registered".to_string()));
    }

    let password_hash = hash_password(password)?;

    let user = state
        .repositories
        .users
        .insert(users::ActiveModel {
            name: Set(name.trim().to_string()),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(ROLE_TOKENIZER.to_string()),
            wallet_address: Set(wallet_address.filter(|w| !w.trim().is_empty())),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .await?;

    tracing::info!(user_id = user.id, "account registered");
    Ok(user)
}

/// Verifies credentials and issues a fresh session token.
pub async fn login(
    state: &AppState,
    email: &str,
    password: &str,
) -> MarketResult<(String, users::Model)> {
    let user = state
        .repositories
        .users
        .get_by_email(&email.trim().to_lowercase())
        .await?
        .ok_or_else(|| MarketError::Unauthorized("invalid email or password".to_string()))?;

    if !verify_password(password, &user.password_hash) {
        return Err(MarketError::Unauthorized(
            "invalid email or password".to_string(),
        ));
    }

    let token = new_session_token();
    let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);
    state
        .repositories
        .users
        .create_session(user.id, &token, expires_at)
        .await?;

    Ok((token, user))
}

/// Revokes a session token.
pub async fn logout(state: &AppState, token: &str) -> MarketResult<()> {
    state.repositories.users.delete_session(token).await?;
    Ok(())
}

/// Resolves a bearer token to its user; expired and unknown tokens fail.
pub async fn authenticate(state: &AppState, token: &str) -> MarketResult<users::Model> {
    state
        .repositories
        .users
        .get_session_user(token)
        .await?
        .ok_or_else(|| MarketError::Unauthorized("session expired or unknown".to_string()))
}

/// Sets or replaces the wallet address on a user profile.
pub async fn set_wallet(
    state: &AppState,
    user: users::Model,
    wallet_address: &str,
) -> MarketResult<users::Model> {
    if wallet_address.trim().is_empty() {
        return Err(MarketError::InvalidRequest(
            "wallet address must not be empty".to_string(),
        ));
    }

    let mut changes: users::ActiveModel = user.into();
    changes.wallet_address = Set(Some(wallet_address.trim().to_string()));
    let updated = state.repositories.users.update(changes).await?;
    Ok(updated)
}

/// Admin role assignment.
pub async fn set_role(state: &AppState, user_id: i32, role: &str) -> MarketResult<users::Model> {
    if ![ROLE_ADMIN, ROLE_OPERATOR, ROLE_TOKENIZER].contains(&role) {
        return Err(MarketError::InvalidRequest(format!(
            "unknown role: {}",
            role
        )));
    }

    let user = state
        .repositories
        .users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| MarketError::NotFound(format!("user {} not found", user_id)))?;

    let mut changes: users::ActiveModel = user.into();
    changes.role = Set(role.to_string());
    let updated = state.repositories.users.update(changes).await?;

    tracing::info!(user_id, role, "user role changed");
    Ok(updated)
}

/// Hashes a password with Argon2id, producing a PHC string.
fn hash_password(password: &str) -> MarketResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| MarketError::InternalError(format!("password hashing failed: {}", e)))?
        .to_string();
    Ok(hash)
}

/// Checks a password against a stored PHC string.
fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Opaque 64-hex-char session token.
fn new_session_token() -> String {
    format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn session_tokens_are_opaque_hex() {
        let token = new_session_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, new_session_token());
    }
}
