// Business logic service implementations

pub mod asset_service;
pub mod auth_service;
pub mod claim_service;
pub mod contract_service;
pub mod marketplace_service;
pub mod rating_service;
pub mod sale_service;
pub mod wallet_service;

use crate::entity::users;
use crate::error::{MarketError, MarketResult};

/// Picks the wallet a mutation acts on: an explicit request wallet wins,
/// otherwise the one stored on the user profile.
pub(crate) fn resolve_wallet(
    user: &users::Model,
    explicit: Option<String>,
) -> MarketResult<String> {
    explicit
        .filter(|w| !w.trim().is_empty())
        .or_else(|| user.wallet_address.clone().filter(|w| !w.trim().is_empty()))
        .ok_or_else(|| {
            MarketError::InvalidRequest(
                "no wallet address given and none stored on the profile".to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(wallet: Option<&str>) -> users::Model {
        users::Model {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: String::new(),
            role: users::ROLE_TOKENIZER.to_string(),
            wallet_address: wallet.map(|w| w.to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn explicit_wallet_wins_over_profile() {
        let resolved = resolve_wallet(&user(Some("0xprofile")), Some("0xexplicit".to_string()));
        assert_eq!(resolved.unwrap(), "0xexplicit");
    }

    #[test]
    fn profile_wallet_is_the_fallback() {
        let resolved = resolve_wallet(&user(Some("0xprofile")), None);
        assert_eq!(resolved.unwrap(), "0xprofile");
    }

    #[test]
    fn missing_wallet_is_rejected() {
        assert!(resolve_wallet(&user(None), None).is_err());
        assert!(resolve_wallet(&user(None), Some("   ".to_string())).is_err());
    }
}
