mod common;

use common::{seed_asset, seed_operator, seed_user, TestDb};
use tangible_market_api::entity::claims;
use tangible_market_api::error::MarketError;
use tangible_market_api::services::{claim_service, rating_service};

#[tokio::test]
async fn ratings_upsert_per_user_and_average() {
    let db = TestDb::new().await;
    let state = db.state();

    let operator = seed_operator(&state).await;
    let ana = seed_user(&state, "Ana", "ana@example.com", "0xana").await;
    let bruno = seed_user(&state, "Bruno", "bruno@example.com", "0xbruno").await;

    rating_service::rate_operator(&state, operator.id, &ana, 5, Some("great".to_string()))
        .await
        .unwrap();
    rating_service::rate_operator(&state, operator.id, &bruno, 2, None)
        .await
        .unwrap();

    let summary = rating_service::operator_ratings(&state, operator.id)
        .await
        .unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.average.unwrap().to_string(), "3.5");

    // Rating again replaces, it does not add a row
    rating_service::rate_operator(&state, operator.id, &ana, 3, None)
        .await
        .unwrap();

    let summary = rating_service::operator_ratings(&state, operator.id)
        .await
        .unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.average.unwrap().to_string(), "2.5");
}

#[tokio::test]
async fn ratings_outside_one_to_five_are_rejected() {
    let db = TestDb::new().await;
    let state = db.state();

    let operator = seed_operator(&state).await;
    let ana = seed_user(&state, "Ana", "ana@example.com", "0xana").await;

    for rating in [0, 6, -1] {
        let result =
            rating_service::rate_operator(&state, operator.id, &ana, rating, None).await;
        assert!(matches!(result, Err(MarketError::InvalidRequest(_))));
    }
}

#[tokio::test]
async fn rating_an_unknown_operator_fails() {
    let db = TestDb::new().await;
    let state = db.state();

    let ana = seed_user(&state, "Ana", "ana@example.com", "0xana").await;
    let result = rating_service::rate_operator(&state, 4242, &ana, 4, None).await;
    assert!(matches!(result, Err(MarketError::NotFound(_))));
}

#[tokio::test]
async fn claims_walk_the_approval_lifecycle() {
    let db = TestDb::new().await;
    let state = db.state();

    let ana = seed_user(&state, "Ana", "ana@example.com", "0xana").await;
    let asset = seed_asset(&state, "Hostel", 1000, 100).await;

    let claim = claim_service::file_claim(&state, &ana, asset.id, 12_000, None)
        .await
        .unwrap();
    assert_eq!(claim.status, claims::STATUS_PENDING);
    assert_eq!(claim.wallet_address, "0xana");

    let approved = claim_service::set_status(&state, claim.id, claims::STATUS_APPROVED, None)
        .await
        .unwrap();
    assert_eq!(approved.status, claims::STATUS_APPROVED);

    let paid = claim_service::set_status(
        &state,
        claim.id,
        claims::STATUS_PAID,
        Some("wire sent".to_string()),
    )
    .await
    .unwrap();
    assert_eq!(paid.status, claims::STATUS_PAID);
    assert_eq!(paid.notes.as_deref(), Some("wire sent"));
}

#[tokio::test]
async fn illegal_claim_transitions_are_conflicts() {
    let db = TestDb::new().await;
    let state = db.state();

    let ana = seed_user(&state, "Ana", "ana@example.com", "0xana").await;
    let asset = seed_asset(&state, "Hostel", 1000, 100).await;

    let claim = claim_service::file_claim(&state, &ana, asset.id, 5000, None)
        .await
        .unwrap();

    // pending cannot jump straight to paid
    let jump = claim_service::set_status(&state, claim.id, claims::STATUS_PAID, None).await;
    assert!(matches!(jump, Err(MarketError::Conflict(_))));

    claim_service::set_status(&state, claim.id, claims::STATUS_REJECTED, None)
        .await
        .unwrap();

    // rejected is terminal
    let revive = claim_service::set_status(&state, claim.id, claims::STATUS_APPROVED, None).await;
    assert!(matches!(revive, Err(MarketError::Conflict(_))));
}

#[tokio::test]
async fn claims_validate_amount_and_asset() {
    let db = TestDb::new().await;
    let state = db.state();

    let ana = seed_user(&state, "Ana", "ana@example.com", "0xana").await;
    let asset = seed_asset(&state, "Hostel", 1000, 100).await;

    let zero = claim_service::file_claim(&state, &ana, asset.id, 0, None).await;
    assert!(matches!(zero, Err(MarketError::InvalidRequest(_))));

    let ghost_asset = claim_service::file_claim(&state, &ana, 999_999, 1000, None).await;
    assert!(matches!(ghost_asset, Err(MarketError::NotFound(_))));
}

#[tokio::test]
async fn wallets_see_only_their_own_claims() {
    let db = TestDb::new().await;
    let state = db.state();

    let ana = seed_user(&state, "Ana", "ana@example.com", "0xana").await;
    let bruno = seed_user(&state, "Bruno", "bruno@example.com", "0xbruno").await;
    let asset = seed_asset(&state, "Hostel", 1000, 100).await;

    claim_service::file_claim(&state, &ana, asset.id, 1000, None)
        .await
        .unwrap();
    claim_service::file_claim(&state, &ana, asset.id, 2000, None)
        .await
        .unwrap();
    claim_service::file_claim(&state, &bruno, asset.id, 3000, None)
        .await
        .unwrap();

    let ana_claims = state
        .repositories
        .claims
        .find_by_wallet("0xana")
        .await
        .unwrap();
    assert_eq!(ana_claims.len(), 2);

    let all_pending = state
        .repositories
        .claims
        .find_all(Some(claims::STATUS_PENDING))
        .await
        .unwrap();
    assert_eq!(all_pending.len(), 3);
}
