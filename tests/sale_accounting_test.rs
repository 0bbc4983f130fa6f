mod common;

use common::{seed_asset, seed_user, TestDb};
use tangible_market_api::error::MarketError;
use tangible_market_api::services::asset_service::{AssetPatch, AssetService};
use tangible_market_api::services::sale_service;

#[tokio::test]
async fn purchase_moves_sold_counter_and_holding_together() {
    let db = TestDb::new().await;
    let state = db.state();

    seed_user(&state, "Ana", "ana@example.com", "0xbuyer").await;
    let asset = seed_asset(&state, "Solar Farm", 1250, 100).await;

    let receipt = sale_service::purchase_tokens(&state, asset.id, "0xbuyer", 30)
        .await
        .expect("purchase should succeed");

    assert_eq!(receipt.quantity, 30);
    assert_eq!(receipt.tokens_sold, 30);
    assert_eq!(receipt.tokens_available, 70);
    assert_eq!(receipt.token_price.to_string(), "12.50");
    assert_eq!(receipt.total_price.to_string(), "375.00");
    assert_eq!(receipt.percent_sold.to_string(), "30");

    let holding = state
        .repositories
        .holdings
        .find_by_wallet_and_asset("0xbuyer", asset.id)
        .await
        .unwrap()
        .expect("holding row should exist");
    assert_eq!(holding.quantity, 30);
    assert_eq!(
        holding.contract_address.as_deref(),
        Some("0x00000000000000000000000000000000000000aa")
    );
}

#[tokio::test]
async fn repeat_purchases_accumulate_into_one_holding_row() {
    let db = TestDb::new().await;
    let state = db.state();

    seed_user(&state, "Ana", "ana@example.com", "0xbuyer").await;
    let asset = seed_asset(&state, "Bakery", 500, 1000).await;

    sale_service::purchase_tokens(&state, asset.id, "0xbuyer", 100)
        .await
        .unwrap();
    sale_service::purchase_tokens(&state, asset.id, "0xbuyer", 250)
        .await
        .unwrap();

    let holdings = state
        .repositories
        .holdings
        .find_by_wallet("0xbuyer")
        .await
        .unwrap();
    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0].quantity, 350);

    let refreshed = state
        .repositories
        .assets
        .get_by_id(asset.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.tokens_sold, 350);
    assert_eq!(refreshed.tokens_available(), 650);
}

#[tokio::test]
async fn oversell_is_rejected_and_leaves_no_partial_state() {
    let db = TestDb::new().await;
    let state = db.state();

    seed_user(&state, "Ana", "ana@example.com", "0xbuyer").await;
    let asset = seed_asset(&state, "Tractor", 10_000, 50).await;

    sale_service::purchase_tokens(&state, asset.id, "0xbuyer", 40)
        .await
        .unwrap();

    // 10 left, asking for 11 must fail without touching anything
    let result = sale_service::purchase_tokens(&state, asset.id, "0xother", 11).await;
    assert!(matches!(result, Err(MarketError::Conflict(_))));

    let refreshed = state
        .repositories
        .assets
        .get_by_id(asset.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.tokens_sold, 40);

    let other_holding = state
        .repositories
        .holdings
        .find_by_wallet_and_asset("0xother", asset.id)
        .await
        .unwrap();
    assert!(other_holding.is_none());

    // The exact remainder still sells
    sale_service::purchase_tokens(&state, asset.id, "0xother", 10)
        .await
        .expect("buying the exact remainder should succeed");
}

#[tokio::test]
async fn nonpositive_quantities_are_rejected() {
    let db = TestDb::new().await;
    let state = db.state();

    seed_user(&state, "Ana", "ana@example.com", "0xbuyer").await;
    let asset = seed_asset(&state, "Warehouse", 2000, 10).await;

    for quantity in [0, -5] {
        let result = sale_service::purchase_tokens(&state, asset.id, "0xbuyer", quantity).await;
        assert!(matches!(result, Err(MarketError::InvalidRequest(_))));
    }
}

#[tokio::test]
async fn purchases_are_broadcast_to_subscribers() {
    let db = TestDb::new().await;
    let state = db.state();

    seed_user(&state, "Ana", "ana@example.com", "0xbuyer").await;
    let asset = seed_asset(&state, "Vineyard", 750, 200).await;

    let mut rx = state.sale_events.subscribe();

    sale_service::purchase_tokens(&state, asset.id, "0xbuyer", 50)
        .await
        .unwrap();

    let update = rx.try_recv().expect("update should have been broadcast");
    assert_eq!(update.asset_id, asset.id);
    assert_eq!(update.tokens_sold, 50);
    assert_eq!(update.total_supply, 200);
    assert_eq!(update.tokens_available, 150);
    assert_eq!(update.percent_sold.to_string(), "25");
}

#[tokio::test]
async fn supply_can_never_shrink_below_sold() {
    let db = TestDb::new().await;
    let state = db.state();

    seed_user(&state, "Ana", "ana@example.com", "0xbuyer").await;
    let asset = seed_asset(&state, "Mill", 100, 80).await;

    sale_service::purchase_tokens(&state, asset.id, "0xbuyer", 60)
        .await
        .unwrap();

    let service = AssetService::new(state.repositories.assets.clone());
    let shrink = service
        .update_asset(
            asset.id,
            AssetPatch {
                total_supply: Some(50),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(shrink, Err(MarketError::Conflict(_))));

    // Growing the supply is fine
    let grown = service
        .update_asset(
            asset.id,
            AssetPatch {
                total_supply: Some(120),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(grown.total_supply, 120);
    assert_eq!(grown.tokens_available(), 60);
}
