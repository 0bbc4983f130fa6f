mod common;

use common::{seed_asset, seed_user, TestDb};
use tangible_market_api::entity::listings;
use tangible_market_api::error::MarketError;
use tangible_market_api::services::{marketplace_service, sale_service};

#[tokio::test]
async fn listing_requires_a_sufficient_holding() {
    let db = TestDb::new().await;
    let state = db.state();

    let seller = seed_user(&state, "Sara", "sara@example.com", "0xseller").await;
    let asset = seed_asset(&state, "Apartment", 1000, 100).await;

    // No holding yet: listing anything is rejected
    let early = marketplace_service::create_listing(&state, &seller, asset.id, 10, 200, None).await;
    assert!(matches!(early, Err(MarketError::Conflict(_))));

    sale_service::purchase_tokens(&state, asset.id, "0xseller", 50)
        .await
        .unwrap();

    let listing = marketplace_service::create_listing(&state, &seller, asset.id, 30, 200, None)
        .await
        .expect("listing inside the holding should succeed");
    assert_eq!(listing.status, listings::STATUS_ACTIVE);
    assert_eq!(listing.total_cents(), 6000);

    // 30 already on the board; another 30 would exceed the 50 held
    let over = marketplace_service::create_listing(&state, &seller, asset.id, 30, 180, None).await;
    assert!(matches!(over, Err(MarketError::Conflict(_))));

    // The remaining 20 still fit
    marketplace_service::create_listing(&state, &seller, asset.id, 20, 180, None)
        .await
        .expect("listing the remainder should succeed");
}

#[tokio::test]
async fn batch_purchase_settles_both_sides() {
    let db = TestDb::new().await;
    let state = db.state();

    let seller = seed_user(&state, "Sara", "sara@example.com", "0xseller").await;
    let buyer = seed_user(&state, "Bruno", "bruno@example.com", "0xbuyer").await;
    let asset = seed_asset(&state, "Food Truck", 1000, 100).await;

    sale_service::purchase_tokens(&state, asset.id, "0xseller", 50)
        .await
        .unwrap();

    let first = marketplace_service::create_listing(&state, &seller, asset.id, 30, 200, None)
        .await
        .unwrap();
    let second = marketplace_service::create_listing(&state, &seller, asset.id, 10, 150, None)
        .await
        .unwrap();

    let receipt =
        marketplace_service::purchase_listings(&state, &buyer, &[first.id, second.id], None)
            .await
            .expect("batch purchase should succeed");

    assert_eq!(receipt.lines.len(), 2);
    // 30 * 2.00 + 10 * 1.50 = 75.00
    assert_eq!(receipt.total.to_string(), "75.00");

    let sold = state
        .repositories
        .listings
        .get_by_id(first.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sold.status, listings::STATUS_SOLD);
    assert_eq!(sold.buyer_wallet.as_deref(), Some("0xbuyer"));

    let seller_holding = state
        .repositories
        .holdings
        .find_by_wallet_and_asset("0xseller", asset.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(seller_holding.quantity, 10);

    let buyer_holding = state
        .repositories
        .holdings
        .find_by_wallet_and_asset("0xbuyer", asset.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(buyer_holding.quantity, 40);
}

#[tokio::test]
async fn a_listing_sells_exactly_once() {
    let db = TestDb::new().await;
    let state = db.state();

    let seller = seed_user(&state, "Sara", "sara@example.com", "0xseller").await;
    let buyer = seed_user(&state, "Bruno", "bruno@example.com", "0xbuyer").await;
    let late_buyer = seed_user(&state, "Carla", "carla@example.com", "0xlate").await;
    let asset = seed_asset(&state, "Olive Grove", 1000, 100).await;

    sale_service::purchase_tokens(&state, asset.id, "0xseller", 20)
        .await
        .unwrap();
    let listing = marketplace_service::create_listing(&state, &seller, asset.id, 20, 300, None)
        .await
        .unwrap();

    marketplace_service::purchase_listings(&state, &buyer, &[listing.id], None)
        .await
        .unwrap();

    let again =
        marketplace_service::purchase_listings(&state, &late_buyer, &[listing.id], None).await;
    assert!(matches!(again, Err(MarketError::Conflict(_))));

    // The late buyer's holdings were not touched by the failed batch
    let late_holding = state
        .repositories
        .holdings
        .find_by_wallet_and_asset("0xlate", asset.id)
        .await
        .unwrap();
    assert!(late_holding.is_none());
}

#[tokio::test]
async fn failed_batch_rolls_back_settled_lines() {
    let db = TestDb::new().await;
    let state = db.state();

    let seller = seed_user(&state, "Sara", "sara@example.com", "0xseller").await;
    let buyer = seed_user(&state, "Bruno", "bruno@example.com", "0xbuyer").await;
    let asset = seed_asset(&state, "Mill", 1000, 100).await;

    sale_service::purchase_tokens(&state, asset.id, "0xseller", 40)
        .await
        .unwrap();

    let good = marketplace_service::create_listing(&state, &seller, asset.id, 10, 100, None)
        .await
        .unwrap();

    // One good listing plus one unknown id: the whole batch must fail
    let result =
        marketplace_service::purchase_listings(&state, &buyer, &[good.id, 999_999], None).await;
    assert!(matches!(result, Err(MarketError::NotFound(_))));

    let untouched = state
        .repositories
        .listings
        .get_by_id(good.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.status, listings::STATUS_ACTIVE);
    assert!(untouched.buyer_wallet.is_none());

    let seller_holding = state
        .repositories
        .holdings
        .find_by_wallet_and_asset("0xseller", asset.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(seller_holding.quantity, 40);
}

#[tokio::test]
async fn buying_your_own_listing_is_rejected() {
    let db = TestDb::new().await;
    let state = db.state();

    let seller = seed_user(&state, "Sara", "sara@example.com", "0xseller").await;
    let asset = seed_asset(&state, "Press", 1000, 100).await;

    sale_service::purchase_tokens(&state, asset.id, "0xseller", 10)
        .await
        .unwrap();
    let listing = marketplace_service::create_listing(&state, &seller, asset.id, 10, 100, None)
        .await
        .unwrap();

    let result = marketplace_service::purchase_listings(&state, &seller, &[listing.id], None).await;
    assert!(matches!(result, Err(MarketError::InvalidRequest(_))));
}

#[tokio::test]
async fn sellers_can_cancel_only_their_own_active_listings() {
    let db = TestDb::new().await;
    let state = db.state();

    let seller = seed_user(&state, "Sara", "sara@example.com", "0xseller").await;
    let stranger = seed_user(&state, "Eve", "eve@example.com", "0xeve").await;
    let asset = seed_asset(&state, "Kiln", 1000, 100).await;

    sale_service::purchase_tokens(&state, asset.id, "0xseller", 10)
        .await
        .unwrap();
    let listing = marketplace_service::create_listing(&state, &seller, asset.id, 10, 100, None)
        .await
        .unwrap();

    let foreign = marketplace_service::cancel_listing(&state, &stranger, listing.id).await;
    assert!(matches!(foreign, Err(MarketError::NotFound(_))));

    marketplace_service::cancel_listing(&state, &seller, listing.id)
        .await
        .expect("own cancellation should succeed");

    let cancelled = state
        .repositories
        .listings
        .get_by_id(listing.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cancelled.status, listings::STATUS_CANCELLED);

    // Cancelled is terminal
    let again = marketplace_service::cancel_listing(&state, &seller, listing.id).await;
    assert!(matches!(again, Err(MarketError::NotFound(_))));

    // Cancelling released the listed quantity for a fresh listing
    marketplace_service::create_listing(&state, &seller, asset.id, 10, 120, None)
        .await
        .expect("quantity freed by cancellation should be listable again");
}

#[tokio::test]
async fn board_sorts_active_listings_by_price() {
    let db = TestDb::new().await;
    let state = db.state();

    let seller = seed_user(&state, "Sara", "sara@example.com", "0xseller").await;
    let asset = seed_asset(&state, "Loft", 1000, 100).await;

    sale_service::purchase_tokens(&state, asset.id, "0xseller", 30)
        .await
        .unwrap();

    marketplace_service::create_listing(&state, &seller, asset.id, 10, 300, None)
        .await
        .unwrap();
    marketplace_service::create_listing(&state, &seller, asset.id, 10, 100, None)
        .await
        .unwrap();
    marketplace_service::create_listing(&state, &seller, asset.id, 10, 200, None)
        .await
        .unwrap();

    let board = state
        .repositories
        .listings
        .find_active(Some(asset.id))
        .await
        .unwrap();

    let prices: Vec<i64> = board.iter().map(|l| l.price_per_token_cents).collect();
    assert_eq!(prices, vec![100, 200, 300]);
}
