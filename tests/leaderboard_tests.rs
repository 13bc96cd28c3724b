use std::sync::Arc;

use adscout::application::leaderboard::{
    rank_traders, LeaderboardRequest, LeaderboardService, LeaderboardSort,
};
use adscout::domain::TradeType;
use adscout::error::{Error, UpstreamError};
use adscout::testkit::domain::order;
use adscout::testkit::marketplace::FakeDesk;
use rust_decimal_macros::dec;

#[test]
fn volume_ranking_sums_totals() {
    let orders = vec![
        order(Some("Alice"), Some(dec!(100)), "USDT"),
        order(Some("Bob"), Some(dec!(250)), "BTC"),
        order(Some("Alice"), Some(dec!(200)), "BTC"),
    ];

    let ranked = rank_traders(&orders, LeaderboardSort::Volume, 10);

    assert_eq!(ranked[0].nickname, "Alice");
    assert_eq!(ranked[0].volume, dec!(300));
    assert_eq!(ranked[0].orders, 2);
    assert_eq!(ranked[0].assets, vec!["BTC", "USDT"]);
    assert_eq!(ranked[1].nickname, "Bob");
}

#[test]
fn orders_without_totals_are_skipped() {
    let orders = vec![
        order(Some("Alice"), None, "USDT"),
        order(Some("Bob"), Some(dec!(10)), "USDT"),
    ];

    let ranked = rank_traders(&orders, LeaderboardSort::Orders, 10);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].nickname, "Bob");
}

#[test]
fn missing_nicknames_are_grouped_as_unknown() {
    let orders = vec![
        order(None, Some(dec!(10)), "USDT"),
        order(Some("  "), Some(dec!(5)), "USDT"),
    ];

    let ranked = rank_traders(&orders, LeaderboardSort::Volume, 10);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].nickname, "Unknown");
    assert_eq!(ranked[0].orders, 2);
}

#[test]
fn ties_keep_first_seen_order_and_limit_applies() {
    let orders = vec![
        order(Some("C"), Some(dec!(50)), "USDT"),
        order(Some("A"), Some(dec!(50)), "USDT"),
        order(Some("B"), Some(dec!(50)), "USDT"),
    ];

    let ranked = rank_traders(&orders, LeaderboardSort::Volume, 2);

    let names: Vec<&str> = ranked.iter().map(|e| e.nickname.as_str()).collect();
    assert_eq!(names, vec!["C", "A"]);
}

#[tokio::test]
async fn service_queries_the_configured_pair() {
    let desk = Arc::new(FakeDesk::new().with_orders(vec![order(
        Some("Alice"),
        Some(dec!(10)),
        "USDT",
    )]));
    let service = LeaderboardService::new(desk.clone(), "USDT", "TZS", 30);

    let board = service
        .leaderboard(&LeaderboardRequest {
            trade_type: Some(TradeType::Sell),
            ..LeaderboardRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(board.total_orders, 1);
    assert_eq!(board.days, 30);

    let query = &desk.order_queries()[0];
    assert_eq!(query.asset, "USDT");
    assert_eq!(query.fiat, "TZS");
    assert_eq!(query.trade_type, Some(TradeType::Sell));
}

#[tokio::test]
async fn invalid_window_is_rejected_before_any_call() {
    let desk = Arc::new(FakeDesk::new());
    let service = LeaderboardService::new(desk.clone(), "USDT", "TZS", 30);

    let result = service
        .leaderboard(&LeaderboardRequest {
            days: 400,
            ..LeaderboardRequest::default()
        })
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(desk.order_queries().is_empty());
}

#[tokio::test]
async fn upstream_errors_propagate() {
    let desk = Arc::new(FakeDesk::new());
    desk.fail_with(UpstreamError::MissingCredentials);
    let service = LeaderboardService::new(desk, "USDT", "TZS", 30);

    let result = service.leaderboard(&LeaderboardRequest::default()).await;

    assert!(matches!(
        result,
        Err(Error::Upstream(UpstreamError::MissingCredentials))
    ));
}
