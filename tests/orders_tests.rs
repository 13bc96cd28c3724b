use std::sync::Arc;

use adscout::application::{OrderDesk, PostAdRequest};
use adscout::domain::TradeType;
use adscout::error::{Error, ValidationError};
use adscout::testkit::marketplace::FakeDesk;
use rust_decimal_macros::dec;

fn desk() -> (Arc<FakeDesk>, OrderDesk) {
    let fake = Arc::new(FakeDesk::new());
    let orders = OrderDesk::new(
        fake.clone(),
        "USDT",
        "TZS",
        vec!["M-pesa".into(), "Tigo Pesa".into()],
    );
    (fake, orders)
}

fn request() -> PostAdRequest {
    PostAdRequest {
        price: Some(dec!(2950)),
        quantity: Some(dec!(100)),
        trade_type: Some("buy".into()),
        ..PostAdRequest::default()
    }
}

#[test]
fn defaults_fill_asset_fiat_and_pay_types() {
    let (_, orders) = desk();
    let ad = orders.prepare_ad(&request()).unwrap();

    assert_eq!(ad.trade_type, TradeType::Buy);
    assert_eq!(ad.asset, "USDT");
    assert_eq!(ad.fiat, "TZS");
    assert_eq!(ad.pay_types, vec!["M-pesa", "Tigo Pesa"]);
}

#[test]
fn pay_types_are_matched_case_insensitively() {
    let (_, orders) = desk();
    let ad = orders
        .prepare_ad(&PostAdRequest {
            pay_types: Some(vec!["tigo pesa".into(), "TIGO PESA".into()]),
            asset: Some("btc".into()),
            ..request()
        })
        .unwrap();

    assert_eq!(ad.pay_types, vec!["Tigo Pesa"]);
    assert_eq!(ad.asset, "BTC");
}

#[test]
fn rejects_non_positive_amounts() {
    let (_, orders) = desk();
    let err = orders
        .prepare_ad(&PostAdRequest {
            quantity: Some(dec!(0)),
            ..request()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidValue {
            field: "quantity",
            ..
        }
    ));
}

#[test]
fn rejects_inverted_limits() {
    let (_, orders) = desk();
    let result = orders.prepare_ad(&PostAdRequest {
        min_limit: Some(dec!(500000)),
        max_limit: Some(dec!(10000)),
        ..request()
    });
    assert!(result.is_err());
}

#[test]
fn requires_a_trade_type() {
    let (_, orders) = desk();
    let err = orders
        .prepare_ad(&PostAdRequest {
            trade_type: None,
            ..request()
        })
        .unwrap_err();
    assert_eq!(err, ValidationError::MissingField("trade_type"));
}

#[tokio::test]
async fn invalid_requests_never_reach_the_marketplace() {
    let (fake, orders) = desk();
    let result = orders.post_ad(&PostAdRequest::default()).await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(fake.posted().is_empty());
}

#[tokio::test]
async fn release_trims_and_forwards() {
    let (fake, orders) = desk();
    orders.release_order(Some(" 2201 ")).await.unwrap();
    assert_eq!(fake.released(), vec!["2201"]);

    let result = orders.release_order(Some("")).await;
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::MissingField("order_number")))
    ));
}
