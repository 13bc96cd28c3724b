use std::sync::Arc;

use adscout::application::{AnomalyFilter, BlacklistStore, CriteriaStore, PriceSelector};
use adscout::application::TopPriceService;
use adscout::domain::TradeType;
use adscout::error::UpstreamError;
use adscout::testkit::domain::{buy_ad, sell_ad};
use adscout::testkit::marketplace::ScriptedAdSource;
use rust_decimal_macros::dec;

fn service(source: Arc<ScriptedAdSource>, blacklist: Arc<BlacklistStore>) -> TopPriceService {
    let selector = PriceSelector::new(
        blacklist,
        Arc::new(CriteriaStore::default()),
        AnomalyFilter::passthrough(),
    );
    TopPriceService::new(source, Arc::new(selector), 10)
}

fn two_sided_source() -> ScriptedAdSource {
    ScriptedAdSource::new()
        .with_ads(
            TradeType::Buy,
            vec![sell_ad("Asker", dec!(2960)), sell_ad("Cheap", dec!(2955))],
        )
        .with_ads(
            TradeType::Sell,
            vec![buy_ad("Bidder", dec!(2940)), buy_ad("Generous", dec!(2945))],
        )
}

#[tokio::test]
async fn no_direction_populates_both_keys() {
    let source = Arc::new(two_sided_source());
    let prices = service(source.clone(), Arc::new(BlacklistStore::new()))
        .get_top_prices(None)
        .await
        .unwrap();

    assert_eq!(prices.len(), 2);
    let buy = prices.get(TradeType::Buy).unwrap().as_ref().unwrap();
    assert_eq!((buy.price, buy.nickname.as_str()), (dec!(2955), "Cheap"));
    let sell = prices.get(TradeType::Sell).unwrap().as_ref().unwrap();
    assert_eq!((sell.price, sell.nickname.as_str()), (dec!(2945), "Generous"));
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn single_direction_fetches_once() {
    let source = Arc::new(two_sided_source());
    let prices = service(source.clone(), Arc::new(BlacklistStore::new()))
        .get_top_prices(Some(TradeType::Sell))
        .await
        .unwrap();

    assert!(prices.contains(TradeType::Sell));
    assert!(!prices.contains(TradeType::Buy));

    let fetches = source.fetches();
    assert_eq!(fetches.len(), 1);
    assert_eq!(fetches[0].trade_type, TradeType::Sell);
    assert_eq!(fetches[0].page, 1);
    assert_eq!(fetches[0].page_size, 10);
}

#[tokio::test]
async fn empty_direction_is_none_not_missing() {
    let source = Arc::new(ScriptedAdSource::new().with_ads(TradeType::Buy, Vec::new()));
    let prices = service(source, Arc::new(BlacklistStore::new()))
        .get_top_prices(Some(TradeType::Buy))
        .await
        .unwrap();

    assert_eq!(prices.get(TradeType::Buy), Some(&None));
}

#[tokio::test]
async fn failed_direction_fails_the_whole_call() {
    let error = UpstreamError::Status {
        endpoint: "/sapi/v1/c2c/ads/search".into(),
        status: 503,
        message: "Service unavailable".into(),
    };
    let source = Arc::new(
        ScriptedAdSource::new()
            .with_ads(TradeType::Buy, vec![sell_ad("Asker", dec!(2960))])
            .with_failure(TradeType::Sell, error.clone()),
    );

    let result = service(source, Arc::new(BlacklistStore::new()))
        .get_top_prices(None)
        .await;

    assert_eq!(result.unwrap_err(), error);
}

#[tokio::test]
async fn blacklist_changes_are_seen_by_later_calls() {
    let source = Arc::new(two_sided_source());
    let blacklist = Arc::new(BlacklistStore::new());
    let service = service(source, blacklist.clone());

    let before = service.top_price(TradeType::Buy).await.unwrap().unwrap();
    assert_eq!(before.nickname, "Cheap");

    blacklist.add(adscout::application::BlacklistKind::Advertiser, "Cheap");
    let after = service.top_price(TradeType::Buy).await.unwrap().unwrap();
    assert_eq!(after.nickname, "Asker");
}
