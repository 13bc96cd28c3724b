use adscout::domain::{AdRecord, SelectionResult};
use rust_decimal::Decimal;

pub fn assert_best(result: &SelectionResult, price: Decimal, nickname: &str) {
    let best = result
        .as_ref()
        .unwrap_or_else(|| panic!("expected {nickname} at {price}, got no ad"));
    assert_eq!(best.price, price, "price of best ad");
    assert_eq!(best.nickname, nickname, "nickname of best ad");
}

pub fn ids(ads: &[AdRecord]) -> Vec<&str> {
    ads.iter().map(|ad| ad.ad_id().as_str()).collect()
}
