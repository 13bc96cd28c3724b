//! Builders for domain records used across tests.

use rust_decimal::Decimal;

use crate::domain::{AdId, AdRecord, OrderRecord, OwnAd, TradeType};

/// A SELL-side ad (what an operator buying sees) with id `ad-{advertiser}`.
pub fn sell_ad(advertiser: &str, price: Decimal) -> AdRecord {
    ad(advertiser, price, TradeType::Sell)
}

/// A BUY-side ad (what an operator selling sees) with id `ad-{advertiser}`.
pub fn buy_ad(advertiser: &str, price: Decimal) -> AdRecord {
    ad(advertiser, price, TradeType::Buy)
}

/// An ad whose nickname equals the advertiser id.
///
/// # Panics
///
/// Panics on a non-positive price.
pub fn ad(advertiser: &str, price: Decimal, side: TradeType) -> AdRecord {
    AdRecord::try_new(format!("ad-{advertiser}"), advertiser, price, side)
        .expect("test ad must have a positive price")
        .with_nickname(advertiser)
}

/// `n` SELL-side ads clustered tightly around `center`.
pub fn sell_cluster(center: Decimal, n: usize) -> Vec<AdRecord> {
    (0..n)
        .map(|i| {
            let offset = Decimal::from(i as u64);
            sell_ad(&format!("m{i}"), center + offset)
        })
        .collect()
}

/// A completed order.
pub fn order(nickname: Option<&str>, total: Option<Decimal>, asset: &str) -> OrderRecord {
    OrderRecord {
        order_number: format!("o-{}", nickname.unwrap_or("anon")),
        advertiser_nickname: nickname.map(str::to_string),
        asset: Some(asset.to_string()),
        trade_type: Some(TradeType::Buy),
        total_price: total,
    }
}

/// One of the operator's ads, ONLINE, quoted in USDT/TZS.
pub fn own_ad(id: &str, side: TradeType, price: Decimal) -> OwnAd {
    OwnAd {
        ad_id: AdId::from(id),
        asset: "USDT".into(),
        fiat: "TZS".into(),
        trade_type: side,
        price,
        status: "ONLINE".into(),
    }
}
