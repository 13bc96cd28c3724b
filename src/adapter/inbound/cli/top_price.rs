//! `adscout top-price`.

use tabled::{Table, Tabled};

use super::output;
use crate::adapter::inbound::http::top_price::render;
use crate::domain::TradeType;
use crate::error::{Result, ValidationError};
use crate::infrastructure::bootstrap::build_state;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct PriceRow {
    #[tabled(rename = "Direction")]
    direction: &'static str,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Advertiser")]
    nickname: String,
    #[tabled(rename = "Ad")]
    ad_id: String,
}

pub async fn execute(config: &Config, ad_type: Option<&str>) -> Result<()> {
    let requested = match ad_type.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(raw.parse::<TradeType>().map_err(|_| {
            ValidationError::InvalidValue {
                field: "ad_type",
                reason: format!("'{raw}' is not one of: BUY, SELL"),
            }
        })?),
        None => None,
    };

    let state = build_state(config);
    let prices = state.top_prices.get_top_prices(requested).await?;

    if output::is_json() {
        output::json_output(render(&prices));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&format!(
        "Top prices {}/{}",
        config.marketplace.asset, config.marketplace.fiat
    ));

    let rows: Vec<PriceRow> = prices
        .iter()
        .map(|(side, result)| match result {
            Some(best) => PriceRow {
                direction: side.as_str(),
                price: best.price.to_string(),
                nickname: best.nickname.clone(),
                ad_id: best.ad_id.to_string(),
            },
            None => PriceRow {
                direction: side.as_str(),
                price: "-".into(),
                nickname: "no eligible ad".into(),
                ad_id: "-".into(),
            },
        })
        .collect();

    output::table(&Table::new(rows).to_string());
    Ok(())
}
