//! `adscout leaderboard`.

use tabled::{Table, Tabled};

use super::command::LeaderboardArgs;
use super::output;
use crate::application::leaderboard::{LeaderboardRequest, LeaderboardSort};
use crate::domain::TradeType;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_state;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct TraderRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Trader")]
    nickname: String,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Orders")]
    orders: u64,
    #[tabled(rename = "Assets")]
    assets: String,
}

pub async fn execute(config: &Config, args: &LeaderboardArgs) -> Result<()> {
    let request = LeaderboardRequest {
        sort_by: args.sort_by.parse::<LeaderboardSort>()?,
        days: args.days,
        asset: args.asset.as_ref().map(|a| a.to_ascii_uppercase()),
        fiat: args.fiat.as_ref().map(|f| f.to_ascii_uppercase()),
        trade_type: args
            .trade_type
            .as_deref()
            .map(str::parse::<TradeType>)
            .transpose()?,
    };

    let state = build_state(config);
    let board = state.leaderboard.leaderboard(&request).await?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "sort_by": board.sort_by,
            "days": board.days,
            "count": board.traders.len(),
            "total_orders": board.total_orders,
            "traders": board.traders,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&format!(
        "Top traders by {} (last {} days)",
        board.sort_by, board.days
    ));
    output::field("Orders", board.total_orders);

    if board.traders.is_empty() {
        output::warning("No orders in this window");
        return Ok(());
    }

    let rows: Vec<TraderRow> = board
        .traders
        .iter()
        .enumerate()
        .map(|(i, trader)| TraderRow {
            rank: i + 1,
            nickname: trader.nickname.clone(),
            volume: trader.volume.to_string(),
            orders: trader.orders,
            assets: trader.assets.join(", "),
        })
        .collect();

    output::table(&Table::new(rows).to_string());
    Ok(())
}
