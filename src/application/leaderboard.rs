//! Trader leaderboard built from the operator's order history.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::ad::UNKNOWN_NICKNAME;
use crate::domain::{Amount, OrderRecord, TradeType};
use crate::error::{Result, ValidationError};
use crate::port::{MerchantDesk, OrderHistoryQuery};

/// Longest history window accepted, in days.
pub const MAX_WINDOW_DAYS: u32 = 365;

/// Ranking key for the leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardSort {
    /// Total fiat value traded.
    #[default]
    Volume,
    /// Number of orders.
    Orders,
}

impl LeaderboardSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Orders => "orders",
        }
    }
}

impl fmt::Display for LeaderboardSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "volume" => Ok(Self::Volume),
            "orders" => Ok(Self::Orders),
            other => Err(ValidationError::InvalidValue {
                field: "sort_by",
                reason: format!("'{other}' is not one of: volume, orders"),
            }),
        }
    }
}

/// One trader's aggregated activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub nickname: String,
    pub volume: Amount,
    pub orders: u64,
    pub assets: Vec<String>,
}

/// Leaderboard query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRequest {
    pub sort_by: LeaderboardSort,
    pub days: u32,
    pub asset: Option<String>,
    pub fiat: Option<String>,
    pub trade_type: Option<TradeType>,
}

impl Default for LeaderboardRequest {
    fn default() -> Self {
        Self {
            sort_by: LeaderboardSort::default(),
            days: 30,
            asset: None,
            fiat: None,
            trade_type: None,
        }
    }
}

impl LeaderboardRequest {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.days == 0 || self.days > MAX_WINDOW_DAYS {
            return Err(ValidationError::InvalidValue {
                field: "days",
                reason: format!("must be between 1 and {MAX_WINDOW_DAYS}"),
            });
        }
        Ok(())
    }
}

/// Ranked leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    pub sort_by: LeaderboardSort,
    pub days: u32,
    pub total_orders: usize,
    pub traders: Vec<LeaderboardEntry>,
}

/// Aggregate orders per trader and rank them.
///
/// Orders without a usable total are skipped. Traders that tie on the sort
/// key keep the order in which they first appear.
#[must_use]
pub fn rank_traders(
    orders: &[OrderRecord],
    sort_by: LeaderboardSort,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, Amount, u64, BTreeSet<String>)> = Vec::new();

    for order in orders {
        let Some(total) = order.total_price.filter(|t| !t.is_sign_negative()) else {
            debug!(order_number = %order.order_number, "Skipping order without a valid total");
            continue;
        };
        let nickname = order
            .advertiser_nickname
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_NICKNAME);

        let slot = *index.entry(nickname).or_insert_with(|| {
            totals.push((nickname.to_string(), Decimal::ZERO, 0, BTreeSet::new()));
            totals.len() - 1
        });
        let entry = &mut totals[slot];
        entry.1 = entry.1.saturating_add(total);
        entry.2 += 1;
        if let Some(asset) = &order.asset {
            entry.3.insert(asset.clone());
        }
    }

    let mut entries: Vec<LeaderboardEntry> = totals
        .into_iter()
        .map(|(nickname, volume, orders, assets)| LeaderboardEntry {
            nickname,
            volume,
            orders,
            assets: assets.into_iter().collect(),
        })
        .collect();

    match sort_by {
        LeaderboardSort::Volume => entries.sort_by(|a, b| b.volume.cmp(&a.volume)),
        LeaderboardSort::Orders => entries.sort_by(|a, b| b.orders.cmp(&a.orders)),
    }
    entries.truncate(limit);
    entries
}

/// Builds leaderboards from the merchant account's order history.
pub struct LeaderboardService {
    desk: Arc<dyn MerchantDesk>,
    default_asset: String,
    default_fiat: String,
    size: usize,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(
        desk: Arc<dyn MerchantDesk>,
        default_asset: impl Into<String>,
        default_fiat: impl Into<String>,
        size: usize,
    ) -> Self {
        Self {
            desk,
            default_asset: default_asset.into(),
            default_fiat: default_fiat.into(),
            size,
        }
    }

    /// Fetch orders in the window and rank the traders in them.
    pub async fn leaderboard(&self, request: &LeaderboardRequest) -> Result<Leaderboard> {
        request.validate()?;

        let end = Utc::now();
        let query = OrderHistoryQuery {
            asset: request
                .asset
                .clone()
                .unwrap_or_else(|| self.default_asset.clone()),
            fiat: request
                .fiat
                .clone()
                .unwrap_or_else(|| self.default_fiat.clone()),
            trade_type: request.trade_type,
            start: end - Duration::days(i64::from(request.days)),
            end,
        };

        let orders = self.desk.list_orders(&query).await?;
        let traders = rank_traders(&orders, request.sort_by, self.size);
        info!(
            orders = orders.len(),
            traders = traders.len(),
            sort_by = %request.sort_by,
            days = request.days,
            "Leaderboard built"
        );

        Ok(Leaderboard {
            sort_by: request.sort_by,
            days: request.days,
            total_orders: orders.len(),
            traders,
        })
    }
}
