//! Adscout - top-price scouting and ad management for C2C marketplaces.
//!
//! Given a page of advertisements for one trade direction, the crate removes
//! blacklisted advertisers and ads, applies operator criteria, screens out
//! statistical outliers and low-reputation bots, and picks the best price:
//! the lowest ask when the operator buys, the highest bid when the operator
//! sells.
//!
//! # Architecture
//!
//! - **`domain`** - Marketplace-agnostic records: ads, orders, trade direction
//! - **`port`** - Traits for the marketplace (`AdSource`, `MerchantDesk`) and
//!   request signing
//! - **`application`** - Blacklist, criteria, anomaly screening, selection,
//!   leaderboard, order desk and the background repricer
//! - **`adapter`** - Binance C2C client (outbound), HTTP API and CLI (inbound)
//! - **`infrastructure`** - Configuration, wiring and server lifecycle
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use adscout::application::{AnomalyFilter, BlacklistStore, CriteriaStore, PriceSelector};
//! use adscout::domain::TradeType;
//!
//! let blacklist = Arc::new(BlacklistStore::new());
//! let criteria = Arc::new(CriteriaStore::default());
//! let selector = PriceSelector::new(blacklist, criteria, AnomalyFilter::default());
//!
//! let best = selector.select_best(&[], TradeType::Buy);
//! assert!(best.is_none());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
