//! HTTP API (axum).
//!
//! Thin handlers over the application services. Every error body has the
//! shape `{"error": message}`; see [`error::ApiError`] for status mapping.

pub mod blacklist;
pub mod error;
pub mod filter;
pub mod leaderboard;
pub mod logging;
pub mod orders;
pub mod repricer;
pub mod top_price;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::application::{
    BlacklistStore, CriteriaStore, LeaderboardService, OrderDesk, Repricer, TopPriceService,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub top_prices: Arc<TopPriceService>,
    pub leaderboard: Arc<LeaderboardService>,
    pub orders: Arc<OrderDesk>,
    pub blacklist: Arc<BlacklistStore>,
    pub criteria: Arc<CriteriaStore>,
    pub repricer: Arc<Repricer>,
}

/// Build the API router.
pub fn router(state: ApiState, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/top-price", get(top_price::top_price))
        .route("/api/post-ad", post(orders::post_ad))
        .route("/api/release-order", post(orders::release_order))
        .route("/api/leaderboard", get(leaderboard::leaderboard))
        .route("/api/blacklist/list", get(blacklist::list))
        .route("/api/blacklist/ban-advertiser", post(blacklist::ban_advertiser))
        .route("/api/blacklist/unban-advertiser", post(blacklist::unban_advertiser))
        .route("/api/blacklist/ban-ad", post(blacklist::ban_ad))
        .route("/api/blacklist/unban-ad", post(blacklist::unban_ad))
        .route("/api/filter/get-limits", get(filter::get_limits))
        .route("/api/filter/set-limits", post(filter::set_limits))
        .route("/api/price-updater/status", get(repricer::status))
        .route("/api/price-updater/start", post(repricer::start))
        .route("/api/price-updater/stop", post(repricer::stop))
        .layer(middleware::from_fn(logging::request_logging))
        .with_state(state);

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
