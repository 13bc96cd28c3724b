//! Application services (use cases).
//!
//! These services combine the domain rules with the marketplace ports:
//! top-price selection, leaderboard aggregation, order management and the
//! background repricer.

pub mod anomaly;
pub mod blacklist;
pub mod criteria;
pub mod leaderboard;
pub mod orders;
pub mod repricer;
pub mod selector;
pub mod top_price;

pub use anomaly::AnomalyFilter;
pub use blacklist::{BlacklistKind, BlacklistStore};
pub use criteria::{AdCriteria, CriteriaStore, CriteriaUpdate};
pub use leaderboard::{LeaderboardService, LeaderboardSort};
pub use orders::{OrderDesk, PostAdRequest};
pub use repricer::{Repricer, RepricerSettings};
pub use selector::PriceSelector;
pub use top_price::TopPriceService;
