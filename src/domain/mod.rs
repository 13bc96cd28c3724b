//! Marketplace-agnostic domain types.
//!
//! Nothing in here performs I/O. Marketplace adapters translate their wire
//! formats into these types and the application layer operates on them.

pub mod ad;
pub mod error;
pub mod id;
pub mod money;
pub mod order;
pub mod selection;
pub mod trade;

pub use ad::AdRecord;
pub use error::DomainError;
pub use id::{AdId, AdvertiserId};
pub use money::{Amount, Price};
pub use order::{NewAd, OrderRecord, OwnAd};
pub use selection::{BestAd, SelectionResult, TopPrices};
pub use trade::TradeType;
