//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors when a marketplace
//! record violates a domain invariant. They are per-record: callers drop the
//! offending record and keep processing the rest of the batch.
//!
//! # Examples
//!
//! ```
//! use adscout::domain::ad::AdRecord;
//! use adscout::domain::error::DomainError;
//! use adscout::domain::trade::TradeType;
//! use rust_decimal_macros::dec;
//!
//! let result = AdRecord::try_new("ad-1", "user-1", dec!(0), TradeType::Sell);
//! assert!(matches!(result, Err(DomainError::NonPositivePrice { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Ad prices must be strictly positive.
    #[error("price must be positive, got {price}")]
    NonPositivePrice {
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
    },

    /// A marketplace record could not be turned into a domain value.
    #[error("malformed ad {ad_id}: {reason}")]
    MalformedAd {
        /// Identifier of the offending ad, or `"<unknown>"`.
        ad_id: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Identifiers must not be empty.
    #[error("{field} cannot be empty")]
    EmptyIdentifier {
        /// The identifier field that was empty.
        field: &'static str,
    },

    /// Unknown trade direction string.
    #[error("unknown trade type '{0}', expected BUY or SELL")]
    UnknownTradeType(String),
}
