//! Trade direction.
//!
//! The marketplace reports every ad with the *advertiser's* side. A search for
//! `BUY` therefore returns `SELL` ads: the operator buys from advertisers who
//! sell. [`TradeType::counterparty`] maps between the two perspectives.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Direction of a trade or advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    /// Both directions, in the order they are reported.
    pub const ALL: [Self; 2] = [Self::Buy, Self::Sell];

    /// Wire representation (`BUY` / `SELL`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    /// Lowercase key used in API responses.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// The opposite side of a trade in this direction.
    #[must_use]
    pub const fn counterparty(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            _ => Err(DomainError::UnknownTradeType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("buy".parse::<TradeType>().unwrap(), TradeType::Buy);
        assert_eq!(" SELL ".parse::<TradeType>().unwrap(), TradeType::Sell);
    }

    #[test]
    fn rejects_unknown_direction() {
        let err = "HOLD".parse::<TradeType>().unwrap_err();
        assert_eq!(err, DomainError::UnknownTradeType("HOLD".into()));
    }

    #[test]
    fn counterparty_is_an_involution() {
        for side in TradeType::ALL {
            assert_eq!(side.counterparty().counterparty(), side);
            assert_ne!(side.counterparty(), side);
        }
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TradeType::Sell).unwrap(), "\"SELL\"");
    }
}
