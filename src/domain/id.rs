//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marketplace advertiser identifier - newtype for type safety.
///
/// Unique per advertiser. Unlike the nickname it never changes, so it is
/// the key used for advertiser-level exclusion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdvertiserId(String);

impl AdvertiserId {
    /// Create a new `AdvertiserId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the advertiser ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdvertiserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AdvertiserId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AdvertiserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Marketplace advertisement identifier - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdId(String);

impl AdId {
    /// Create a new `AdId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ad ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AdId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AdId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_their_inner_value() {
        assert_eq!(AdvertiserId::from("s1a2b3").to_string(), "s1a2b3");
        assert_eq!(AdId::from("1180000").as_str(), "1180000");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&AdId::from("42")).unwrap();
        assert_eq!(json, "\"42\"");
    }
}
