//! Blacklist of excluded advertisers and ads.
//!
//! The store is shared by every selection call and mutated only by explicit
//! administrative operations. Writers build a new [`Blacklist`] and swap it in
//! under the write lock; readers clone the current `Arc`, so a selection call
//! always works against one complete snapshot.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{AdId, AdRecord, AdvertiserId};
use crate::error::ValidationError;

/// Which identifier space a blacklist entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlacklistKind {
    Advertiser,
    Ad,
}

impl BlacklistKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Advertiser => "advertiser",
            Self::Ad => "ad",
        }
    }
}

impl fmt::Display for BlacklistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlacklistKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advertiser" => Ok(Self::Advertiser),
            "ad" => Ok(Self::Ad),
            other => Err(ValidationError::InvalidValue {
                field: "kind",
                reason: format!("'{other}' is not one of: advertiser, ad"),
            }),
        }
    }
}

/// Immutable set of excluded identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    advertisers: HashSet<AdvertiserId>,
    ads: HashSet<AdId>,
}

impl Blacklist {
    /// True if either the ad or its advertiser is excluded.
    #[must_use]
    pub fn is_excluded(&self, ad: &AdRecord) -> bool {
        self.advertisers.contains(ad.advertiser_id()) || self.ads.contains(ad.ad_id())
    }

    #[must_use]
    pub fn contains(&self, kind: BlacklistKind, identifier: &str) -> bool {
        match kind {
            BlacklistKind::Advertiser => self.advertisers.contains(&AdvertiserId::from(identifier)),
            BlacklistKind::Ad => self.ads.contains(&AdId::from(identifier)),
        }
    }

    #[must_use]
    pub fn advertiser_count(&self) -> usize {
        self.advertisers.len()
    }

    #[must_use]
    pub fn ad_count(&self) -> usize {
        self.ads.len()
    }

    /// Excluded advertiser ids, sorted.
    #[must_use]
    pub fn advertisers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.advertisers.iter().map(ToString::to_string).collect();
        ids.sort();
        ids
    }

    /// Excluded ad ids, sorted.
    #[must_use]
    pub fn ads(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ads.iter().map(ToString::to_string).collect();
        ids.sort();
        ids
    }

    fn insert(&mut self, kind: BlacklistKind, identifier: &str) -> bool {
        match kind {
            BlacklistKind::Advertiser => self.advertisers.insert(AdvertiserId::from(identifier)),
            BlacklistKind::Ad => self.ads.insert(AdId::from(identifier)),
        }
    }

    fn remove(&mut self, kind: BlacklistKind, identifier: &str) -> bool {
        match kind {
            BlacklistKind::Advertiser => self.advertisers.remove(&AdvertiserId::from(identifier)),
            BlacklistKind::Ad => self.ads.remove(&AdId::from(identifier)),
        }
    }
}

/// Concurrent copy-on-write blacklist.
#[derive(Debug, Default)]
pub struct BlacklistStore {
    current: RwLock<Arc<Blacklist>>,
}

impl BlacklistStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries (e.g. from configuration).
    pub fn with_entries<A, D>(advertisers: A, ads: D) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        let mut blacklist = Blacklist::default();
        for id in advertisers {
            if let Some(id) = normalize(id.as_ref()) {
                blacklist.insert(BlacklistKind::Advertiser, id);
            }
        }
        for id in ads {
            if let Some(id) = normalize(id.as_ref()) {
                blacklist.insert(BlacklistKind::Ad, id);
            }
        }
        Self {
            current: RwLock::new(Arc::new(blacklist)),
        }
    }

    /// Current consistent view of the blacklist.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Blacklist> {
        Arc::clone(&self.current.read())
    }

    /// True if the ad or its advertiser is currently excluded.
    #[must_use]
    pub fn is_excluded(&self, ad: &AdRecord) -> bool {
        self.snapshot().is_excluded(ad)
    }

    /// Exclude an identifier. Returns `false` when it was already present
    /// (or blank); that is not an error.
    pub fn add(&self, kind: BlacklistKind, identifier: &str) -> bool {
        let Some(identifier) = normalize(identifier) else {
            return false;
        };
        let mut guard = self.current.write();
        if guard.contains(kind, identifier) {
            return false;
        }
        let mut next = Blacklist::clone(&guard);
        next.insert(kind, identifier);
        *guard = Arc::new(next);
        info!(kind = %kind, identifier, "Added to blacklist");
        true
    }

    /// Lift an exclusion. Returns `false` when it was not present.
    pub fn remove(&self, kind: BlacklistKind, identifier: &str) -> bool {
        let Some(identifier) = normalize(identifier) else {
            return false;
        };
        let mut guard = self.current.write();
        if !guard.contains(kind, identifier) {
            return false;
        }
        let mut next = Blacklist::clone(&guard);
        next.remove(kind, identifier);
        *guard = Arc::new(next);
        info!(kind = %kind, identifier, "Removed from blacklist");
        true
    }
}

fn normalize(identifier: &str) -> Option<&str> {
    let trimmed = identifier.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
