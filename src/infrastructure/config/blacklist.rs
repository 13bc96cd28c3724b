//! Blacklist entries loaded at startup.

use serde::Deserialize;

/// Advertisers and ads excluded from the moment the process starts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlacklistConfig {
    #[serde(default)]
    pub advertisers: Vec<String>,
    #[serde(default)]
    pub ads: Vec<String>,
}
