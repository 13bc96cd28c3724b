//! Marketplace API credentials.
//!
//! Never read from the config file. Loaded from `ADSCOUT_API_KEY` /
//! `ADSCOUT_API_SECRET`, falling back to `API_KEY` / `API_SECRET`.

use std::fmt;

/// API key pair used to sign marketplace requests.
#[derive(Clone, Default)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: env_first(&["ADSCOUT_API_KEY", "API_KEY"]),
            api_secret: env_first(&["ADSCOUT_API_SECRET", "API_SECRET"]),
        }
    }

    /// True when both halves are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn env_first(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
