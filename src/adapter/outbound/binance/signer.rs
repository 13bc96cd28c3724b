//! HMAC-SHA256 request signer for the Binance SAPI.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::UpstreamError;
use crate::port::RequestSigner;

type HmacSha256 = Hmac<Sha256>;

/// Signs query strings with the account's API secret.
pub struct HmacSigner {
    api_key: String,
    api_secret: String,
}

impl HmacSigner {
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// True when both the key and the secret are non-empty.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.api_secret.trim().is_empty()
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<set>" })
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl RequestSigner for HmacSigner {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn sign(&self, payload: &str) -> Result<String, UpstreamError> {
        if !self.has_credentials() {
            return Err(UpstreamError::MissingCredentials);
        }
        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .map_err(|_| UpstreamError::MissingCredentials)?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}
