//! Request signing port.
//!
//! Marketplace adapters treat authentication as a black box: they hand the
//! encoded query string to a [`RequestSigner`] and append whatever signature
//! it returns.

use crate::error::UpstreamError;

/// Produces the credentials attached to authenticated marketplace requests.
pub trait RequestSigner: Send + Sync {
    /// API key sent alongside every signed request.
    fn api_key(&self) -> &str;

    /// Signature over the exact payload that will be sent.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::MissingCredentials`] when the signer has no
    /// usable secret.
    fn sign(&self, payload: &str) -> Result<String, UpstreamError>;
}
