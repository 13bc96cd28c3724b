//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the marketplace dependencies: ad search, the
//! authenticated merchant account, and request signing.

pub mod marketplace;
pub mod signer;
