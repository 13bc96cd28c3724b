//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                 ┌───────────────────────────┐
//!   HTTP / CLI ──▶│  Application (selection)  │──▶ AdSource ──▶ marketplace
//!                 │  Domain + Port            │──▶ MerchantDesk
//!                 └───────────────────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`AdSource`] - Ad search for one trade direction
//! - [`MerchantDesk`] - Authenticated account operations
//! - [`RequestSigner`] - Signature capability consumed by adapters

pub mod outbound;

pub use outbound::marketplace::{AdSource, MerchantDesk, OrderHistoryQuery};
pub use outbound::signer::RequestSigner;
