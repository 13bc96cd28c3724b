//! Binance C2C (P2P) marketplace integration.
//!
//! [`client::BinanceC2cClient`] implements both [`AdSource`](crate::port::AdSource)
//! and [`MerchantDesk`](crate::port::MerchantDesk) over the signed SAPI
//! endpoints. Wire shapes live in [`dto`]; request signing is delegated to a
//! [`RequestSigner`](crate::port::RequestSigner) such as [`signer::HmacSigner`].

pub mod client;
pub mod dto;
pub mod settings;
pub mod signer;

pub use client::BinanceC2cClient;
pub use settings::BinanceConfig;
pub use signer::HmacSigner;
