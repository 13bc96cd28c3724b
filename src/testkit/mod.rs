//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for ads, orders and own ads.
//! - [`marketplace`] - Scripted [`AdSource`](crate::port::AdSource) and
//!   [`MerchantDesk`](crate::port::MerchantDesk) fakes.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod marketplace;
