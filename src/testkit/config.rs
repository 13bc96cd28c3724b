//! Canonical test configurations.

use crate::infrastructure::config::settings::Config;

/// Default configuration with anomaly screening switched off, so tests can
/// reason about small hand-built batches.
///
/// # Panics
///
/// Panics if the built-in defaults fail validation.
pub fn plain() -> Config {
    let mut config: Config = toml::from_str("").expect("empty config parses");
    config.anomaly.enabled = false;
    config
}

/// Default configuration, anomaly screening included.
///
/// # Panics
///
/// Panics if the built-in defaults fail validation.
pub fn screened() -> Config {
    toml::from_str("").expect("empty config parses")
}
