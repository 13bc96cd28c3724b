//! `adscout check-config`.

use std::path::Path;

use super::output;
use crate::application::AnomalyFilter;
use crate::infrastructure::config::settings::Config;

/// Report the effective configuration. Loading has already validated it.
pub fn execute(config: &Config, path: Option<&Path>) {
    if output::is_json() {
        output::json_output(serde_json::json!({
            "command": "check-config",
            "config": path.map(|p| p.display().to_string()),
            "valid": true,
            "marketplace": config.marketplace.api_url,
            "asset": config.marketplace.asset,
            "fiat": config.marketplace.fiat,
            "listen": format!("{}:{}", config.server.host, config.server.port),
            "anomaly_strategies": AnomalyFilter::from_config(&config.anomaly).strategy_names(),
            "credentials": config.credentials.is_complete(),
        }));
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Configuration Check");
    match path {
        Some(path) => output::field("Config", path.display()),
        None => output::field("Config", "built-in defaults"),
    }
    output::success("Configuration is valid");

    output::section("Summary");
    output::field("Marketplace", &config.marketplace.api_url);
    output::field(
        "Pair",
        format!("{}/{}", config.marketplace.asset, config.marketplace.fiat),
    );
    output::field("Page size", config.marketplace.page_size);
    output::field(
        "Listen",
        format!("{}:{}", config.server.host, config.server.port),
    );
    output::field(
        "Anomaly",
        format!(
            "{:?}",
            AnomalyFilter::from_config(&config.anomaly).strategy_names()
        ),
    );
    output::field(
        "Blacklist",
        format!(
            "{} advertisers, {} ads",
            config.blacklist.advertisers.len(),
            config.blacklist.ads.len()
        ),
    );
    output::field(
        "Repricer",
        if config.repricer.autostart {
            format!("autostart every {}s", config.repricer.interval_secs)
        } else {
            "manual".to_string()
        },
    );

    if config.credentials.is_complete() {
        output::success("API credentials detected");
    } else {
        output::warning(
            "API credentials not configured (set ADSCOUT_API_KEY and ADSCOUT_API_SECRET)",
        );
    }
}
