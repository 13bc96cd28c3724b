use std::io::Write;

use adscout::error::{ConfigError, Error};
use adscout::infrastructure::bootstrap::build_state_with;
use adscout::infrastructure::config::settings::Config;
use adscout::testkit::marketplace::{FakeDesk, ScriptedAdSource};
use std::sync::Arc;
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn full_config_loads() {
    let file = write_temp_config(
        r#"
[server]
host = "127.0.0.1"
port = 8080

[logging]
level = "debug"
format = "json"

[marketplace]
asset = "USDT"
fiat = "KES"
page_size = 20

[marketplace.http]
timeout_ms = 5000
retry_max_attempts = 2

[anomaly]
strategies = ["robust_zscore", "reputation"]
min_sample_size = 5

[anomaly.reputation]
min_completion_rate = 85

[criteria]
min_order_count = 20

[blacklist]
advertisers = ["s8f2a"]
ads = ["11520384"]

[orders]
allowed_pay_types = ["M-pesa"]

[repricer]
autostart = false
interval_secs = 60
"#,
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.marketplace.fiat, "KES");
    assert_eq!(config.marketplace.http.retry_max_attempts, 2);
    assert_eq!(config.anomaly.min_sample_size, 5);
    assert_eq!(config.criteria.min_order_count, Some(20));
    assert_eq!(config.orders.allowed_pay_types, vec!["M-pesa"]);
    assert!(!config.repricer.autostart);
}

#[test]
fn missing_file_is_a_read_error() {
    let result = Config::load("/nonexistent/adscout.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = write_temp_config("[server\nport = 1");
    let result = Config::load(file.path());
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn oversized_page_is_rejected() {
    let file = write_temp_config("[marketplace]\npage_size = 50\n");
    let result = Config::load(file.path());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue { .. }))
    ));
}

#[test]
fn inverted_criteria_are_rejected() {
    let file = write_temp_config("[criteria]\nmin_limit = 5000\nmax_limit = 10\n");
    let result = Config::load(file.path());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "criteria",
            ..
        }))
    ));
}

#[test]
fn empty_pay_type_list_is_rejected() {
    let file = write_temp_config("[orders]\nallowed_pay_types = []\n");
    let result = Config::load(file.path());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField {
            field: "orders.allowed_pay_types"
        }))
    ));
}

#[test]
fn seeded_blacklist_reaches_the_services() {
    let file = write_temp_config("[blacklist]\nadvertisers = [\"bot-1\", \" \"]\nads = [\"42\"]\n");
    let config = Config::load(file.path()).unwrap();

    let state = build_state_with(
        &config,
        Arc::new(ScriptedAdSource::new()),
        Arc::new(FakeDesk::new()),
    );

    let snapshot = state.blacklist.snapshot();
    assert_eq!(snapshot.advertisers(), vec!["bot-1"]);
    assert_eq!(snapshot.ads(), vec!["42"]);
}
