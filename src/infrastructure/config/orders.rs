//! Order desk and leaderboard configuration.

use serde::Deserialize;

/// Settings for posting ads and building leaderboards.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersConfig {
    /// Payment methods an ad may be posted with. Also the default set.
    #[serde(default = "default_allowed_pay_types")]
    pub allowed_pay_types: Vec<String>,
    /// Traders kept on the leaderboard.
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
}

fn default_allowed_pay_types() -> Vec<String> {
    vec!["M-pesa".into(), "Tigo Pesa".into()]
}

const fn default_leaderboard_size() -> usize {
    30
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            allowed_pay_types: default_allowed_pay_types(),
            leaderboard_size: default_leaderboard_size(),
        }
    }
}
