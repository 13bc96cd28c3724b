//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-price scouting and ad management for C2C marketplaces
#[derive(Parser, Debug)]
#[command(name = "adscout")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API (and the repricer, when enabled)
    Serve,

    /// Print the best eligible price per direction
    TopPrice(TopPriceArgs),

    /// Rank traders from the account's order history
    Leaderboard(LeaderboardArgs),

    /// Validate the configuration without contacting the marketplace
    CheckConfig,
}

#[derive(Parser, Debug)]
pub struct TopPriceArgs {
    /// BUY or SELL; both when omitted
    #[arg(long)]
    pub ad_type: Option<String>,
}

#[derive(Parser, Debug)]
pub struct LeaderboardArgs {
    /// Ranking key [volume, orders]
    #[arg(long, default_value = "volume")]
    pub sort_by: String,

    /// History window in days
    #[arg(long, default_value_t = 30)]
    pub days: u32,

    /// Asset (defaults to the configured one)
    #[arg(long)]
    pub asset: Option<String>,

    /// Fiat (defaults to the configured one)
    #[arg(long)]
    pub fiat: Option<String>,

    /// Restrict to BUY or SELL orders
    #[arg(long)]
    pub trade_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_top_price_with_direction() {
        let cli = Cli::parse_from(["adscout", "top-price", "--ad-type", "SELL"]);
        match cli.command {
            Commands::TopPrice(args) => assert_eq!(args.ad_type.as_deref(), Some("SELL")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn leaderboard_defaults() {
        let cli = Cli::parse_from(["adscout", "leaderboard"]);
        match cli.command {
            Commands::Leaderboard(args) => {
                assert_eq!(args.sort_by, "volume");
                assert_eq!(args.days, 30);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::parse_from(["adscout", "check-config", "--config", "alt.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert!(matches!(cli.command, Commands::CheckConfig));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
