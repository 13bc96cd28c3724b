//! CLI module graph and dispatch.

pub mod check;
pub mod command;
pub mod leaderboard;
pub mod output;
pub mod top_price;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::runtime;

use command::{Cli, Commands};

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Load the configuration named on the command line.
///
/// Without `--config`, `./config.toml` is used when it exists and the
/// built-in defaults otherwise. Returns the path actually read.
#[allow(clippy::result_large_err)]
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    match explicit {
        Some(path) => Ok((Config::load(path)?, Some(path.to_path_buf()))),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            if default.exists() {
                Ok((Config::load(&default)?, Some(default)))
            } else {
                Ok((Config::defaults()?, None))
            }
        }
    }
}

/// Run the parsed command.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(cli.json);
    let (config, path) = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::CheckConfig => {
            check::execute(&config, path.as_deref());
            Ok(())
        }
        Commands::Serve => {
            config.init_logging();
            runtime::run(config).await
        }
        Commands::TopPrice(args) => top_price::execute(&config, args.ad_type.as_deref()).await,
        Commands::Leaderboard(args) => leaderboard::execute(&config, &args).await,
    }
}
