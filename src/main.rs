use anyhow::Context;
use clap::Parser;

use adscout::adapter::inbound::cli::command::{Cli, Commands};
use adscout::adapter::inbound::cli::{execute, output};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let name = match &cli.command {
        Commands::Serve => "serve",
        Commands::TopPrice(_) => "top-price",
        Commands::Leaderboard(_) => "leaderboard",
        Commands::CheckConfig => "check-config",
    };
    execute(cli).await.with_context(|| format!("{name} failed"))
}
