use clap::Parser;
use ethers::prelude::abigen;
use eyre::Result;

mod cli;
mod config;
mod models;

mod services {
    pub mod deployer;
    pub mod logging;
    pub mod market;
    pub mod scripts;
    pub mod signer;
    pub mod token;
    pub mod transactions;
}

use cli::{Cli, Command};
use config::Settings;
use services::logging::logger;
use services::scripts::flows;

abigen!(Marketplace, "src/data/marketplace.json");
abigen!(TestToken, "src/data/test_token.json");

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::for_network(&cli.network)?;

    logger::init(&settings.log_file)?;

    match &cli.command {
        Command::DeployToken(args) => {
            flows::deploy_token(&settings, args).await?;
        }
        Command::Approve(args) => flows::approve(&settings, args).await?,
        Command::AddToMarket(args) => flows::add_to_market(&settings, args).await?,
        Command::Market(args) => {
            flows::local_market(&settings, args).await?;
        }
        Command::DeployMarket(args) => {
            flows::deploy_market(&settings, args).await?;
        }
    }

    Ok(())
}
