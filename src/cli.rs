use clap::{Args, Parser, Subcommand};
use ethers::types::{Address, Bytes, U256};
use ethers::utils::parse_ether;

/// Deploys and drives the ERC-1155 marketplace contracts.
#[derive(Parser, Debug)]
#[command(version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Target network: an Infura network name, or localhost/hardhat/anvil
    /// for a local dev node.
    #[arg(long, global = true, env = "NETWORK", default_value = "sepolia")]
    pub network: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Deploys the test token, mints a batch and approves the marketplace.
    DeployToken(DeployTokenArgs),
    /// Approves the marketplace to transfer the signer's tokens.
    Approve(ApproveArgs),
    /// Lists a token lot, buys from it and walks the whole item list.
    AddToMarket(AddToMarketArgs),
    /// Full deploy, mint, list and buy flow against a local dev node.
    Market(MarketArgs),
    /// Deploys the marketplace and sets its platform fee.
    DeployMarket(DeployMarketArgs),
}

#[derive(Args, Debug)]
pub struct DeployTokenArgs {
    /// Recipient of the minted batch.
    #[arg(long, default_value = "0x416b2a7930a9c25aeceb897ccb62f057712a3b6e")]
    pub to: Address,
    #[arg(long, default_value = "1", value_parser = parse_amount)]
    pub id: U256,
    #[arg(long, default_value = "1000", value_parser = parse_amount)]
    pub amount: U256,
    #[arg(long, default_value = "0x293232", value_parser = parse_data)]
    pub data: Bytes,
    /// Operator to approve; defaults to MARKETPLACE_ADDRESS.
    #[arg(long)]
    pub marketplace: Option<Address>,
}

#[derive(Args, Debug)]
pub struct ApproveArgs {
    /// Operator to approve; defaults to MARKETPLACE_ADDRESS.
    #[arg(long)]
    pub marketplace: Option<Address>,
}

#[derive(Args, Debug)]
pub struct AddToMarketArgs {
    #[arg(long, default_value = "1", value_parser = parse_amount)]
    pub token_id: U256,
    #[arg(long, default_value = "10", value_parser = parse_amount)]
    pub amount: U256,
    #[arg(long, default_value = "Unit")]
    pub name: String,
    /// Listing price in ether.
    #[arg(long, default_value = "0.000000001", value_parser = parse_price)]
    pub price: U256,
    /// Item whose details are printed after listing.
    #[arg(long, default_value = "2", value_parser = parse_amount)]
    pub inspect: U256,
    #[arg(long, default_value = "1", value_parser = parse_amount)]
    pub buy_amount: U256,
    /// Platform fee set for every listed item.
    #[arg(long, default_value = "1", value_parser = parse_amount)]
    pub fee: U256,
}

#[derive(Args, Debug)]
pub struct MarketArgs {
    #[arg(long, default_value = "1000000000000000000", value_parser = parse_amount)]
    pub token_id: U256,
    #[arg(long, default_value = "1000000000000000000000", value_parser = parse_amount)]
    pub mint_amount: U256,
    #[arg(long, default_value = "0x293232", value_parser = parse_data)]
    pub data: Bytes,
    #[arg(long, default_value = "10", value_parser = parse_amount)]
    pub amount: U256,
    #[arg(long, default_value = "baddest Team 11")]
    pub name: String,
    /// Listing price in wei.
    #[arg(long, default_value = "1", value_parser = parse_amount)]
    pub price: U256,
    /// Ether sent with the purchase.
    #[arg(long, default_value = "100", value_parser = parse_price)]
    pub payment: U256,
}

#[derive(Args, Debug)]
pub struct DeployMarketArgs {
    /// Platform fee in ether.
    #[arg(long, default_value = "0", value_parser = parse_price)]
    pub fees: U256,
}

/// Decimal integer. `U256::from_str` would read hex.
pub fn parse_amount(value: &str) -> Result<U256, String> {
    U256::from_dec_str(value).map_err(|err| format!("invalid amount {:?}: {}", value, err))
}

/// Ether amount with up to 18 decimals, returned in wei.
pub fn parse_price(value: &str) -> Result<U256, String> {
    parse_ether(value).map_err(|err| format!("invalid ether amount {:?}: {}", value, err))
}

pub fn parse_data(value: &str) -> Result<Bytes, String> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|err| format!("invalid hex data {:?}: {}", value, err))
}
