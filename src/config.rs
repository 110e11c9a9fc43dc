use std::env;
use std::path::PathBuf;

use ethers::types::Address;
use eyre::{eyre, Result, WrapErr};

pub const DEFAULT_NETWORK: &str = "sepolia";
pub const DEFAULT_LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_MARKETPLACE_ADDRESS: &str = "0x23D30d4C0bd879C94008D6F0d159Ca72835fCF00";
pub const DEFAULT_TOKEN_ADDRESS: &str = "0x0fA257C0D33045Fa6Fdc7d7f29794AfDA29988F6";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts/contracts";
pub const DEFAULT_LOG_FILE: &str = "logs/run.log";

/// Mnemonic shared by the Hardhat and Anvil dev nodes.
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

const LOCAL_NETWORKS: [&str; 3] = ["localhost", "hardhat", "anvil"];

#[derive(Debug, Clone, PartialEq)]
pub enum Credentials {
    PrivateKey(String),
    Mnemonic(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub network: String,
    pub rpc_url: String,
    pub credentials: Credentials,
    pub marketplace: Address,
    pub token: Address,
    pub artifacts_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Settings {
    /// Reads the environment, with the network chosen on the command line.
    pub fn for_network(network: &str) -> Result<Self> {
        Self::from_lookup(|key| match key {
            "NETWORK" => Some(network.to_string()),
            _ => env::var(key).ok(),
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let network = var("NETWORK").unwrap_or_else(|| DEFAULT_NETWORK.to_string());
        let local = is_local(&network);

        let rpc_url = match var("RPC_URL") {
            Some(url) => url,
            None if local => {
                var("LOCAL_RPC_URL").unwrap_or_else(|| DEFAULT_LOCAL_RPC_URL.to_string())
            }
            None => {
                let key = var("INFURA_API_KEY")
                    .ok_or_else(|| eyre!("INFURA_API_KEY must be set when RPC_URL is not"))?;
                format!("https://{}.infura.io/v3/{}", network, key)
            }
        };

        let credentials = if local {
            Credentials::Mnemonic(var("DEV_MNEMONIC").unwrap_or_else(|| DEV_MNEMONIC.to_string()))
        } else {
            Credentials::PrivateKey(var("PRIVATE_KEY").ok_or_else(|| eyre!("Missing private key"))?)
        };

        let marketplace = parse_address(
            "MARKETPLACE_ADDRESS",
            var("MARKETPLACE_ADDRESS").as_deref(),
            DEFAULT_MARKETPLACE_ADDRESS,
        )?;
        let token = parse_address("TOKEN_ADDRESS", var("TOKEN_ADDRESS").as_deref(), DEFAULT_TOKEN_ADDRESS)?;

        Ok(Settings {
            network,
            rpc_url,
            credentials,
            marketplace,
            token,
            artifacts_dir: var("ARTIFACTS_DIR")
                .unwrap_or_else(|| DEFAULT_ARTIFACTS_DIR.to_string())
                .into(),
            log_file: var("LOG_FILE")
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
                .into(),
        })
    }

    pub fn is_local(&self) -> bool {
        is_local(&self.network)
    }
}

fn is_local(network: &str) -> bool {
    LOCAL_NETWORKS.contains(&network)
}

fn parse_address(key: &str, value: Option<&str>, default: &str) -> Result<Address> {
    value
        .unwrap_or(default)
        .parse::<Address>()
        .wrap_err_with(|| format!("{} is not a valid address", key))
}
