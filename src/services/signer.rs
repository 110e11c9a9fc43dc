use std::sync::Arc;

use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{coins_bip39::English, LocalWallet, MnemonicBuilder, Signer};
use ethers::types::U256;
use eyre::{Result, WrapErr};

use crate::config::{Credentials, Settings};

pub type Client = SignerMiddleware<Provider<Http>, LocalWallet>;

pub fn connect(settings: &Settings) -> Result<Provider<Http>> {
    Provider::<Http>::try_from(settings.rpc_url.as_str())
        .wrap_err_with(|| format!("invalid rpc url for network {}", settings.network))
}

/// Wallets for the configured credentials.
///
/// A private key always yields a single wallet; a mnemonic yields `count`
/// wallets derived at indexes `0..count`.
pub fn wallets(credentials: &Credentials, count: usize) -> Result<Vec<LocalWallet>> {
    match credentials {
        Credentials::PrivateKey(key) => {
            let key = key.trim();
            let key = key.strip_prefix("0x").unwrap_or(key);
            let wallet = key
                .parse::<LocalWallet>()
                .wrap_err("PRIVATE_KEY is not a valid secp256k1 key")?;
            Ok(vec![wallet])
        }
        Credentials::Mnemonic(phrase) => (0..count)
            .map(|index| -> Result<LocalWallet> {
                let wallet = MnemonicBuilder::<English>::default()
                    .phrase(phrase.as_str())
                    .index(index as u32)?
                    .build()?;
                Ok(wallet)
            })
            .collect(),
    }
}

/// Signing clients bound to the chain behind the configured endpoint.
pub async fn signers(settings: &Settings, count: usize) -> Result<Vec<Arc<Client>>> {
    let provider = connect(settings)?;
    let chain_id = provider.get_chainid().await?.as_u64();

    let clients = wallets(&settings.credentials, count)?
        .into_iter()
        .map(|wallet| {
            Arc::new(SignerMiddleware::new(
                provider.clone(),
                wallet.with_chain_id(chain_id),
            ))
        })
        .collect();

    Ok(clients)
}

pub async fn primary_signer(settings: &Settings) -> Result<Arc<Client>> {
    signers(settings, 1)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("no signer configured"))
}

pub async fn wallet_balance(client: &Client) -> Result<U256> {
    Ok(client.get_balance(client.address(), None).await?)
}
