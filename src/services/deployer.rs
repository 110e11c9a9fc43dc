use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ethers::contract::ContractFactory;
use ethers::providers::Middleware;
use ethers::types::{Address, TransactionReceipt, H256};
use eyre::{eyre, Result, WrapErr};

use crate::models::Artifact;

pub const MARKETPLACE_ARTIFACT: &str = "Marketplace";
pub const TOKEN_ARTIFACT: &str = "TestSHIT";

pub struct Deployment {
    pub address: Address,
    pub tx_hash: H256,
    pub receipt: TransactionReceipt,
}

/// `<dir>/<name>.sol/<name>.json`, the path Hardhat compiles a contract to.
pub fn artifact_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.sol", name)).join(format!("{}.json", name))
}

pub fn load_artifact(dir: &Path, name: &str) -> Result<Artifact> {
    let path = artifact_path(dir, name);
    let file = File::open(&path)
        .wrap_err_with(|| format!("cannot open artifact {}", path.display()))?;

    let artifact: Artifact = serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("malformed artifact {}", path.display()))?;

    if artifact.bytecode.is_empty() {
        return Err(eyre!("artifact {} carries no creation bytecode", path.display()));
    }

    Ok(artifact)
}

/// Sends the creation transaction and waits for the contract to be mined.
pub async fn deploy<M: Middleware + 'static>(artifact: Artifact, client: Arc<M>) -> Result<Deployment> {
    let factory = ContractFactory::new(artifact.abi, artifact.bytecode, client);
    let (contract, receipt) = factory.deploy(())?.send_with_receipt().await?;

    Ok(Deployment {
        address: contract.address(),
        tx_hash: receipt.transaction_hash,
        receipt,
    })
}
