use ethers::abi::Detokenize;
use ethers::contract::ContractCall;
use ethers::providers::Middleware;
use ethers::types::{TransactionReceipt, H256};
use eyre::{eyre, Result};

/// Sends a state-changing call and waits for it to be mined.
pub async fn send<M, D>(call: ContractCall<M, D>) -> Result<TransactionReceipt>
where
    M: Middleware + 'static,
    D: Detokenize,
{
    let pending = call.send().await?;
    let tx_hash = *pending;

    confirmed(tx_hash, pending.await?)
}

/// A transaction that resolved without a receipt never made it into a block.
pub fn confirmed(tx_hash: H256, receipt: Option<TransactionReceipt>) -> Result<TransactionReceipt> {
    receipt.ok_or_else(|| eyre!("transaction {:?} was dropped from the mempool", tx_hash))
}

pub fn block_hash(receipt: &TransactionReceipt) -> String {
    hash_or_pending(receipt.block_hash)
}

pub fn hash_or_pending(hash: Option<H256>) -> String {
    match hash {
        Some(hash) => format!("{:?}", hash),
        None => "pending".to_string(),
    }
}
