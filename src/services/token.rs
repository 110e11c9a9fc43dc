use ethers::providers::Middleware;
use ethers::types::{Address, Bytes, TransactionReceipt, U256};
use eyre::Result;

use super::transactions::send;
use crate::TestToken;

pub async fn mint<M: Middleware + 'static>(
    token: &TestToken<M>,
    to: Address,
    id: U256,
    amount: U256,
    data: Bytes,
) -> Result<TransactionReceipt> {
    send(token.mint(to, id, amount, data)).await
}

/// Lets `operator` move every token the caller holds.
pub async fn approve<M: Middleware + 'static>(
    token: &TestToken<M>,
    operator: Address,
) -> Result<TransactionReceipt> {
    send(token.set_approval_for_all(operator, true)).await
}

pub async fn is_approved<M: Middleware + 'static>(
    token: &TestToken<M>,
    owner: Address,
    operator: Address,
) -> Result<bool> {
    Ok(token.is_approved_for_all(owner, operator).call().await?)
}

pub async fn owner<M: Middleware + 'static>(token: &TestToken<M>) -> Result<Address> {
    Ok(token.owner().call().await?)
}

pub async fn balance_of<M: Middleware + 'static>(
    token: &TestToken<M>,
    account: Address,
    id: U256,
) -> Result<U256> {
    Ok(token.balance_of(account, id).call().await?)
}
