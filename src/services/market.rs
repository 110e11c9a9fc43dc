use std::ops::RangeInclusive;

use ethers::providers::Middleware;
use ethers::types::{TransactionReceipt, U256};
use eyre::{bail, Result};
use futures::stream::{self, StreamExt, TryStreamExt};

use super::transactions::send;
use crate::models::{Item, Listing};
use crate::Marketplace;

pub async fn add_item<M: Middleware + 'static>(
    market: &Marketplace<M>,
    listing: &Listing,
) -> Result<TransactionReceipt> {
    send(market.add_item(
        listing.nft_contract,
        listing.token_id,
        listing.amount,
        listing.name.clone(),
        listing.price,
    ))
    .await
}

/// Buys `amount` units of an item, attaching `value` wei as payment.
pub async fn buy_item<M: Middleware + 'static>(
    market: &Marketplace<M>,
    item_id: U256,
    amount: U256,
    value: U256,
) -> Result<TransactionReceipt> {
    send(market.buy_item(item_id, amount).value(value)).await
}

pub async fn item<M: Middleware + 'static>(market: &Marketplace<M>, item_id: U256) -> Result<Item> {
    Ok(Item::from(market.items(item_id).call().await?))
}

pub async fn item_count<M: Middleware + 'static>(market: &Marketplace<M>) -> Result<U256> {
    Ok(market.item_count().call().await?)
}

/// Ids `1..=count`. A count past `u64::MAX` is rejected, not truncated.
pub fn item_ids(count: U256) -> Result<RangeInclusive<u64>> {
    if count > U256::from(u64::MAX) {
        bail!("item count {} does not fit in 64 bits", count);
    }
    Ok(1..=count.low_u64())
}

/// Reads items `1..=itemCount`, one call at a time.
pub async fn list_items<M: Middleware + 'static>(market: &Marketplace<M>) -> Result<Vec<Item>> {
    let ids = item_ids(item_count(market).await?)?;

    stream::iter(ids)
        .then(|i| item(market, U256::from(i)))
        .try_collect::<Vec<Item>>()
        .await
}

pub async fn is_unlisted<M: Middleware + 'static>(market: &Marketplace<M>, item_id: U256) -> Result<bool> {
    Ok(market.is_item_unlisted(item_id).call().await?)
}

pub async fn set_fees<M: Middleware + 'static>(
    market: &Marketplace<M>,
    fee: U256,
) -> Result<TransactionReceipt> {
    send(market.set_fees(fee)).await
}

pub async fn is_paused<M: Middleware + 'static>(market: &Marketplace<M>) -> Result<bool> {
    Ok(market.is_paused().call().await?)
}

pub async fn pause<M: Middleware + 'static>(market: &Marketplace<M>) -> Result<TransactionReceipt> {
    send(market.pause_market_place()).await
}

/// Resumes trading when the marketplace reports itself paused.
pub async fn resume_if_paused<M: Middleware + 'static>(
    market: &Marketplace<M>,
) -> Result<Option<TransactionReceipt>> {
    if !is_paused(market).await? {
        return Ok(None);
    }

    Ok(Some(send(market.resume_market_place()).await?))
}
