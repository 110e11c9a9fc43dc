use ethers::types::{Address, U256};
use ethers::utils::format_ether;
use eyre::{bail, Result};

use super::deployer::{self, MARKETPLACE_ARTIFACT, TOKEN_ARTIFACT};
use super::logging::logger::report;
use super::market;
use super::signer::{primary_signer, signers, wallet_balance};
use super::token;
use super::transactions::block_hash;
use crate::cli::{AddToMarketArgs, ApproveArgs, DeployMarketArgs, DeployTokenArgs, MarketArgs};
use crate::config::Settings;
use crate::models::Listing;
use crate::{Marketplace, TestToken};

pub mod flows {
    use super::*;

    pub async fn deploy_token(settings: &Settings, args: &DeployTokenArgs) -> Result<Address> {
        let client = primary_signer(settings).await?;
        let balance = wallet_balance(&client).await?;
        report(&format!("Wallet balance: {} Wei", balance))?;

        let artifact = deployer::load_artifact(&settings.artifacts_dir, TOKEN_ARTIFACT)?;
        report(&format!("Deploying {}", artifact.contract_name))?;
        let deployment = deployer::deploy(artifact, client.clone()).await?;
        report(&format!("Contract deployed to: {:?}", deployment.address))?;
        report(&format!("Transaction hash: {:?}", deployment.tx_hash))?;
        report(&format!("Block hash: {}", block_hash(&deployment.receipt)))?;

        let contract = TestToken::new(deployment.address, client.clone());

        let receipt = token::mint(&contract, args.to, args.id, args.amount, args.data.clone()).await?;
        report("ERC1155 NFT successfully minted")?;
        report(&format!("Hash of Token Minting: {}", block_hash(&receipt)))?;

        let minted = token::balance_of(&contract, args.to, args.id).await?;
        report(&format!("Balance of {:?} for token {}: {}", args.to, args.id, minted))?;

        let owner = token::owner(&contract).await?;
        report(&format!("This is the owner: {:?}", owner))?;

        let operator = args.marketplace.unwrap_or(settings.marketplace);
        let receipt = token::approve(&contract, operator).await?;
        report("Approval successful")?;
        report(&format!("Token Approval Hash: {}", block_hash(&receipt)))?;

        let balance = wallet_balance(&client).await?;
        report(&format!("Wallet balance: {} Wei", balance))?;

        Ok(deployment.address)
    }

    pub async fn approve(settings: &Settings, args: &ApproveArgs) -> Result<()> {
        let client = primary_signer(settings).await?;
        let balance = wallet_balance(&client).await?;
        report(&format!("Wallet balance: {} Wei", balance))?;

        let contract = TestToken::new(settings.token, client.clone());
        report("Token attached")?;

        let operator = args.marketplace.unwrap_or(settings.marketplace);
        let receipt = token::approve(&contract, operator).await?;

        report(&format!("Approval block hash: {}", block_hash(&receipt)))?;
        report(&format!("Approval tx hash: {:?}", receipt.transaction_hash))?;
        report(&format!("Gas used: {}", receipt.gas_used.unwrap_or_default()))?;

        let approved = token::is_approved(&contract, client.address(), operator).await?;
        report(&format!("Approved for all: {}", approved))?;

        Ok(())
    }

    pub async fn add_to_market(settings: &Settings, args: &AddToMarketArgs) -> Result<()> {
        let client = primary_signer(settings).await?;
        let balance = wallet_balance(&client).await?;
        report(&format!("Wallet balance: {} Wei", balance))?;

        let contract = Marketplace::new(settings.marketplace, client.clone());
        report("Marketplace attached")?;

        let listing = Listing {
            nft_contract: settings.token,
            token_id: args.token_id,
            amount: args.amount,
            name: args.name.clone(),
            price: args.price,
        };

        report("adding tokens")?;
        let receipt = market::add_item(&contract, &listing).await?;
        report("Token successfully added to marketplace")?;
        report(&format!("Add token BlockHash: {}", block_hash(&receipt)))?;
        report(&format!("total gas used: {}", receipt.gas_used.unwrap_or_default()))?;

        let inspected = market::item(&contract, args.inspect).await?;
        report(&format!("Token detail of item {}: {}", args.inspect, inspected.name))?;

        let balance = wallet_balance(&client).await?;
        report(&format!("account balance: {}", format_ether(balance)))?;
        report(&format!("price of item {}: {}", args.inspect, inspected.price))?;

        let payment = listing.price * U256::from(2);
        let receipt = market::buy_item(&contract, listing.token_id, args.buy_amount, payment).await?;
        let bought = market::item(&contract, listing.token_id).await?;
        report(&format!("Sold: {}", bought.sold))?;
        report("Buy Operation Successful")?;
        report(&format!("Purchase block hash: {}", block_hash(&receipt)))?;

        let count = market::item_count(&contract).await?;
        report(&format!("Total Item in the list: {}", count))?;

        let mut items = Vec::new();
        for i in market::item_ids(count)? {
            let id = U256::from(i);
            items.push(market::item(&contract, id).await?);

            let unlisted = market::is_unlisted(&contract, id).await?;
            report(&format!("Item {} unlisted: {}", i, unlisted))?;
            market::set_fees(&contract, args.fee).await?;
        }
        report(&serde_json::to_string_pretty(&items)?)?;

        Ok(())
    }

    /// Returns the address of the freshly deployed marketplace.
    pub async fn local_market(settings: &Settings, args: &MarketArgs) -> Result<Address> {
        if !settings.is_local() {
            bail!(
                "the market flow needs the funded dev accounts of a local node, not {}",
                settings.network
            );
        }
        let accounts = signers(settings, 3).await?;
        let deployer_client = accounts[0].clone();
        let buyer_client = accounts[1].clone();

        let artifact = deployer::load_artifact(&settings.artifacts_dir, MARKETPLACE_ARTIFACT)?;
        report(&format!("Deploying {}", artifact.contract_name))?;
        let marketplace = deployer::deploy(artifact, deployer_client.clone()).await?;
        report("contract deployed")?;
        report(&format!("Marketplace Contract: {:?}", marketplace.address))?;

        let artifact = deployer::load_artifact(&settings.artifacts_dir, TOKEN_ARTIFACT)?;
        report(&format!("Deploying {}", artifact.contract_name))?;
        let test_token = deployer::deploy(artifact, deployer_client.clone()).await?;
        report(&format!("testToken Contract: {:?}", test_token.address))?;

        let contract = Marketplace::new(marketplace.address, deployer_client.clone());
        let tokens = TestToken::new(test_token.address, deployer_client.clone());
        let deployer_address = deployer_client.address();

        let receipt = token::mint(
            &tokens,
            deployer_address,
            args.token_id,
            args.mint_amount,
            args.data.clone(),
        )
        .await?;
        report("ERC1155 NFT successfully minted")?;
        report(&format!("Hash of Token Minting: {}", block_hash(&receipt)))?;

        let owner = token::owner(&tokens).await?;
        report(&format!("This is the owner: {:?}", owner))?;
        report(&format!("This is the deployer: {:?}", deployer_address))?;

        let receipt = token::approve(&tokens, marketplace.address).await?;
        report("Approval successful")?;
        report(&format!("Token Approval Hash: {}", block_hash(&receipt)))?;

        let receipt = market::pause(&contract).await?;
        report(&format!(
            "MarketPlace successfully Paused with hash: {}",
            block_hash(&receipt)
        ))?;

        if let Some(receipt) = market::resume_if_paused(&contract).await? {
            report(&format!(
                "MarketPlace successfully Resumed with hash: {}",
                block_hash(&receipt)
            ))?;
        }

        let listing = Listing {
            nft_contract: test_token.address,
            token_id: args.token_id,
            amount: args.amount,
            name: args.name.clone(),
            price: args.price,
        };
        let receipt = market::add_item(&contract, &listing).await?;
        report("Token successfully added to marketplace")?;
        report(&format!("Add token BlockHash: {}", block_hash(&receipt)))?;

        let first = U256::one();
        let listed = market::item(&contract, first).await?;
        report(&format!("Token detail: {}", listed.name))?;

        let buyer_balance = wallet_balance(&buyer_client).await?;
        report(&format!("account 1 Balance: {}", format_ether(buyer_balance)))?;
        report(&format!("price of NFT: {}", listed.price))?;

        let as_buyer = Marketplace::new(marketplace.address, buyer_client.clone());
        let receipt = market::buy_item(&as_buyer, first, args.amount, args.payment).await?;
        let bought = market::item(&contract, first).await?;
        report(&format!("Sold: {}", bought.sold))?;
        report("Buy Operation Successful")?;
        report(&format!("Purchase block hash: {}", block_hash(&receipt)))?;

        let count = market::item_count(&contract).await?;
        report(&format!("{}", count))?;

        let items = market::list_items(&contract).await?;
        report(&serde_json::to_string_pretty(&items)?)?;

        Ok(marketplace.address)
    }

    pub async fn deploy_market(settings: &Settings, args: &DeployMarketArgs) -> Result<Address> {
        let client = primary_signer(settings).await?;

        let artifact = deployer::load_artifact(&settings.artifacts_dir, MARKETPLACE_ARTIFACT)?;
        let deployment = deployer::deploy(artifact, client.clone()).await?;

        let contract = Marketplace::new(deployment.address, client.clone());
        let receipt = market::set_fees(&contract, args.fees).await?;
        report(&format!("Platform fee set to {} wei in block {}", args.fees, block_hash(&receipt)))?;
        report(&format!("Marketplace Contract: {:?}", deployment.address))?;

        Ok(deployment.address)
    }
}

/// End-to-end runs against a throwaway Anvil node. They need `anvil` on the
/// PATH and the compiled contracts under `ARTIFACTS_DIR`.
#[cfg(test)]
mod chain_tests {
    use super::*;
    use crate::services::signer::Client;
    use ethers::contract::ContractError;
    use ethers::utils::{parse_ether, Anvil, AnvilInstance};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn local_chain() -> (AnvilInstance, Settings) {
        let anvil = Anvil::new().spawn();
        let settings = settings_for(&anvil, &[]);
        (anvil, settings)
    }

    fn settings_for(anvil: &AnvilInstance, extra: &[(&'static str, String)]) -> Settings {
        let mut vars: HashMap<&str, String> = HashMap::new();
        vars.insert("NETWORK", "anvil".to_string());
        vars.insert("RPC_URL", anvil.endpoint());
        if let Ok(dir) = std::env::var("ARTIFACTS_DIR") {
            vars.insert("ARTIFACTS_DIR", dir);
        }
        vars.extend(extra.iter().cloned());
        Settings::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    async fn deploy_with(settings: &Settings, name: &str, client: Arc<Client>) -> Address {
        let artifact = deployer::load_artifact(&settings.artifacts_dir, name).unwrap();
        deployer::deploy(artifact, client).await.unwrap().address
    }

    fn revert_reason(err: &eyre::Report) -> Option<String> {
        err.downcast_ref::<ContractError<Client>>()?.decode_revert::<String>()
    }

    #[tokio::test]
    #[ignore = "needs anvil and compiled artifacts"]
    async fn adds_a_new_item_to_the_marketplace() -> Result<()> {
        let (_anvil, settings) = local_chain();
        let accounts = signers(&settings, 3).await?;
        let seller = accounts[1].clone();

        let market_address = deploy_with(&settings, MARKETPLACE_ARTIFACT, accounts[0].clone()).await;
        let token_address = deploy_with(&settings, TOKEN_ARTIFACT, seller.clone()).await;

        let tokens = TestToken::new(token_address, seller.clone());
        token::mint(&tokens, seller.address(), U256::one(), U256::one(), Default::default()).await?;
        token::approve(&tokens, market_address).await?;

        let contract = Marketplace::new(market_address, seller.clone());
        let listing = Listing {
            nft_contract: token_address,
            token_id: U256::one(),
            amount: U256::one(),
            name: "Test Item".to_string(),
            price: parse_ether("1")?,
        };
        market::add_item(&contract, &listing).await?;

        let item = market::item(&contract, U256::one()).await?;
        assert_eq!(item.nft_contract, token_address);
        assert_eq!(item.token_id, U256::one());
        assert_eq!(item.amount, U256::one());
        assert_eq!(item.name, "Test Item");
        assert_eq!(item.price, parse_ether("1")?);
        assert_eq!(item.seller, seller.address());
        assert!(!item.sold);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "needs anvil and compiled artifacts"]
    async fn non_owner_cannot_list() -> Result<()> {
        let (_anvil, settings) = local_chain();
        let accounts = signers(&settings, 3).await?;
        let buyer = accounts[2].clone();

        let market_address = deploy_with(&settings, MARKETPLACE_ARTIFACT, accounts[0].clone()).await;
        let token_address = deploy_with(&settings, TOKEN_ARTIFACT, accounts[1].clone()).await;

        let contract = Marketplace::new(market_address, buyer);
        let listing = Listing {
            nft_contract: token_address,
            token_id: U256::one(),
            amount: U256::one(),
            name: "Test Item".to_string(),
            price: parse_ether("1")?,
        };
        let err = market::add_item(&contract, &listing).await.unwrap_err();

        assert_eq!(
            revert_reason(&err).as_deref(),
            Some("Only token owner can list for sale")
        );
        Ok(())
    }

    #[tokio::test]
    #[ignore = "needs anvil and compiled artifacts"]
    async fn buying_a_missing_item_reverts() -> Result<()> {
        let (_anvil, settings) = local_chain();
        let accounts = signers(&settings, 3).await?;

        let market_address = deploy_with(&settings, MARKETPLACE_ARTIFACT, accounts[0].clone()).await;
        let contract = Marketplace::new(market_address, accounts[2].clone());

        let err = market::buy_item(&contract, U256::one(), U256::one(), U256::zero())
            .await
            .unwrap_err();

        assert_eq!(revert_reason(&err).as_deref(), Some("Item does not exist"));
        Ok(())
    }

    #[tokio::test]
    #[ignore = "needs anvil and compiled artifacts"]
    async fn paused_marketplace_is_resumed() -> Result<()> {
        let (_anvil, settings) = local_chain();
        let accounts = signers(&settings, 1).await?;

        let market_address = deploy_with(&settings, MARKETPLACE_ARTIFACT, accounts[0].clone()).await;
        let contract = Marketplace::new(market_address, accounts[0].clone());

        market::pause(&contract).await?;
        assert!(market::is_paused(&contract).await?);

        let receipt = market::resume_if_paused(&contract).await?;

        assert!(receipt.is_some());
        assert!(!market::is_paused(&contract).await?);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "needs anvil and compiled artifacts"]
    async fn buyer_receives_listed_tokens() -> Result<()> {
        let (_anvil, settings) = local_chain();
        let accounts = signers(&settings, 3).await?;
        let seller = accounts[1].clone();
        let buyer = accounts[2].clone();

        let market_address = deploy_with(&settings, MARKETPLACE_ARTIFACT, accounts[0].clone()).await;
        let token_address = deploy_with(&settings, TOKEN_ARTIFACT, seller.clone()).await;

        let tokens = TestToken::new(token_address, seller.clone());
        let token_id = U256::one();
        token::mint(&tokens, seller.address(), token_id, U256::from(10), Default::default()).await?;
        token::approve(&tokens, market_address).await?;

        let price = parse_ether("1")?;
        let listing = Listing {
            nft_contract: token_address,
            token_id,
            amount: U256::from(10),
            name: "Test Item".to_string(),
            price,
        };
        market::add_item(&Marketplace::new(market_address, seller.clone()), &listing).await?;

        let as_buyer = Marketplace::new(market_address, buyer.clone());
        market::buy_item(&as_buyer, U256::one(), U256::from(10), price * U256::from(10)).await?;

        assert!(market::item(&as_buyer, U256::one()).await?.sold);
        assert_eq!(token::balance_of(&tokens, buyer.address(), token_id).await?, U256::from(10));
        assert_eq!(token::balance_of(&tokens, seller.address(), token_id).await?, U256::zero());
        Ok(())
    }

    #[tokio::test]
    #[ignore = "needs anvil and compiled artifacts"]
    async fn local_market_sells_the_listed_lot() -> Result<()> {
        let (_anvil, settings) = local_chain();
        let args = MarketArgs {
            token_id: parse_ether("1")?,
            mint_amount: parse_ether("1000")?,
            data: crate::cli::parse_data("0x293232").unwrap(),
            amount: U256::from(10),
            name: "baddest Team 11".to_string(),
            price: U256::one(),
            payment: parse_ether("100")?,
        };

        let market_address = flows::local_market(&settings, &args).await?;

        let accounts = signers(&settings, 1).await?;
        let contract = Marketplace::new(market_address, accounts[0].clone());
        assert_eq!(market::item_count(&contract).await?, U256::one());

        let item = market::item(&contract, U256::one()).await?;
        assert_eq!(item.name, "baddest Team 11");
        assert_eq!(item.seller, accounts[0].address());
        assert!(item.sold);
        assert!(!market::is_paused(&contract).await?);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "needs anvil and compiled artifacts"]
    async fn add_to_market_lists_buys_and_walks_items() -> Result<()> {
        let (anvil, settings) = local_chain();
        let accounts = signers(&settings, 1).await?;
        let owner = accounts[0].clone();

        let market_address = deploy_with(&settings, MARKETPLACE_ARTIFACT, owner.clone()).await;
        let token_address = deploy_with(&settings, TOKEN_ARTIFACT, owner.clone()).await;

        let tokens = TestToken::new(token_address, owner.clone());
        token::mint(&tokens, owner.address(), U256::one(), U256::from(10), Default::default()).await?;
        token::approve(&tokens, market_address).await?;

        let settings = settings_for(
            &anvil,
            &[
                ("MARKETPLACE_ADDRESS", format!("{:?}", market_address)),
                ("TOKEN_ADDRESS", format!("{:?}", token_address)),
            ],
        );
        let args = AddToMarketArgs {
            token_id: U256::one(),
            amount: U256::from(10),
            name: "Unit".to_string(),
            price: parse_ether("0.000000001")?,
            inspect: U256::one(),
            buy_amount: U256::one(),
            fee: U256::one(),
        };

        flows::add_to_market(&settings, &args).await?;

        let contract = Marketplace::new(market_address, owner.clone());
        assert_eq!(market::item_count(&contract).await?, U256::one());
        let item = market::item(&contract, U256::one()).await?;
        assert_eq!(item.name, "Unit");
        assert!(item.sold);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "needs anvil and compiled artifacts"]
    async fn deploy_market_sets_zero_fee() -> Result<()> {
        let (_anvil, settings) = local_chain();

        let address = flows::deploy_market(&settings, &DeployMarketArgs { fees: U256::zero() }).await?;

        assert_ne!(address, Address::zero());
        Ok(())
    }
}
