use ethers::abi::Abi;
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize, Serializer};

/// A listed token lot, as returned by `items(uint256)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub nft_contract: Address,
    #[serde(serialize_with = "decimal")]
    pub token_id: U256,
    #[serde(serialize_with = "decimal")]
    pub amount: U256,
    pub name: String,
    #[serde(serialize_with = "decimal")]
    pub price: U256,
    pub seller: Address,
    pub sold: bool,
}

impl From<(Address, U256, U256, String, U256, Address, bool)> for Item {
    fn from(raw: (Address, U256, U256, String, U256, Address, bool)) -> Self {
        let (nft_contract, token_id, amount, name, price, seller, sold) = raw;
        Item {
            nft_contract,
            token_id,
            amount,
            name,
            price,
            seller,
            sold,
        }
    }
}

/// Arguments of an `addItem` call.
#[derive(Debug, Clone)]
pub struct Listing {
    pub nft_contract: Address,
    pub token_id: U256,
    pub amount: U256,
    pub name: String,
    pub price: U256,
}

/// Compiled contract in the Hardhat artifact layout.
#[derive(Debug, Deserialize)]
pub struct Artifact {
    #[serde(rename = "contractName", default)]
    pub contract_name: String,
    pub abi: Abi,
    #[serde(default)]
    pub bytecode: Bytes,
}

fn decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}
