use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A token offered by the swap interface. Static, configured at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub symbol: String,
    pub chain_id: String,
    pub name: String,
    pub image: String,
    pub chain_id_image: String,
}

/// ERC-20 metadata as resolved by the pricing provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20TokenInfo {
    pub address: String,
    pub chain: String,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
}

/// Price record for one unit of an asset, in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPriceInfo {
    pub unit_price: f64,
    pub amount: f64,
    pub total: f64,
}

/// Combined payload relayed by `/api/token-price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPriceResponse {
    pub token_info: Erc20TokenInfo,
    pub token_price: AssetPriceInfo,
}

/// Per-symbol entry of the client-side token data map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub symbol: String,
    pub chain_id: String,
    pub address: String,
    pub price: f64,
}

pub const DEFAULT_SOURCE_TOKEN: &str = "USDC";
pub const DEFAULT_TARGET_TOKEN: &str = "ETH";

fn token(symbol: &str, chain_id: &str, name: &str, image: &str, chain_id_image: &str) -> Token {
    Token {
        symbol: symbol.to_string(),
        chain_id: chain_id.to_string(),
        name: name.to_string(),
        image: image.to_string(),
        chain_id_image: chain_id_image.to_string(),
    }
}

lazy_static! {
    /// Supported tokens for the swap interface.
    pub static ref TOKENS: Vec<Token> = vec![
        token(
            "USDC",
            "1",
            "USD Coin",
            "https://wsrv.nl/?w=24&h=24&url=https%3A%2F%2Fraw.githubusercontent.com%2Fsolana-labs%2Ftoken-list%2Fmain%2Fassets%2Fmainnet%2FEPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v%2Flogo.png&dpr=2&quality=80",
            "https://wsrv.nl/?w=24&h=24&url=https%3A%2F%2Fraw.githubusercontent.com%2Fsolana-labs%2Ftoken-list%2Fmain%2Fassets%2Fmainnet%2F7vfCXTUXx5WJV5JADk17DUJ4ksgau7utNKj4b963voxs%2Flogo.png&dpr=2&quality=80",
        ),
        token(
            "USDT",
            "137",
            "Tether",
            "https://wsrv.nl/?w=24&h=24&url=https%3A%2F%2Fraw.githubusercontent.com%2Fsolana-labs%2Ftoken-list%2Fmain%2Fassets%2Fmainnet%2FEs9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB%2Flogo.svg&dpr=2&quality=80",
            "https://wsrv.nl/?w=24&h=24&url=https%3A%2F%2Fbafkreidlnj7ne4bnygpn45x2k464vw7xzudib3vtecqwkczo4adbcnn2sm.ipfs.nftstorage.link%2F&dpr=2&quality=80",
        ),
        token(
            "ETH",
            "8453",
            "Ethereum",
            "https://wsrv.nl/?w=24&h=24&url=https%3A%2F%2Fraw.githubusercontent.com%2Fsolana-labs%2Ftoken-list%2Fmain%2Fassets%2Fmainnet%2F7vfCXTUXx5WJV5JADk17DUJ4ksgau7utNKj4b963voxs%2Flogo.png&dpr=2&quality=80",
            "https://basescan.org/assets/base/images/svg/logos/chain-light.svg?v=25.11.4.0",
        ),
        token(
            "WBTC",
            "1",
            "Wrapped Bitcoin",
            "https://wsrv.nl/?w=24&h=24&url=https%3A%2F%2Fraw.githubusercontent.com%2Fsolana-labs%2Ftoken-list%2Fmain%2Fassets%2Fmainnet%2F3NZ9JMVBmGAqocybic2c7LQCJScmgsAZ6vQqTDzcqmJh%2Flogo.png&dpr=2&quality=80",
            "https://wsrv.nl/?w=24&h=24&url=https%3A%2F%2Fraw.githubusercontent.com%2Fsolana-labs%2Ftoken-list%2Fmain%2Fassets%2Fmainnet%2F7vfCXTUXx5WJV5JADk17DUJ4ksgau7utNKj4b963voxs%2Flogo.png&dpr=2&quality=80",
        ),
    ];

    /// Map chain id to network name.
    pub static ref CHAIN_NAMES: HashMap<&'static str, &'static str> = {
        let mut names = HashMap::new();
        names.insert("1", "Ethereum");
        names.insert("137", "Polygon");
        names.insert("8453", "Base");
        names
    };
}

pub fn find_token(symbol: &str) -> Option<&'static Token> {
    TOKENS.iter().find(|t| t.symbol == symbol)
}

pub fn chain_name(chain_id: &str) -> Option<&'static str> {
    CHAIN_NAMES.get(chain_id).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contains_defaults() {
        assert!(find_token(DEFAULT_SOURCE_TOKEN).is_some());
        assert!(find_token(DEFAULT_TARGET_TOKEN).is_some());
        assert_ne!(DEFAULT_SOURCE_TOKEN, DEFAULT_TARGET_TOKEN);
    }

    #[test]
    fn test_symbols_are_unique() {
        let mut symbols: Vec<_> = TOKENS.iter().map(|t| t.symbol.as_str()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), TOKENS.len());
    }

    #[test]
    fn test_every_catalog_chain_has_a_name() {
        for t in TOKENS.iter() {
            assert!(chain_name(&t.chain_id).is_some(), "no chain name for {}", t.chain_id);
        }
    }

    #[test]
    fn test_token_price_response_wire_format() {
        let json = r#"{
            "tokenInfo": {
                "address": "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
                "chain": "1",
                "decimals": 18,
                "name": "Ether",
                "symbol": "ETH"
            },
            "tokenPrice": {"unitPrice": 3044.8162, "amount": 1.0, "total": 3044.8162}
        }"#;
        let parsed: TokenPriceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.token_info.address, "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");
        assert_eq!(parsed.token_price.unit_price, 3044.8162);

        let round = serde_json::to_value(&parsed).unwrap();
        assert!(round.get("tokenInfo").is_some());
        assert!(round["tokenPrice"].get("unitPrice").is_some());
    }
}
