use crate::domain::token::TokenPriceResponse;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

struct CachedPrice {
    response: TokenPriceResponse,
    fetched_at: Instant,
}

/// Keyed cache of recent price responses. A late response for an abandoned
/// symbol lands under its own `(symbol, chainId)` key and can never clobber
/// the currently selected one.
pub struct PriceCache {
    entries: Mutex<HashMap<(String, String), CachedPrice>>,
    stale_after: Duration,
}

impl PriceCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            stale_after,
        }
    }

    /// Returns the cached response if it is fresher than the staleness
    /// threshold. Stale entries are treated as absent.
    pub async fn get_fresh(&self, symbol: &str, chain_id: &str) -> Option<TokenPriceResponse> {
        let entries = self.entries.lock().await;
        entries
            .get(&(symbol.to_string(), chain_id.to_string()))
            .filter(|cached| cached.fetched_at.elapsed() < self.stale_after)
            .map(|cached| cached.response.clone())
    }

    pub async fn insert(&self, symbol: &str, chain_id: &str, response: TokenPriceResponse) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            (symbol.to_string(), chain_id.to_string()),
            CachedPrice {
                response,
                fetched_at: Instant::now(),
            },
        );
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::{AssetPriceInfo, Erc20TokenInfo};
    use tokio::time::advance;

    fn response(unit_price: f64) -> TokenPriceResponse {
        TokenPriceResponse {
            token_info: Erc20TokenInfo {
                address: "0xabc".to_string(),
                chain: "1".to_string(),
                decimals: 6,
                name: "USD Coin".to_string(),
                symbol: "USDC".to_string(),
            },
            token_price: AssetPriceInfo {
                unit_price,
                amount: 1.0,
                total: unit_price,
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_is_reused() {
        let cache = PriceCache::new(Duration::from_secs(30));
        cache.insert("USDC", "1", response(1.0)).await;

        advance(Duration::from_secs(10)).await;
        let hit = cache.get_fresh("USDC", "1").await;
        assert_eq!(hit.unwrap().token_price.unit_price, 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_is_ignored() {
        let cache = PriceCache::new(Duration::from_secs(30));
        cache.insert("USDC", "1", response(1.0)).await;

        advance(Duration::from_secs(31)).await;
        assert!(cache.get_fresh("USDC", "1").await.is_none());
    }

    #[tokio::test]
    async fn test_keyed_by_symbol_and_chain() {
        let cache = PriceCache::new(Duration::from_secs(30));
        cache.insert("USDC", "1", response(1.0)).await;
        cache.insert("USDC", "137", response(0.999)).await;

        assert_eq!(
            cache.get_fresh("USDC", "1").await.unwrap().token_price.unit_price,
            1.0
        );
        assert_eq!(
            cache.get_fresh("USDC", "137").await.unwrap().token_price.unit_price,
            0.999
        );
        assert!(cache.get_fresh("ETH", "1").await.is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = PriceCache::new(Duration::from_secs(30));
        cache.insert("USDC", "1", response(1.0)).await;
        cache.clear().await;
        assert!(cache.get_fresh("USDC", "1").await.is_none());
    }
}
