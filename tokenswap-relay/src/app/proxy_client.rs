use crate::domain::token::TokenPriceResponse;
use crate::middleware::internal_auth::INTERNAL_REQUEST_HEADER;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches a token's price data for the client side. The quote engine only
/// sees this trait, so tests can stub the network away.
#[async_trait]
pub trait TokenPriceFetcher: Send + Sync {
    async fn fetch_token_price(&self, symbol: &str, chain_id: &str) -> Result<TokenPriceResponse>;
}

/// Client for the relay's own `/api/token-price` route, authenticated with
/// the shared internal-request secret.
pub struct RelayProxyClient {
    http: reqwest::Client,
    base_url: String,
    internal_api_secret: String,
}

impl RelayProxyClient {
    pub fn new(base_url: &str, internal_api_secret: &str) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            internal_api_secret: internal_api_secret.to_string(),
        })
    }
}

#[async_trait]
impl TokenPriceFetcher for RelayProxyClient {
    async fn fetch_token_price(&self, symbol: &str, chain_id: &str) -> Result<TokenPriceResponse> {
        let url = format!("{}/api/token-price", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("symbol", symbol), ("chainId", chain_id)])
            .header(INTERNAL_REQUEST_HEADER, &self.internal_api_secret)
            .send()
            .await
            .map_err(|_| anyhow!("Failed to fetch {symbol} token data"))?;

        if !response.status().is_success() {
            return Err(anyhow!("Failed to fetch {symbol} token data"));
        }

        response
            .json::<TokenPriceResponse>()
            .await
            .map_err(|_| anyhow!("Failed to fetch {symbol} token data"))
    }
}
