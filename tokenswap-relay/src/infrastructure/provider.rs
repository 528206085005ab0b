use crate::domain::token::{AssetPriceInfo, Erc20TokenInfo};
use crate::infrastructure::config::Config;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// The external pricing provider, as consumed by the proxy. Two black-box
/// operations: resolve an ERC-20 by chain + symbol, and fetch the USD price
/// info for a resolved asset.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn erc20_by_chain_and_symbol(
        &self,
        chain_id: &str,
        symbol: &str,
    ) -> Result<Erc20TokenInfo>;

    async fn asset_price_info(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<AssetPriceInfo>;
}

/// HTTP client for the Fun pricing API.
pub struct FunApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FunApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: config.provider_base_url.trim_end_matches('/').to_string(),
            api_key: config.fun_api_key.clone(),
        })
    }
}

#[async_trait]
impl PriceProvider for FunApiClient {
    async fn erc20_by_chain_and_symbol(
        &self,
        chain_id: &str,
        symbol: &str,
    ) -> Result<Erc20TokenInfo> {
        let url = format!("{}/asset/erc20/{chain_id}/{symbol}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "provider returned {status} resolving {symbol} on chain {chain_id}"
            ));
        }

        Ok(response.json::<Erc20TokenInfo>().await?)
    }

    async fn asset_price_info(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<AssetPriceInfo> {
        let url = format!(
            "{}/asset/erc20/price/{chain_id}/{token_address}",
            self.base_url
        );
        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "provider returned {status} pricing {token_address} on chain {chain_id}"
            ));
        }

        Ok(response.json::<AssetPriceInfo>().await?)
    }
}
