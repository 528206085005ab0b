use actix_web::web::{Data, Query};
use actix_web::{get, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::error::RelayError;
use crate::domain::token::{chain_name, TokenPriceResponse, TOKENS};
use crate::infrastructure::logger::Logger;
use crate::infrastructure::provider::PriceProvider;
use crate::validators::token_query::validate_token_query;

// Hardcoded fallbacks when the query string omits the parameters.
const FALLBACK_SYMBOL: &str = "ETH";
const FALLBACK_CHAIN_ID: &str = "1";

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "message": "TokenSwap Relay Server is running"
    }))
}

#[derive(Debug, Deserialize)]
pub struct TokenPriceQuery {
    pub symbol: Option<String>,
    #[serde(rename = "chainId")]
    pub chain_id: Option<String>,
}

/// Proxy for the pricing provider: resolves the ERC-20 by chain + symbol,
/// then fetches its price info, and relays the combined payload. Upstream
/// failures collapse to one generic 500 on the wire.
#[get("/token-price")]
pub async fn get_token_price(
    query: Query<TokenPriceQuery>,
    provider: Data<Arc<dyn PriceProvider>>,
) -> Result<HttpResponse, RelayError> {
    let symbol = query
        .symbol
        .clone()
        .unwrap_or_else(|| FALLBACK_SYMBOL.to_string());
    let chain_id = query
        .chain_id
        .clone()
        .unwrap_or_else(|| FALLBACK_CHAIN_ID.to_string());

    let validation = validate_token_query(&symbol, &chain_id);
    if !validation.valid {
        return Err(RelayError::Validation(validation.errors.join(", ")));
    }

    let token_info = provider
        .erc20_by_chain_and_symbol(&chain_id, &symbol)
        .await
        .map_err(|err| {
            let request_id = uuid::Uuid::new_v4().to_string();
            Logger::upstream_failure(&request_id, &symbol, &chain_id, &err.to_string());
            RelayError::Upstream(err.to_string())
        })?;

    let token_price = provider
        .asset_price_info(&chain_id, &token_info.address)
        .await
        .map_err(|err| {
            let request_id = uuid::Uuid::new_v4().to_string();
            Logger::upstream_failure(&request_id, &symbol, &chain_id, &err.to_string());
            RelayError::Upstream(err.to_string())
        })?;

    Ok(HttpResponse::Ok().json(TokenPriceResponse {
        token_info,
        token_price,
    }))
}

/// Static catalog of supported tokens, with chain names for display.
#[get("/tokens")]
pub async fn get_supported_tokens() -> impl Responder {
    let tokens: Vec<_> = TOKENS
        .iter()
        .map(|t| {
            serde_json::json!({
                "symbol": t.symbol,
                "chainId": t.chain_id,
                "chainName": chain_name(&t.chain_id),
                "name": t.name,
                "image": t.image,
                "chainIdImage": t.chain_id_image,
            })
        })
        .collect();

    HttpResponse::Ok().json(serde_json::json!({ "tokens": tokens }))
}
