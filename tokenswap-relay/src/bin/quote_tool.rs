//! One-shot quote against a running relay:
//!
//!     quote_tool <usd-amount> [source-symbol] [target-symbol]
//!
//! Reads RELAY_URL (default http://127.0.0.1:4000) and INTERNAL_API_SECRET
//! from the environment.

use anyhow::{anyhow, Result};
use std::env;
use std::sync::Arc;
use tokenswap_relay::app::proxy_client::RelayProxyClient;
use tokenswap_relay::app::quote_engine::{QuoteEngine, QuoteEngineConfig, QuoteRequest};
use tokenswap_relay::app::selection::TokenSelection;
use tokenswap_relay::domain::token::chain_name;
use tokenswap_relay::infrastructure::logger::Logger;
use tokenswap_relay::utils::format::format_token_amount;

#[tokio::main]
async fn main() -> Result<()> {
    Logger::init("info");

    let args: Vec<String> = env::args().collect();
    let usd_amount = args
        .get(1)
        .ok_or_else(|| anyhow!("usage: quote_tool <usd-amount> [source] [target]"))?
        .clone();

    let mut selection = TokenSelection::default();
    if let Some(source) = args.get(2) {
        selection.set_source(source.to_uppercase());
    }
    if let Some(target) = args.get(3) {
        selection.set_target(target.to_uppercase());
    }

    let relay_url = env::var("RELAY_URL").unwrap_or_else(|_| "http://127.0.0.1:4000".to_string());
    let secret = env::var("INTERNAL_API_SECRET").unwrap_or_else(|_| "dev_internal_secret".to_string());

    let fetcher = Arc::new(RelayProxyClient::new(&relay_url, &secret)?);
    let engine = QuoteEngine::new(fetcher, QuoteEngineConfig::default());

    let view = engine
        .quote(QuoteRequest::new(
            &usd_amount,
            selection.source(),
            selection.target(),
        ))
        .await;

    if !view.error.is_empty() {
        return Err(anyhow!(view.error));
    }

    println!("Quote for {usd_amount} USD:");
    for symbol in [selection.source(), selection.target()] {
        let amount = if symbol == selection.source() {
            &view.source_amount
        } else {
            &view.target_amount
        };
        let pretty = amount
            .parse::<f64>()
            .map(format_token_amount)
            .unwrap_or_else(|_| amount.clone());
        match view.token_data.get(symbol) {
            Some(data) => println!(
                "  {pretty} {symbol} on {} (unit price {} USD, {})",
                chain_name(&data.chain_id).unwrap_or("unknown chain"),
                data.price,
                data.address,
            ),
            None => println!("  {pretty} {symbol}"),
        }
    }
    if !view.exchange_rate.is_empty() {
        println!(
            "  1 {} = {} {}",
            selection.source(),
            view.exchange_rate,
            selection.target()
        );
    }

    Ok(())
}
