use crate::app::debounce::Debouncer;
use crate::app::price_cache::PriceCache;
use crate::app::proxy_client::TokenPriceFetcher;
use crate::domain::quote;
use crate::domain::token::{find_token, Token, TokenData, TokenPriceResponse};
use crate::infrastructure::config::{
    API_DEBOUNCE_DELAY_MS, PRICE_FETCH_RETRIES, PRICE_RETRY_BASE_DELAY_MS, PRICE_STALE_AFTER_SECS,
};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::sleep;

const MAX_RETRY_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct QuoteEngineConfig {
    pub debounce: Duration,
    pub stale_after: Duration,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub amount_decimals: usize,
    pub rate_decimals: usize,
}

impl Default for QuoteEngineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(API_DEBOUNCE_DELAY_MS),
            stale_after: Duration::from_secs(PRICE_STALE_AFTER_SECS),
            max_retries: PRICE_FETCH_RETRIES,
            retry_base_delay: Duration::from_millis(PRICE_RETRY_BASE_DELAY_MS),
            amount_decimals: quote::TOKEN_AMOUNT_DECIMALS,
            rate_decimals: quote::TOKEN_AMOUNT_DECIMALS,
        }
    }
}

/// What the orchestration was asked to quote: the tag by which a completed
/// computation is matched against the current selection before publishing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteRequest {
    pub usd_amount: String,
    pub source_symbol: String,
    pub target_symbol: String,
}

impl QuoteRequest {
    pub fn new(usd_amount: &str, source_symbol: &str, target_symbol: &str) -> Self {
        Self {
            usd_amount: usd_amount.to_string(),
            source_symbol: source_symbol.to_string(),
            target_symbol: target_symbol.to_string(),
        }
    }
}

/// The single view the presentation layer renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteView {
    pub source_amount: String,
    pub target_amount: String,
    pub exchange_rate: String,
    pub token_data: HashMap<String, TokenData>,
    pub loading: bool,
    pub error: String,
}

impl Default for QuoteView {
    fn default() -> Self {
        Self {
            source_amount: "0".to_string(),
            target_amount: "0".to_string(),
            exchange_rate: String::new(),
            token_data: HashMap::new(),
            loading: false,
            error: String::new(),
        }
    }
}

/// Orchestrates the dual-token quote: concurrent price fetches through the
/// freshness cache, bounded retries with backoff, and tag-checked
/// publication so a superseded computation can never overwrite the view.
pub struct QuoteEngine {
    fetcher: Arc<dyn TokenPriceFetcher>,
    cache: PriceCache,
    config: QuoteEngineConfig,
    view_tx: watch::Sender<QuoteView>,
    view_rx: watch::Receiver<QuoteView>,
    current: Mutex<Option<QuoteRequest>>,
}

impl QuoteEngine {
    pub fn new(fetcher: Arc<dyn TokenPriceFetcher>, config: QuoteEngineConfig) -> Self {
        let (view_tx, view_rx) = watch::channel(QuoteView::default());
        Self {
            fetcher,
            cache: PriceCache::new(config.stale_after),
            config,
            view_tx,
            view_rx,
            current: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &QuoteEngineConfig {
        &self.config
    }

    /// Receiver for the published view stream.
    pub fn watch_view(&self) -> watch::Receiver<QuoteView> {
        self.view_rx.clone()
    }

    /// Computes a quote for `request`. The result is returned to the caller
    /// unconditionally but only published to the view if the request is
    /// still the current one when it completes.
    pub async fn quote(&self, request: QuoteRequest) -> QuoteView {
        {
            let mut current = self.current.lock().await;
            *current = Some(request.clone());
        }

        let view = self.compute(&request).await;
        self.publish_if_current(&request, view.clone()).await;
        view
    }

    async fn compute(&self, request: &QuoteRequest) -> QuoteView {
        let amount: f64 = match request.usd_amount.trim().parse() {
            Ok(value) => value,
            Err(_) => return QuoteView::default(),
        };
        if !amount.is_finite() || amount <= 0.0 {
            return QuoteView::default();
        }

        let source_token = match find_token(&request.source_symbol) {
            Some(token) => token,
            None => return Self::error_view(&request.source_symbol),
        };
        let target_token = match find_token(&request.target_symbol) {
            Some(token) => token,
            None => return Self::error_view(&request.target_symbol),
        };

        let mut loading = self.view_rx.borrow().clone();
        loading.loading = true;
        loading.error.clear();
        self.publish_if_current(request, loading).await;

        let (source_result, target_result) = tokio::join!(
            self.price_for(source_token),
            self.price_for(target_token),
        );

        let (source_data, target_data) = match (source_result, target_result) {
            (Ok(s), Ok(t)) => (s, t),
            (Err(err), _) | (_, Err(err)) => {
                return QuoteView {
                    error: err.to_string(),
                    ..QuoteView::default()
                };
            }
        };

        let source_price = source_data.token_price.unit_price;
        let target_price = target_data.token_price.unit_price;

        let mut token_data = HashMap::new();
        token_data.insert(
            source_token.symbol.clone(),
            TokenData {
                symbol: source_token.symbol.clone(),
                chain_id: source_token.chain_id.clone(),
                address: source_data.token_info.address.clone(),
                price: source_price,
            },
        );
        token_data.insert(
            target_token.symbol.clone(),
            TokenData {
                symbol: target_token.symbol.clone(),
                chain_id: target_token.chain_id.clone(),
                address: target_data.token_info.address.clone(),
                price: target_price,
            },
        );

        let source_amount = quote::token_amount(amount, source_price, self.config.amount_decimals);
        let target_amount = quote::token_amount(amount, target_price, self.config.amount_decimals);
        let rate = quote::exchange_rate(source_price, target_price, self.config.rate_decimals);

        match (source_amount, target_amount) {
            (Some(source_amount), Some(target_amount)) => QuoteView {
                source_amount,
                target_amount,
                exchange_rate: rate.unwrap_or_default(),
                token_data,
                loading: false,
                error: String::new(),
            },
            // a non-positive unit price never renders as inf/NaN
            _ => QuoteView {
                token_data,
                ..QuoteView::default()
            },
        }
    }

    async fn price_for(&self, token: &Token) -> anyhow::Result<TokenPriceResponse> {
        if let Some(hit) = self.cache.get_fresh(&token.symbol, &token.chain_id).await {
            return Ok(hit);
        }
        let response = self.fetch_with_retry(&token.symbol, &token.chain_id).await?;
        self.cache
            .insert(&token.symbol, &token.chain_id, response.clone())
            .await;
        Ok(response)
    }

    async fn fetch_with_retry(
        &self,
        symbol: &str,
        chain_id: &str,
    ) -> anyhow::Result<TokenPriceResponse> {
        let mut attempt = 0u32;
        loop {
            match self.fetcher.fetch_token_price(symbol, chain_id).await {
                Ok(response) => return Ok(response),
                Err(err) if attempt < self.config.max_retries => {
                    let backoff =
                        (self.config.retry_base_delay * 2u32.pow(attempt)).min(MAX_RETRY_BACKOFF);
                    let jitter = Duration::from_millis(rand::rng().random_range(0..250));
                    log::warn!(
                        "Price fetch for {symbol} failed (attempt {}): {err}",
                        attempt + 1
                    );
                    sleep(backoff + jitter).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn publish_if_current(&self, request: &QuoteRequest, view: QuoteView) {
        let current = self.current.lock().await;
        if current.as_ref() == Some(request) {
            let _ = self.view_tx.send(view);
        }
    }

    fn error_view(symbol: &str) -> QuoteView {
        QuoteView {
            error: format!("Token configuration not found for {symbol}"),
            ..QuoteView::default()
        }
    }
}

/// Owns the debounced input stream feeding a `QuoteEngine`: the client-side
/// equivalent of the amount box wired to the quote display.
pub struct QuoteSession {
    engine: Arc<QuoteEngine>,
    debouncer: Debouncer<QuoteRequest>,
    task: JoinHandle<()>,
}

impl QuoteSession {
    pub fn new(engine: Arc<QuoteEngine>) -> Self {
        let debouncer = Debouncer::new(QuoteRequest::default(), engine.config.debounce);
        let mut debounced = debouncer.subscribe();
        let worker = Arc::clone(&engine);
        let task = tokio::spawn(async move {
            while debounced.changed().await.is_ok() {
                let request = debounced.borrow_and_update().clone();
                worker.quote(request).await;
            }
        });
        Self {
            engine,
            debouncer,
            task,
        }
    }

    /// Feed a new amount/selection; quoted once it survives the debounce.
    pub fn update(&self, request: QuoteRequest) {
        self.debouncer.push(request);
    }

    pub fn watch_view(&self) -> watch::Receiver<QuoteView> {
        self.engine.watch_view()
    }
}

impl Drop for QuoteSession {
    fn drop(&mut self) {
        self.task.abort();
    }
}
