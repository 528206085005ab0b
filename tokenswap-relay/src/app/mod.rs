pub mod debounce;
pub mod price_cache;
pub mod proxy_client;
pub mod quote_engine;
pub mod selection;
