use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub struct Logger;

impl Logger {
    /// Initialises the global tracing subscriber. `RUST_LOG` wins over the
    /// configured level. Safe to call more than once (tests).
    pub fn init(log_level: &str) {
        let default_filter = log_level.to_string();
        INIT.call_once(|| {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .init();
        });
    }

    pub fn auth_rejected(path: &str, reason: &str) {
        log::warn!("Rejected internal request on {path}: {reason}");
    }

    pub fn upstream_failure(request_id: &str, symbol: &str, chain_id: &str, error: &str) {
        log::error!("[{request_id}] Provider call failed for {symbol} on chain {chain_id}: {error}");
    }
}
