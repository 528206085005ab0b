use actix_web::{web, App, HttpServer};

use std::sync::Arc;
use tokenswap_relay::api::{get_supported_tokens, get_token_price, health};
use tokenswap_relay::infrastructure::config::Config;
use tokenswap_relay::infrastructure::logger::Logger;
use tokenswap_relay::infrastructure::provider::{FunApiClient, PriceProvider};
use tokenswap_relay::middleware::{InternalAuthConfig, InternalRequestGuard};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger before anything that can fail
    Logger::init("info");

    log::info!("Starting TokenSwap Relay Server...");

    let config = match Config::new() {
        Ok(config) => {
            log::info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return Err(std::io::Error::new(std::io::ErrorKind::Other, format!(
                "Configuration initialization failed: {e}"
            )));
        }
    };

    let validation_errors = config.validation_errors();
    if !validation_errors.is_empty() {
        log::error!(
            "Configuration validation failed: {}",
            validation_errors.join(", ")
        );
        return Err(std::io::Error::new(std::io::ErrorKind::Other, format!(
            "Configuration validation failed: {}",
            validation_errors.join(", ")
        )));
    }
    log::info!("Configuration validation passed");

    let provider: Arc<dyn PriceProvider> = match FunApiClient::new(&config) {
        Ok(client) => {
            log::info!("Pricing provider client initialized successfully");
            Arc::new(client)
        }
        Err(e) => {
            log::error!("Failed to initialize pricing provider client: {e}");
            return Err(std::io::Error::new(std::io::ErrorKind::Other, format!(
                "Provider client initialization failed: {e}"
            )));
        }
    };

    let auth = InternalAuthConfig::from_config(&config);
    let port = config.port;

    log::info!("Starting TokenSwap Relay Server on port {port}");
    log::info!("Environment: {}", config.environment);
    log::info!("Pricing provider: {}", config.provider_base_url);

    HttpServer::new(move || {
        App::new()
            // Global built-in middleware only
            .wrap(actix_web::middleware::Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(actix_cors::Cors::permissive())
            .app_data(web::Data::new(Arc::clone(&provider)))
            // Health endpoint (no custom middleware)
            .service(health)
            // API endpoints behind the internal-request guard
            .service(
                web::scope("/api")
                    .wrap(InternalRequestGuard::new(auth.clone()))
                    .service(get_token_price)
                    .service(get_supported_tokens),
            )
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
