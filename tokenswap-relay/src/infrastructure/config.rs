use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.fun.xyz/v1";

/// Debounce delay applied to the USD amount before quoting, in milliseconds.
pub const API_DEBOUNCE_DELAY_MS: u64 = 500;

/// Client-side query policy: cached prices fresher than this are reused
/// without a network call, failures retry with capped exponential backoff.
pub const PRICE_STALE_AFTER_SECS: u64 = 30;
pub const PRICE_FETCH_RETRIES: u32 = 2;
pub const PRICE_RETRY_BASE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub log_level: String,
    pub fun_api_key: String,
    pub internal_api_secret: String,
    pub public_app_url: Option<String>,
    pub provider_base_url: String,
    pub version: String,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load environment variables
        dotenv::dotenv().ok();

        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        // Validate critical environment variables on startup
        Self::validate_startup_env_vars(&env_name)?;

        let config = match env_name.as_str() {
            "production" => Self::production_config()?,
            _ => Self::development_config()?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validates critical environment variables on startup
    fn validate_startup_env_vars(env_name: &str) -> Result<()> {
        let mut errors = Vec::new();

        if env_name == "production" {
            let required_vars = ["FUN_API_KEY", "INTERNAL_API_SECRET", "PUBLIC_APP_URL"];

            for var in &required_vars {
                match env::var(var) {
                    Ok(value) if value.is_empty() => {
                        errors.push(format!(
                            "Required environment variable {var} is empty for production"
                        ));
                    }
                    Err(_) => {
                        errors.push(format!(
                            "Required environment variable {var} is not set for production"
                        ));
                    }
                    _ => {}
                }
            }
        }

        if !errors.is_empty() {
            return Err(anyhow!(
                "Environment validation failed:\n{}",
                errors.join("\n")
            ));
        }

        Ok(())
    }

    pub fn development_config() -> Result<Self> {
        Ok(Self {
            environment: "development".to_string(),
            port: u16::from_str(&env::var("PORT").unwrap_or_else(|_| "4000".to_string()))?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".to_string()),
            fun_api_key: env::var("FUN_API_KEY").unwrap_or_else(|_| "default".to_string()),
            internal_api_secret: env::var("INTERNAL_API_SECRET")
                .unwrap_or_else(|_| "dev_internal_secret".to_string()),
            public_app_url: env::var("PUBLIC_APP_URL").ok().filter(|v| !v.is_empty()),
            provider_base_url: env::var("PROVIDER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PROVIDER_BASE_URL.to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    pub fn production_config() -> Result<Self> {
        Ok(Self {
            environment: "production".to_string(),
            port: u16::from_str(&env::var("PORT").unwrap_or_else(|_| "4000".to_string()))?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            fun_api_key: env::var("FUN_API_KEY")?,
            internal_api_secret: env::var("INTERNAL_API_SECRET")?,
            public_app_url: env::var("PUBLIC_APP_URL").ok().filter(|v| !v.is_empty()),
            provider_base_url: env::var("PROVIDER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PROVIDER_BASE_URL.to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        let errors = self.validation_errors();
        if !errors.is_empty() {
            return Err(anyhow!(
                "Configuration validation failed: {}",
                errors.join(", ")
            ));
        }
        Ok(())
    }

    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Invalid server port".to_string());
        }

        if self.fun_api_key.is_empty() {
            errors.push("FUN_API_KEY is required".to_string());
        }

        if self.internal_api_secret.is_empty() {
            errors.push("INTERNAL_API_SECRET is required".to_string());
        }

        if !self.provider_base_url.starts_with("http://")
            && !self.provider_base_url.starts_with("https://")
        {
            errors.push(format!(
                "PROVIDER_BASE_URL must be an http(s) URL, got '{}'",
                self.provider_base_url
            ));
        }

        if self.environment == "production" && self.public_app_url.is_none() {
            errors.push("PUBLIC_APP_URL is required in production".to_string());
        }

        errors
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            environment: "development".to_string(),
            port: 4000,
            log_level: "debug".to_string(),
            fun_api_key: "default".to_string(),
            internal_api_secret: "dev_internal_secret".to_string(),
            public_app_url: None,
            provider_base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            version: "1.0.0".to_string(),
        }
    }

    #[test]
    fn test_development_defaults_pass_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let mut config = base_config();
        config.internal_api_secret = String::new();
        let errors = config.validation_errors();
        assert!(errors.iter().any(|e| e.contains("INTERNAL_API_SECRET")));
    }

    #[test]
    fn test_production_requires_public_app_url() {
        let mut config = base_config();
        config.environment = "production".to_string();
        let errors = config.validation_errors();
        assert!(errors.iter().any(|e| e.contains("PUBLIC_APP_URL")));

        config.public_app_url = Some("https://swap.example.com".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_provider_url_is_rejected() {
        let mut config = base_config();
        config.provider_base_url = "ftp://api.fun.xyz".to_string();
        assert!(config.validate().is_err());
    }
}
