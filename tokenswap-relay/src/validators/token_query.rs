use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref SYMBOL_RE: Regex = Regex::new(r"^[A-Za-z0-9]{1,12}$").unwrap();
    static ref CHAIN_ID_RE: Regex = Regex::new(r"^[0-9]{1,10}$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Shape checks for the `/api/token-price` query parameters. The upstream
/// provider would reject garbage anyway, but opaquely; failing here keeps
/// the error a clean 400.
pub fn validate_token_query(symbol: &str, chain_id: &str) -> ValidationResult {
    let mut result = ValidationResult {
        valid: true,
        errors: Vec::new(),
    };

    if !SYMBOL_RE.is_match(symbol) {
        result.valid = false;
        result.errors.push(format!(
            "Invalid symbol '{symbol}': expected 1-12 alphanumeric characters"
        ));
    }

    if !CHAIN_ID_RE.is_match(chain_id) {
        result.valid = false;
        result.errors.push(format!(
            "Invalid chainId '{chain_id}': expected a decimal chain id"
        ));
    }

    result
}
