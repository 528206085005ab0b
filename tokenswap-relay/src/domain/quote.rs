/// Number of decimal places for token amounts.
pub const TOKEN_AMOUNT_DECIMALS: usize = 6;

/// Number of decimal places for displayed token prices.
pub const TOKEN_PRICE_DECIMALS: usize = 4;

/// Converts a USD value into a token quantity at the given unit price,
/// rendered with exactly `decimals` fraction digits.
///
/// Returns `None` when the unit price is not a positive finite number so a
/// missing or broken price never renders as `inf`/`NaN`.
pub fn token_amount(usd_value: f64, unit_price: f64, decimals: usize) -> Option<String> {
    if !usd_value.is_finite() || !unit_price.is_finite() || unit_price <= 0.0 {
        return None;
    }
    Some(format!("{:.*}", decimals, usd_value / unit_price))
}

/// Cross-rate between two token prices (source units per target unit).
pub fn exchange_rate(source_price: f64, target_price: f64, decimals: usize) -> Option<String> {
    if !source_price.is_finite()
        || !target_price.is_finite()
        || source_price <= 0.0
        || target_price <= 0.0
    {
        return None;
    }
    Some(format!("{:.*}", decimals, source_price / target_price))
}
