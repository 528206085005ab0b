//! Display formatting for amounts and prices.

/// Formats a number with comma separators for thousands.
pub fn format_number_with_commas(value: f64) -> String {
    if value.is_nan() {
        return "0".to_string();
    }

    let text = value.to_string();
    let (integer_part, decimal_part) = match text.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (text.as_str(), None),
    };

    let grouped = group_thousands(integer_part);
    match decimal_part {
        Some(d) => format!("{grouped}.{d}"),
        None => grouped,
    }
}

/// String-input variant; unparseable input formats as "0".
pub fn format_number_with_commas_str(value: &str) -> String {
    match value.trim().parse::<f64>() {
        Ok(num) => format_number_with_commas(num),
        Err(_) => "0".to_string(),
    }
}

/// Formats large numbers with K, M, B, T suffixes for better readability.
pub fn format_large_number(value: f64) -> String {
    if value.is_nan() {
        return "0".to_string();
    }

    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format_number_with_commas(value)
    }
}

/// Comma formatting, switching to abbreviation once the formatted string
/// gets longer than 15 characters.
pub fn format_token_amount(value: f64) -> String {
    let formatted = format_number_with_commas(value);
    if formatted.len() > 15 {
        return format_large_number(value);
    }
    formatted
}

/// Removes comma separators from a formatted number string.
pub fn remove_commas(value: &str) -> String {
    value.replace(',', "")
}

/// Validates that a string represents a valid positive number. The empty
/// string is accepted (an amount the user has not typed yet).
pub fn is_valid_positive_number(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    match value.parse::<f64>() {
        Ok(num) => num.is_finite() && num > 0.0,
        Err(_) => false,
    }
}

fn group_thousands(integer_part: &str) -> String {
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}
