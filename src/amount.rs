//! Parsing of human-entered currency amounts.
//!
//! Accepts plain integers, Indian comma grouping (`5,00,000`) and the usual
//! shorthand suffixes: `k` (thousand), `l`/`lac`/`lakh` (1,00,000) and
//! `cr`/`crore` (1,00,00,000). A leading `₹` or `rs` is ignored.

use crate::errors::CogniError;
use once_cell::sync::Lazy;
use regex::Regex;

const THOUSAND: f64 = 1_000.0;
const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:₹|rs\.?|inr)?\s*(?P<num>\d[\d,]*(?:\.\d+)?|\.\d+)\s*(?P<unit>k|thousand|l|lac|lacs|lakh|lakhs|cr|crore|crores)?$",
    )
    .expect("amount pattern is a valid regex")
});

/// Parse an amount such as `"7.5 lakh"` into whole currency units.
pub fn parse_amount(text: &str) -> Result<u64, CogniError> {
    let normalized = text.trim().to_lowercase();
    let captures = AMOUNT_PATTERN
        .captures(&normalized)
        .ok_or_else(|| CogniError::input(format!("'{}' is not a valid amount", text.trim())))?;

    let digits: String = captures["num"].chars().filter(|c| *c != ',').collect();
    let number: f64 = digits
        .parse()
        .map_err(|_| CogniError::input(format!("'{}' is not a valid amount", text.trim())))?;

    let multiplier = match captures.name("unit").map(|m| m.as_str()) {
        None => 1.0,
        Some("k" | "thousand") => THOUSAND,
        Some("cr" | "crore" | "crores") => CRORE,
        Some(_) => LAKH,
    };

    let amount = (number * multiplier).round();
    if !amount.is_finite() || amount > u64::MAX as f64 {
        return Err(CogniError::input(format!("'{}' is too large", text.trim())));
    }
    Ok(amount as u64)
}

/// clap `value_parser` adapter for [`parse_amount`].
pub fn parse_amount_arg(text: &str) -> Result<u64, String> {
    parse_amount(text).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_grouped_numbers() {
        assert_eq!(parse_amount("500000").unwrap(), 500_000);
        assert_eq!(parse_amount("5,00,000").unwrap(), 500_000);
        assert_eq!(parse_amount("1,000,000").unwrap(), 1_000_000);
    }

    #[test]
    fn test_indian_suffixes() {
        assert_eq!(parse_amount("5l").unwrap(), 500_000);
        assert_eq!(parse_amount("7.5 Lakh").unwrap(), 750_000);
        assert_eq!(parse_amount("3 lacs").unwrap(), 300_000);
        assert_eq!(parse_amount("1.2cr").unwrap(), 12_000_000);
        assert_eq!(parse_amount("2 crore").unwrap(), 20_000_000);
        assert_eq!(parse_amount("50k").unwrap(), 50_000);
    }

    #[test]
    fn test_currency_prefix() {
        assert_eq!(parse_amount("₹25,000").unwrap(), 25_000);
        assert_eq!(parse_amount("Rs. 10 lakh").unwrap(), 1_000_000);
    }

    #[test]
    fn test_rejects_garbage() {
        for text in ["", "lakh", "-5000", "12 bananas", "1.2.3"] {
            assert!(parse_amount(text).is_err(), "{:?} should not parse", text);
        }
    }
}
