//! Normalization of free-text amounts into [`Decimal`]s.
//!
//! Currency entry arrives as text such as `"₦1,200,000"` or `" 450 000 "`.
//! Everything except digits and the decimal point is stripped, so a parsed
//! amount is never negative.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

impl ParseAmountError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Strips currency symbols, separators, signs and whitespace.
fn normalize_amount_input(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Parses a currency string into a [`Decimal`].
///
/// Empty input (after stripping) is treated as 0.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::input::parse_amount;
///
/// assert_eq!(parse_amount("₦1,200,000").unwrap(), dec!(1200000));
/// assert_eq!(parse_amount("").unwrap(), dec!(0));
/// assert!(parse_amount("1.2.3").is_err());
/// ```
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e: rust_decimal::Error| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_strips_thousands_separators_and_symbol() {
        assert_eq!(parse_amount("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("₦1,234,567.89").unwrap(), dec!(1234567.89));
        assert_eq!(parse_amount("NGN 450 000").unwrap(), dec!(450000));
    }

    #[test]
    fn parse_amount_drops_sign() {
        assert_eq!(parse_amount("-5,000").unwrap(), dec!(5000));
    }

    #[test]
    fn parse_amount_empty_treated_as_zero() {
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("   ").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("abc").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_rejects_multiple_points() {
        let err = parse_amount("1.000.000").unwrap_err();

        assert_eq!(err.input(), "1.000.000");
    }

    #[test]
    fn parse_amount_rejects_values_beyond_decimal_range() {
        let err = parse_amount("₦999,999,999,999,999,999,999,999,999,999").unwrap_err();

        assert_eq!(err.input(), "₦999,999,999,999,999,999,999,999,999,999");
    }
}
