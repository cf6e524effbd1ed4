//! Common utility functions for tax calculations.
//!
//! Rounding to the kobo, flooring subtractions at zero, and the small amount
//! of text formatting the breakdown labels need.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Subtracts `b` from `a`, flooring the result at zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::saturating_sub;
///
/// assert_eq!(saturating_sub(dec!(500.00), dec!(200.00)), dec!(300.00));
/// assert_eq!(saturating_sub(dec!(200.00), dec!(500.00)), dec!(0));
/// ```
pub fn saturating_sub(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    (a - b).max(Decimal::ZERO)
}

/// Formats an amount as naira with thousands separators.
///
/// Whole amounts drop the kobo; anything else is shown to two places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::format_naira;
///
/// assert_eq!(format_naira(dec!(3200000)), "₦3,200,000");
/// assert_eq!(format_naira(dec!(1234.5)), "₦1,234.50");
/// ```
pub fn format_naira(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text.as_str(), ""),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction.chars().all(|c| c == '0') {
        format!("{sign}₦{grouped}")
    } else {
        format!("{sign}₦{grouped}.{fraction:0<2}")
    }
}

/// Formats a fractional rate as a percentage, e.g. `0.07` as `7%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
