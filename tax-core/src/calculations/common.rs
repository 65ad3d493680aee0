//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used across the calculators
//! and the formatting helpers, such as rounding to cents.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Divides `numerator` by `denominator`, returning zero for a zero
/// denominator.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::ratio_or_zero;
///
/// assert_eq!(ratio_or_zero(dec!(25), dec!(100)), dec!(0.25));
/// assert_eq!(ratio_or_zero(dec!(25), dec!(0)), dec!(0));
/// ```
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}
