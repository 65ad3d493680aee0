//! Display helpers for money and rates.
//!
//! These render values for people to read and are never parsed back or
//! compared numerically.

use rust_decimal::Decimal;

use crate::ProvinceCode;
use crate::calculations::common::round_half_up;

/// Currency rendering conventions for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyLocale {
    pub symbol: &'static str,
    pub group_separator: char,
    pub decimal_separator: char,
    pub symbol_first: bool,
}

impl CurrencyLocale {
    /// `$1,234.56`
    pub const EN_CA: Self = Self {
        symbol: "$",
        group_separator: ',',
        decimal_separator: '.',
        symbol_first: true,
    };

    /// `1 234,56 $` with non-breaking spaces.
    pub const FR_CA: Self = Self {
        symbol: "$",
        group_separator: '\u{a0}',
        decimal_separator: ',',
        symbol_first: false,
    };

    pub fn for_province(province: ProvinceCode) -> Self {
        match province {
            ProvinceCode::Quebec => Self::FR_CA,
            _ => Self::EN_CA,
        }
    }
}

impl Default for CurrencyLocale {
    fn default() -> Self {
        Self::EN_CA
    }
}

/// Formats `amount` as Canadian dollars in the English convention.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format::format_currency;
///
/// assert_eq!(format_currency(dec!(1000)), "$1,000.00");
/// assert_eq!(format_currency(dec!(123456.785)), "$123,456.79");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    format_currency_in(amount, &CurrencyLocale::EN_CA)
}

/// Formats `amount` rounded half-up to cents, with thousands separators and
/// the currency symbol placed per `locale`.
pub fn format_currency_in(
    amount: Decimal,
    locale: &CurrencyLocale,
) -> String {
    let rounded = round_half_up(amount);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut number = String::with_capacity(digits.len() + whole.len() / 3 + 1);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            number.push(locale.group_separator);
        }
        number.push(ch);
    }
    number.push(locale.decimal_separator);
    number.push_str(cents);

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    if locale.symbol_first {
        format!("{sign}{}{number}", locale.symbol)
    } else {
        format!("{sign}{number}\u{a0}{}", locale.symbol)
    }
}

/// Formats a `0..=1` fraction as a percentage with two decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format::format_percent;
///
/// assert_eq!(format_percent(dec!(0.122)), "12.20%");
/// ```
pub fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", round_half_up(rate * Decimal::ONE_HUNDRED))
}
