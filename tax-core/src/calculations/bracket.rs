//! Progressive bracket calculation.
//!
//! Each bracket taxes the slice of income above its `min_income` and up to
//! its `max_income`. Income sitting exactly on a bracket's upper bound stays
//! in that bracket, so the marginal rate at a boundary is the lower rate.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxBracket;
//! use tax_core::calculations::calculate_bracket_tax;
//!
//! let brackets = vec![
//!     TaxBracket::new(dec!(0), Some(dec!(50000)), dec!(0.10)),
//!     TaxBracket::new(dec!(50000), Some(dec!(100000)), dec!(0.20)),
//!     TaxBracket::new(dec!(100000), None, dec!(0.30)),
//! ];
//!
//! let result = calculate_bracket_tax(dec!(75000), &brackets);
//!
//! assert_eq!(result.tax, dec!(10000));
//! assert_eq!(result.marginal_rate, dec!(0.20));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxBracket;

/// Tax owed under one schedule and the rate on the last dollar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTaxResult {
    pub tax: Decimal,

    /// Rate of the highest bracket the income reached, or zero when no
    /// bracket was touched.
    pub marginal_rate: Decimal,
}

/// Applies a progressive schedule to `income`.
///
/// `brackets` must be sorted ascending by `min_income`, as guaranteed by
/// [`validate_brackets`](crate::validate_brackets). Iteration stops at the
/// first bracket whose upper bound covers the income.
pub fn calculate_bracket_tax(
    income: Decimal,
    brackets: &[TaxBracket],
) -> BracketTaxResult {
    let mut tax = Decimal::ZERO;
    let mut marginal_rate = Decimal::ZERO;

    for bracket in brackets {
        if income > bracket.min_income {
            let upper = match bracket.max_income {
                Some(max) => income.min(max),
                None => income,
            };
            tax += (upper - bracket.min_income) * bracket.tax_rate;
            marginal_rate = bracket.tax_rate;
        }

        if bracket.max_income.is_none_or(|max| income <= max) {
            break;
        }
    }

    BracketTaxResult { tax, marginal_rate }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn simple_brackets() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(dec!(0), Some(dec!(50000)), dec!(0.10)),
            TaxBracket::new(dec!(50000), Some(dec!(100000)), dec!(0.20)),
            TaxBracket::new(dec!(100000), None, dec!(0.30)),
        ]
    }

    /// Reference implementation: scans every bracket without stopping early.
    fn full_scan(
        income: Decimal,
        brackets: &[TaxBracket],
    ) -> BracketTaxResult {
        let mut tax = Decimal::ZERO;
        let mut marginal_rate = Decimal::ZERO;
        for bracket in brackets {
            if income > bracket.min_income {
                let upper = bracket.max_income.map_or(income, |max| income.min(max));
                tax += (upper - bracket.min_income) * bracket.tax_rate;
                marginal_rate = bracket.tax_rate;
            }
        }
        BracketTaxResult { tax, marginal_rate }
    }

    #[test]
    fn income_in_first_bracket_only() {
        let result = calculate_bracket_tax(dec!(30000), &simple_brackets());

        assert_eq!(result.tax, dec!(3000));
        assert_eq!(result.marginal_rate, dec!(0.10));
    }

    #[test]
    fn income_spanning_two_brackets() {
        let result = calculate_bracket_tax(dec!(75000), &simple_brackets());

        assert_eq!(result.tax, dec!(10000));
        assert_eq!(result.marginal_rate, dec!(0.20));
    }

    #[test]
    fn income_spanning_all_brackets() {
        let result = calculate_bracket_tax(dec!(150000), &simple_brackets());

        assert_eq!(result.tax, dec!(30000));
        assert_eq!(result.marginal_rate, dec!(0.30));
    }

    #[test]
    fn zero_income_touches_no_bracket() {
        let result = calculate_bracket_tax(Decimal::ZERO, &simple_brackets());

        assert_eq!(
            result,
            BracketTaxResult {
                tax: Decimal::ZERO,
                marginal_rate: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn boundary_income_belongs_to_lower_bracket() {
        let brackets = simple_brackets();

        for bracket in &brackets {
            let Some(max) = bracket.max_income else {
                continue;
            };
            let result = calculate_bracket_tax(max, &brackets);
            assert_eq!(
                result.marginal_rate, bracket.tax_rate,
                "income {max} should be taxed at the lower bracket's rate"
            );
        }
    }

    #[test]
    fn boundary_income_tax_is_exact() {
        let result = calculate_bracket_tax(dec!(50000), &simple_brackets());

        assert_eq!(result.tax, dec!(5000));
    }

    #[test]
    fn one_cent_over_boundary_moves_to_next_bracket() {
        let result = calculate_bracket_tax(dec!(50000.01), &simple_brackets());

        assert_eq!(result.marginal_rate, dec!(0.20));
        assert_eq!(result.tax, dec!(5000.002));
    }

    #[test]
    fn empty_schedule_yields_zero() {
        let result = calculate_bracket_tax(dec!(1000), &[]);

        assert_eq!(result.tax, Decimal::ZERO);
        assert_eq!(result.marginal_rate, Decimal::ZERO);
    }

    #[test]
    fn tax_is_non_negative_and_non_decreasing() {
        let brackets = simple_brackets();
        let mut previous = Decimal::ZERO;

        for step in 0..=120 {
            let income = Decimal::from(step * 1_250);
            let result = calculate_bracket_tax(income, &brackets);

            assert!(result.tax >= Decimal::ZERO);
            assert!(
                result.tax >= previous,
                "tax decreased at income {income}: {} < {previous}",
                result.tax
            );
            previous = result.tax;
        }
    }

    #[test]
    fn short_circuit_matches_full_scan() {
        let brackets = simple_brackets();

        for income in [
            dec!(0),
            dec!(0.01),
            dec!(49999.99),
            dec!(50000),
            dec!(99999.99),
            dec!(100000),
            dec!(100000.01),
            dec!(1000000),
        ] {
            assert_eq!(
                calculate_bracket_tax(income, &brackets),
                full_scan(income, &brackets)
            );
        }
    }
}
