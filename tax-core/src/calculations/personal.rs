//! Combined federal and provincial personal income tax.
//!
//! Both levels are computed independently with
//! [`calculate_bracket_tax`] and then added together. Marginal rates are
//! summed as well; there is no blended bracket.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ProvinceCode;
use crate::calculations::bracket::calculate_bracket_tax;
use crate::calculations::common::ratio_or_zero;
use crate::rates::PersonalSchedule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalTaxBreakdown {
    pub federal_tax: Decimal,
    pub federal_marginal_rate: Decimal,
    pub provincial_tax: Decimal,
    pub provincial_marginal_rate: Decimal,
}

/// Result of a personal tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalTaxResult {
    pub province: ProvinceCode,
    pub tax_year: i32,
    pub income: Decimal,

    /// Sum of the federal and provincial marginal rates.
    pub marginal_rate: Decimal,

    /// `total_tax / income`, or zero for zero income.
    pub effective_rate: Decimal,

    pub total_tax: Decimal,
    pub breakdown: PersonalTaxBreakdown,
}

/// Calculates personal income tax for `income` under `schedule`.
///
/// `income` is expected to be non-negative; the request boundary rejects
/// anything else before a schedule is resolved.
pub fn calculate_personal_tax(
    income: Decimal,
    schedule: &PersonalSchedule<'_>,
) -> PersonalTaxResult {
    let federal = calculate_bracket_tax(income, schedule.federal);
    let provincial = calculate_bracket_tax(income, schedule.provincial);

    let total_tax = federal.tax + provincial.tax;
    let marginal_rate = federal.marginal_rate + provincial.marginal_rate;
    let effective_rate = ratio_or_zero(total_tax, income);

    debug!(
        %income,
        tax_year = schedule.tax_year,
        province = %schedule.province,
        %total_tax,
        %marginal_rate,
        "personal tax calculated"
    );

    PersonalTaxResult {
        province: schedule.province,
        tax_year: schedule.tax_year,
        income,
        marginal_rate,
        effective_rate,
        total_tax,
        breakdown: PersonalTaxBreakdown {
            federal_tax: federal.tax,
            federal_marginal_rate: federal.marginal_rate,
            provincial_tax: provincial.tax,
            provincial_marginal_rate: provincial.marginal_rate,
        },
    }
}
