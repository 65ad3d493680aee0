//! Corporate income tax under the two flat-rate regimes.
//!
//! The provincial business limit selects the regime for the whole income:
//! at or below the limit both levels apply their small business rate, above
//! it both apply the general rate. Crossing the limit changes the rate on
//! every dollar, not just the excess.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rates::CorporateSchedule;
use crate::{CorporateRegime, ProvinceCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTaxBreakdown {
    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,
}

/// Result of a corporate tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTaxResult {
    pub province: ProvinceCode,
    pub tax_year: i32,
    pub income: Decimal,
    pub regime: CorporateRegime,
    pub combined_rate: Decimal,
    pub federal_rate: Decimal,
    pub provincial_rate: Decimal,
    pub tax_payable: Decimal,
    pub breakdown: CorporateTaxBreakdown,
    pub business_limit: Decimal,
}

/// Calculates corporate income tax for `income` under `schedule`.
pub fn calculate_corporate_tax(
    income: Decimal,
    schedule: &CorporateSchedule,
) -> CorporateTaxResult {
    let business_limit = schedule.provincial.business_limit;
    let regime = CorporateRegime::for_income(income, business_limit);

    let federal_rate = schedule.federal.rate_for(regime);
    let provincial_rate = schedule.provincial.rate_for(regime);
    let combined_rate = federal_rate + provincial_rate;

    let tax_payable = income * combined_rate;

    debug!(
        %income,
        tax_year = schedule.tax_year,
        province = %schedule.province,
        %regime,
        %combined_rate,
        "corporate tax calculated"
    );

    CorporateTaxResult {
        province: schedule.province,
        tax_year: schedule.tax_year,
        income,
        regime,
        combined_rate,
        federal_rate,
        provincial_rate,
        tax_payable,
        breakdown: CorporateTaxBreakdown {
            federal_tax: income * federal_rate,
            provincial_tax: income * provincial_rate,
        },
        business_limit,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::CorporateRates;

    fn schedule() -> CorporateSchedule {
        CorporateSchedule {
            tax_year: 2025,
            province: ProvinceCode::Ontario,
            federal: CorporateRates {
                general: dec!(0.15),
                small_business: dec!(0.09),
                business_limit: dec!(500000),
            },
            provincial: CorporateRates {
                general: dec!(0.115),
                small_business: dec!(0.032),
                business_limit: dec!(500000),
            },
        }
    }

    #[test]
    fn small_business_rates_below_limit() {
        let result = calculate_corporate_tax(dec!(400000), &schedule());

        assert_eq!(result.regime, CorporateRegime::SmallBusiness);
        assert_eq!(result.federal_rate, dec!(0.09));
        assert_eq!(result.provincial_rate, dec!(0.032));
        assert_eq!(result.combined_rate, dec!(0.122));
        assert_eq!(result.tax_payable, dec!(48800));
    }

    #[test]
    fn general_rates_above_limit() {
        let result = calculate_corporate_tax(dec!(600000), &schedule());

        assert_eq!(result.regime, CorporateRegime::General);
        assert_eq!(result.combined_rate, dec!(0.265));
        assert_eq!(result.tax_payable, dec!(159000));
    }

    #[test]
    fn limit_itself_is_small_business() {
        let result = calculate_corporate_tax(dec!(500000), &schedule());

        assert_eq!(result.regime, CorporateRegime::SmallBusiness);
    }

    #[test]
    fn one_dollar_over_limit_is_general() {
        let result = calculate_corporate_tax(dec!(500001), &schedule());

        assert_eq!(result.regime, CorporateRegime::General);
    }

    #[test]
    fn general_rate_applies_to_entire_income() {
        let result = calculate_corporate_tax(dec!(500001), &schedule());

        assert_eq!(result.tax_payable, dec!(500001) * dec!(0.265));
    }

    #[test]
    fn breakdown_sums_to_tax_payable() {
        let result = calculate_corporate_tax(dec!(123456.78), &schedule());

        assert_eq!(
            result.breakdown.federal_tax + result.breakdown.provincial_tax,
            result.tax_payable
        );
    }

    #[test]
    fn regime_uses_provincial_business_limit() {
        let mut schedule = schedule();
        schedule.provincial.business_limit = dec!(600000);

        let result = calculate_corporate_tax(dec!(550000), &schedule);

        assert_eq!(result.regime, CorporateRegime::SmallBusiness);
        assert_eq!(result.business_limit, dec!(600000));
    }

    #[test]
    fn zero_income_owes_nothing() {
        let result = calculate_corporate_tax(Decimal::ZERO, &schedule());

        assert_eq!(result.regime, CorporateRegime::SmallBusiness);
        assert_eq!(result.tax_payable, Decimal::ZERO);
    }
}
