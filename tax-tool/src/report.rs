//! Presentation layer for calculation results.
//!
//! The calculators in `tax-core` return numbers only. This module pairs each
//! number with a human-readable rendering in the province's currency locale,
//! which is what the tool hands back to an agent or prints on the CLI.

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::calculations::{CorporateTaxResult, PersonalTaxResult};
use tax_core::format::{CurrencyLocale, format_currency_in, format_percent};
use tax_core::{CorporateRegime, ProvinceCode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalBreakdownReport {
    #[serde(with = "rust_decimal::serde::float")]
    pub federal_tax: Decimal,
    pub federal_tax_formatted: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub federal_marginal_rate: Decimal,
    pub federal_marginal_rate_formatted: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub provincial_tax: Decimal,
    pub provincial_tax_formatted: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub provincial_marginal_rate: Decimal,
    pub provincial_marginal_rate_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalTaxReport {
    pub province: ProvinceCode,
    pub tax_year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    pub income_formatted: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub marginal_rate: Decimal,
    pub marginal_rate_formatted: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub effective_rate: Decimal,
    pub effective_rate_formatted: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,
    pub total_tax_formatted: String,
    pub breakdown: PersonalBreakdownReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorporateBreakdownReport {
    #[serde(with = "rust_decimal::serde::float")]
    pub federal_tax: Decimal,
    pub federal_tax_formatted: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub provincial_tax: Decimal,
    pub provincial_tax_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorporateTaxReport {
    pub province: ProvinceCode,
    pub tax_year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    pub income_formatted: String,
    pub regime: CorporateRegime,
    pub regime_description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub combined_rate: Decimal,
    pub combined_rate_formatted: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub federal_rate: Decimal,
    pub federal_rate_formatted: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub provincial_rate: Decimal,
    pub provincial_rate_formatted: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_payable: Decimal,
    pub tax_payable_formatted: String,
    pub breakdown: CorporateBreakdownReport,
    #[serde(with = "rust_decimal::serde::float")]
    pub business_limit: Decimal,
    pub business_limit_formatted: String,
}

/// A calculation result ready for display, tagged by tax type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaxReport {
    Personal(PersonalTaxReport),
    Corporate(CorporateTaxReport),
}

impl From<&PersonalTaxResult> for PersonalTaxReport {
    fn from(result: &PersonalTaxResult) -> Self {
        let locale = CurrencyLocale::for_province(result.province);
        let money = |amount: Decimal| format_currency_in(amount, &locale);
        let b = &result.breakdown;

        Self {
            province: result.province,
            tax_year: result.tax_year,
            income: result.income,
            income_formatted: money(result.income),
            marginal_rate: result.marginal_rate,
            marginal_rate_formatted: format_percent(result.marginal_rate),
            effective_rate: result.effective_rate,
            effective_rate_formatted: format_percent(result.effective_rate),
            total_tax: result.total_tax,
            total_tax_formatted: money(result.total_tax),
            breakdown: PersonalBreakdownReport {
                federal_tax: b.federal_tax,
                federal_tax_formatted: money(b.federal_tax),
                federal_marginal_rate: b.federal_marginal_rate,
                federal_marginal_rate_formatted: format_percent(b.federal_marginal_rate),
                provincial_tax: b.provincial_tax,
                provincial_tax_formatted: money(b.provincial_tax),
                provincial_marginal_rate: b.provincial_marginal_rate,
                provincial_marginal_rate_formatted: format_percent(b.provincial_marginal_rate),
            },
        }
    }
}

impl From<&CorporateTaxResult> for CorporateTaxReport {
    fn from(result: &CorporateTaxResult) -> Self {
        let locale = CurrencyLocale::for_province(result.province);
        let money = |amount: Decimal| format_currency_in(amount, &locale);
        let limit = money(result.business_limit);

        let regime_description = match result.regime {
            CorporateRegime::SmallBusiness => format!(
                "Small Business Deduction applies (income ≤ {limit} business limit)"
            ),
            CorporateRegime::General => {
                format!("General corporate rate applies (income > {limit} business limit)")
            }
        };

        Self {
            province: result.province,
            tax_year: result.tax_year,
            income: result.income,
            income_formatted: money(result.income),
            regime: result.regime,
            regime_description,
            combined_rate: result.combined_rate,
            combined_rate_formatted: format_percent(result.combined_rate),
            federal_rate: result.federal_rate,
            federal_rate_formatted: format_percent(result.federal_rate),
            provincial_rate: result.provincial_rate,
            provincial_rate_formatted: format_percent(result.provincial_rate),
            tax_payable: result.tax_payable,
            tax_payable_formatted: money(result.tax_payable),
            breakdown: CorporateBreakdownReport {
                federal_tax: result.breakdown.federal_tax,
                federal_tax_formatted: money(result.breakdown.federal_tax),
                provincial_tax: result.breakdown.provincial_tax,
                provincial_tax_formatted: money(result.breakdown.provincial_tax),
            },
            business_limit: result.business_limit,
            business_limit_formatted: limit,
        }
    }
}

impl From<&PersonalTaxResult> for TaxReport {
    fn from(result: &PersonalTaxResult) -> Self {
        Self::Personal(result.into())
    }
}

impl From<&CorporateTaxResult> for TaxReport {
    fn from(result: &CorporateTaxResult) -> Self {
        Self::Corporate(result.into())
    }
}
