//! Request model and validation for the `get_tax_rate` tool.
//!
//! Validation runs in a fixed order (jurisdiction, tax year, income) and
//! stops at the first problem. Each failure carries the values that would
//! have been accepted so the caller can relay them to the end user.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use tax_core::{CorporateSchedule, PersonalSchedule, ProvinceCode, RateTables, TaxType};
use thiserror::Error;

/// Arguments accepted by the tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRateRequest {
    #[serde(rename = "type")]
    pub tax_type: TaxType,

    /// Province code or name, e.g. `"ON"` or `"Ontario"`.
    #[serde(alias = "province")]
    pub jurisdiction: String,

    pub income_amount: f64,
    pub tax_year: i32,
}

/// Why a request was turned away.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error(
        "Unsupported jurisdiction '{given}'. Supported jurisdictions: {}",
        .supported.join(", ")
    )]
    UnsupportedJurisdiction { given: String, supported: Vec<String> },

    #[error(
        "Unsupported tax year {given}. Supported tax years: {}",
        .supported.join(", ")
    )]
    UnsupportedYear { given: i32, supported: Vec<String> },

    #[error("Invalid income amount {given}: income must be a non-negative, finite number")]
    InvalidIncome { given: f64 },

    #[error("No {tax_type} rate tables for {province} in {tax_year}")]
    MissingTables {
        tax_type: TaxType,
        province: ProvinceCode,
        tax_year: i32,
    },
}

impl ValidationError {
    /// Values the caller could have used instead.
    pub fn supported_values(&self) -> &[String] {
        match self {
            Self::UnsupportedJurisdiction { supported, .. }
            | Self::UnsupportedYear { supported, .. } => supported,
            Self::InvalidIncome { .. } | Self::MissingTables { .. } => &[],
        }
    }
}

/// A request whose keys resolved against the rate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedRequest<'a> {
    Personal {
        income: Decimal,
        schedule: PersonalSchedule<'a>,
    },
    Corporate {
        income: Decimal,
        schedule: CorporateSchedule,
    },
}

impl TaxRateRequest {
    pub fn new(
        tax_type: TaxType,
        jurisdiction: impl Into<String>,
        income_amount: f64,
        tax_year: i32,
    ) -> Self {
        Self {
            tax_type,
            jurisdiction: jurisdiction.into(),
            income_amount,
            tax_year,
        }
    }

    /// Checks the request against `tables` and resolves its schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for an unknown or unsupported
    /// jurisdiction, an unsupported year, a negative, non-finite or
    /// unrepresentable income, or a year/province pair with no tables for
    /// the requested tax type.
    pub fn validate<'a>(
        &self,
        tables: &'a RateTables,
    ) -> Result<ValidatedRequest<'a>, ValidationError> {
        let province = self.province(tables)?;

        let supported_years = tables.supported_years();
        if !supported_years.contains(&self.tax_year) {
            return Err(ValidationError::UnsupportedYear {
                given: self.tax_year,
                supported: supported_years.iter().map(ToString::to_string).collect(),
            });
        }

        let income = self.income()?;

        let missing = || ValidationError::MissingTables {
            tax_type: self.tax_type,
            province,
            tax_year: self.tax_year,
        };

        match self.tax_type {
            TaxType::Personal => Ok(ValidatedRequest::Personal {
                income,
                schedule: tables
                    .personal_schedule(self.tax_year, province)
                    .ok_or_else(missing)?,
            }),
            TaxType::Corporate => Ok(ValidatedRequest::Corporate {
                income,
                schedule: tables
                    .corporate_schedule(self.tax_year, province)
                    .ok_or_else(missing)?,
            }),
        }
    }

    fn province(
        &self,
        tables: &RateTables,
    ) -> Result<ProvinceCode, ValidationError> {
        let supported = tables.supported_provinces();
        ProvinceCode::parse(&self.jurisdiction)
            .filter(|code| supported.contains(code))
            .ok_or_else(|| ValidationError::UnsupportedJurisdiction {
                given: self.jurisdiction.clone(),
                supported: supported.iter().map(|code| code.as_str().to_string()).collect(),
            })
    }

    fn income(&self) -> Result<Decimal, ValidationError> {
        let invalid = || ValidationError::InvalidIncome {
            given: self.income_amount,
        };
        if !self.income_amount.is_finite() || self.income_amount < 0.0 {
            return Err(invalid());
        }
        Decimal::from_f64(self.income_amount)
            .map(|income| income.abs())
            .ok_or_else(invalid)
    }
}
