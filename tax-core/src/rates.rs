//! Immutable rate-table store.
//!
//! [`RateTables`] maps `(tax_year, Jurisdiction)` to a progressive bracket
//! list for personal income and to a [`CorporateRates`] set for corporate
//! income. Tables are assembled once through [`RateTablesBuilder`], which
//! validates every schedule on the way in, and are read-only afterwards so a
//! single store can be shared freely between callers.
//!
//! Calculators never look anything up themselves. Callers resolve a
//! [`PersonalSchedule`] or [`CorporateSchedule`] for a year and province
//! first; that lookup is the only place an unsupported key can surface.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    BracketScheduleError, CorporateRates, Jurisdiction, ProvinceCode, TaxBracket,
    validate_brackets,
};

/// Errors raised while assembling a [`RateTables`] store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTablesError {
    #[error("invalid {jurisdiction} bracket schedule for {tax_year}: {source}")]
    InvalidSchedule {
        tax_year: i32,
        jurisdiction: Jurisdiction,
        #[source]
        source: BracketScheduleError,
    },

    #[error("duplicate {jurisdiction} bracket schedule for {tax_year}")]
    DuplicateSchedule {
        tax_year: i32,
        jurisdiction: Jurisdiction,
    },

    #[error("duplicate {jurisdiction} corporate rates for {tax_year}")]
    DuplicateCorporateRates {
        tax_year: i32,
        jurisdiction: Jurisdiction,
    },

    #[error("invalid {jurisdiction} corporate rates for {tax_year}: {reason}")]
    InvalidCorporateRates {
        tax_year: i32,
        jurisdiction: Jurisdiction,
        reason: String,
    },
}

type TableKey = (i32, Jurisdiction);

/// Read-only personal and corporate rate tables keyed by year and
/// jurisdiction.
#[derive(Debug, Clone, Default)]
pub struct RateTables {
    personal: HashMap<TableKey, Vec<TaxBracket>>,
    corporate: HashMap<TableKey, CorporateRates>,
}

/// Federal and provincial bracket lists for one year and province.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalSchedule<'a> {
    pub tax_year: i32,
    pub province: ProvinceCode,
    pub federal: &'a [TaxBracket],
    pub provincial: &'a [TaxBracket],
}

/// Federal and provincial corporate rates for one year and province.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorporateSchedule {
    pub tax_year: i32,
    pub province: ProvinceCode,
    pub federal: CorporateRates,
    pub provincial: CorporateRates,
}

impl RateTables {
    pub fn builder() -> RateTablesBuilder {
        RateTablesBuilder::default()
    }

    pub fn brackets(
        &self,
        tax_year: i32,
        jurisdiction: Jurisdiction,
    ) -> Option<&[TaxBracket]> {
        self.personal
            .get(&(tax_year, jurisdiction))
            .map(Vec::as_slice)
    }

    pub fn corporate_rates(
        &self,
        tax_year: i32,
        jurisdiction: Jurisdiction,
    ) -> Option<CorporateRates> {
        self.corporate.get(&(tax_year, jurisdiction)).copied()
    }

    /// Resolves the federal and provincial bracket lists for a personal
    /// calculation. Returns `None` if either half is missing.
    pub fn personal_schedule(
        &self,
        tax_year: i32,
        province: ProvinceCode,
    ) -> Option<PersonalSchedule<'_>> {
        Some(PersonalSchedule {
            tax_year,
            province,
            federal: self.brackets(tax_year, Jurisdiction::Federal)?,
            provincial: self.brackets(tax_year, Jurisdiction::Provincial(province))?,
        })
    }

    /// Resolves the federal and provincial corporate rates. Returns `None`
    /// if either half is missing.
    pub fn corporate_schedule(
        &self,
        tax_year: i32,
        province: ProvinceCode,
    ) -> Option<CorporateSchedule> {
        Some(CorporateSchedule {
            tax_year,
            province,
            federal: self.corporate_rates(tax_year, Jurisdiction::Federal)?,
            provincial: self.corporate_rates(tax_year, Jurisdiction::Provincial(province))?,
        })
    }

    /// Every tax year with at least one table, ascending.
    pub fn supported_years(&self) -> Vec<i32> {
        self.keys()
            .map(|(year, _)| year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every province with at least one table, in code order.
    pub fn supported_provinces(&self) -> Vec<ProvinceCode> {
        self.keys()
            .filter_map(|(_, jurisdiction)| match jurisdiction {
                Jurisdiction::Provincial(code) => Some(code),
                Jurisdiction::Federal => None,
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.personal.is_empty() && self.corporate.is_empty()
    }

    fn keys(&self) -> impl Iterator<Item = TableKey> + '_ {
        self.personal
            .keys()
            .chain(self.corporate.keys())
            .copied()
    }
}

/// Collects and validates schedules before freezing them into a
/// [`RateTables`].
#[derive(Debug, Default)]
pub struct RateTablesBuilder {
    tables: RateTables,
}

impl RateTablesBuilder {
    /// Adds a personal bracket schedule.
    ///
    /// # Errors
    ///
    /// Returns [`RateTablesError::InvalidSchedule`] if the brackets do not
    /// form a progressive schedule and
    /// [`RateTablesError::DuplicateSchedule`] if one is already registered
    /// for the same year and jurisdiction.
    pub fn personal(
        mut self,
        tax_year: i32,
        jurisdiction: Jurisdiction,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, RateTablesError> {
        validate_brackets(&brackets).map_err(|source| RateTablesError::InvalidSchedule {
            tax_year,
            jurisdiction,
            source,
        })?;

        if self.tables.personal.contains_key(&(tax_year, jurisdiction)) {
            return Err(RateTablesError::DuplicateSchedule {
                tax_year,
                jurisdiction,
            });
        }
        self.tables
            .personal
            .insert((tax_year, jurisdiction), brackets);
        Ok(self)
    }

    /// Adds a corporate rate set.
    ///
    /// # Errors
    ///
    /// Returns [`RateTablesError::InvalidCorporateRates`] if a rate is
    /// outside `[0, 1]` or the business limit is negative, and
    /// [`RateTablesError::DuplicateCorporateRates`] on a repeated key.
    pub fn corporate(
        mut self,
        tax_year: i32,
        jurisdiction: Jurisdiction,
        rates: CorporateRates,
    ) -> Result<Self, RateTablesError> {
        let invalid = |reason: String| RateTablesError::InvalidCorporateRates {
            tax_year,
            jurisdiction,
            reason,
        };
        for (label, rate) in [
            ("general", rates.general),
            ("small business", rates.small_business),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(invalid(format!(
                    "{label} rate must be between 0 and 1, got {rate}"
                )));
            }
        }
        if rates.business_limit < Decimal::ZERO {
            return Err(invalid(format!(
                "business limit must be non-negative, got {}",
                rates.business_limit
            )));
        }

        if self.tables.corporate.contains_key(&(tax_year, jurisdiction)) {
            return Err(RateTablesError::DuplicateCorporateRates {
                tax_year,
                jurisdiction,
            });
        }
        self.tables
            .corporate
            .insert((tax_year, jurisdiction), rates);
        Ok(self)
    }

    pub fn build(self) -> RateTables {
        self.tables
    }
}
