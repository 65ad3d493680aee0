use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat corporate rates for one jurisdiction and year.
///
/// Income at or below `business_limit` is taxed at `small_business`,
/// anything above it at `general`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateRates {
    pub general: Decimal,
    pub small_business: Decimal,
    pub business_limit: Decimal,
}

impl CorporateRates {
    pub fn rate_for(
        &self,
        regime: CorporateRegime,
    ) -> Decimal {
        match regime {
            CorporateRegime::SmallBusiness => self.small_business,
            CorporateRegime::General => self.general,
        }
    }
}

/// Which of the two flat corporate rates applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorporateRegime {
    SmallBusiness,
    General,
}

impl CorporateRegime {
    /// Selects the regime for `income` against `business_limit`.
    ///
    /// The limit itself belongs to the small business regime.
    pub fn for_income(
        income: Decimal,
        business_limit: Decimal,
    ) -> Self {
        if income <= business_limit {
            Self::SmallBusiness
        } else {
            Self::General
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmallBusiness => "small_business",
            Self::General => "general",
        }
    }
}

impl fmt::Display for CorporateRegime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
