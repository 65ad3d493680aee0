use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One band of a progressive schedule.
///
/// Income above `min_income` and up to and including `max_income` is taxed
/// at `tax_rate`. A `max_income` of `None` marks the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }
}

/// Reasons an ordered bracket list is not a valid progressive schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketScheduleError {
    #[error("schedule has no brackets")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    NonZeroStart(Decimal),

    #[error("bracket rate must be between 0 and 1, got {0}")]
    InvalidRate(Decimal),

    #[error("bracket {min} - {max} has an upper bound that is not above its lower bound")]
    EmptyRange { min: Decimal, max: Decimal },

    #[error("bracket starting at {found} does not continue from previous upper bound {expected}")]
    NotContiguous { expected: Decimal, found: Decimal },

    #[error("only the last bracket may be unbounded (bracket starting at {0})")]
    UnboundedBeforeEnd(Decimal),

    #[error("last bracket must be unbounded, ends at {0}")]
    BoundedTop(Decimal),

    #[error("rate {found} starting at {at} is lower than previous rate {previous}")]
    DecreasingRate {
        at: Decimal,
        previous: Decimal,
        found: Decimal,
    },
}

/// Checks that `brackets` forms a progressive schedule.
///
/// The list must start at zero, each bracket must begin where the previous
/// one ended, rates must lie in `[0, 1]` and never decrease, and exactly the
/// last bracket must be unbounded.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{BracketScheduleError, TaxBracket, validate_brackets};
///
/// let brackets = vec![
///     TaxBracket::new(dec!(0), Some(dec!(50000)), dec!(0.10)),
///     TaxBracket::new(dec!(50000), None, dec!(0.20)),
/// ];
/// assert_eq!(validate_brackets(&brackets), Ok(()));
///
/// let gap = vec![
///     TaxBracket::new(dec!(0), Some(dec!(50000)), dec!(0.10)),
///     TaxBracket::new(dec!(50000.01), None, dec!(0.20)),
/// ];
/// assert!(matches!(
///     validate_brackets(&gap),
///     Err(BracketScheduleError::NotContiguous { .. })
/// ));
/// ```
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), BracketScheduleError> {
    let first = brackets.first().ok_or(BracketScheduleError::Empty)?;
    if !first.min_income.is_zero() {
        return Err(BracketScheduleError::NonZeroStart(first.min_income));
    }

    let mut previous: Option<&TaxBracket> = None;
    for bracket in brackets {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
            return Err(BracketScheduleError::InvalidRate(bracket.tax_rate));
        }
        if let Some(max) = bracket.max_income {
            if max <= bracket.min_income {
                return Err(BracketScheduleError::EmptyRange {
                    min: bracket.min_income,
                    max,
                });
            }
        }

        if let Some(prev) = previous {
            let Some(prev_max) = prev.max_income else {
                return Err(BracketScheduleError::UnboundedBeforeEnd(prev.min_income));
            };
            if bracket.min_income != prev_max {
                return Err(BracketScheduleError::NotContiguous {
                    expected: prev_max,
                    found: bracket.min_income,
                });
            }
            if bracket.tax_rate < prev.tax_rate {
                return Err(BracketScheduleError::DecreasingRate {
                    at: bracket.min_income,
                    previous: prev.tax_rate,
                    found: bracket.tax_rate,
                });
            }
        }
        previous = Some(bracket);
    }

    match previous.and_then(|last| last.max_income) {
        Some(max) => Err(BracketScheduleError::BoundedTop(max)),
        None => Ok(()),
    }
}
