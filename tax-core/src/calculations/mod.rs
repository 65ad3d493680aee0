//! Tax calculation modules.
//!
//! This module provides the progressive bracket engine and the personal and
//! corporate combiners built on top of it. Every function here is total over
//! validated input and has no error path.

pub mod bracket;
pub mod common;
pub mod corporate;
pub mod personal;

pub use bracket::{BracketTaxResult, calculate_bracket_tax};
pub use corporate::{CorporateTaxBreakdown, CorporateTaxResult, calculate_corporate_tax};
pub use personal::{PersonalTaxBreakdown, PersonalTaxResult, calculate_personal_tax};
