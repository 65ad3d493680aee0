//! Static federal and provincial rate tables and the CSV loader that turns
//! them into a [`RateTables`] store.

mod loader;

pub use loader::{BracketRecord, CorporateRateRecord, RateTableLoader, RateTableLoaderError};
use tax_core::RateTables;

/// Personal income tax brackets shipped with the crate.
pub const PERSONAL_BRACKETS_CSV: &str = include_str!("../data/personal_brackets.csv");

/// Corporate income tax rates shipped with the crate.
pub const CORPORATE_RATES_CSV: &str = include_str!("../data/corporate_rates.csv");

/// Builds the store from the shipped tables. Call once at startup and share
/// the result.
pub fn load_builtin() -> Result<RateTables, RateTableLoaderError> {
    RateTableLoader::load(
        PERSONAL_BRACKETS_CSV.as_bytes(),
        CORPORATE_RATES_CSV.as_bytes(),
    )
}
