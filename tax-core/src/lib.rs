pub mod calculations;
pub mod format;
pub mod models;
pub mod rates;

pub use models::*;
pub use rates::{CorporateSchedule, PersonalSchedule, RateTables, RateTablesBuilder, RateTablesError};
