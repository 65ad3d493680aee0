mod corporate_rates;
mod jurisdiction;
mod tax_bracket;
mod tax_type;

pub use corporate_rates::{CorporateRates, CorporateRegime};
pub use jurisdiction::{Jurisdiction, ProvinceCode};
pub use tax_bracket::{BracketScheduleError, TaxBracket, validate_brackets};
pub use tax_type::TaxType;
