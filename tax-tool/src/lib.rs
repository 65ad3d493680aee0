pub mod config;
pub mod logging;
pub mod report;
pub mod request;
pub mod tool;

pub use config::{ConfigError, ToolConfig};
pub use report::{CorporateTaxReport, PersonalTaxReport, TaxReport};
pub use request::{TaxRateRequest, ValidatedRequest, ValidationError};
pub use tool::{TaxRateTool, ToolFailure, ToolResponse, ToolSuccess};
