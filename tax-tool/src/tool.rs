//! The `get_tax_rate` tool.
//!
//! This is the boundary an agent framework calls into. Whatever comes in,
//! a [`ToolResponse`] comes out: validation problems and malformed arguments
//! are reported as `success: false` values, never as errors or panics.

use serde::Serialize;
use serde_json::{Value, json};
use tax_core::RateTables;
use tax_core::calculations::{calculate_corporate_tax, calculate_personal_tax};
use tax_data::{RateTableLoaderError, load_builtin};
use tracing::{info, warn};

use crate::report::TaxReport;
use crate::request::{TaxRateRequest, ValidatedRequest, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSuccess {
    pub success: bool,
    #[serde(flatten)]
    pub report: TaxReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolFailure {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub supported_values: Vec<String>,
}

/// Outcome of one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Success(ToolSuccess),
    Failure(ToolFailure),
}

impl ToolResponse {
    pub fn success(report: TaxReport) -> Self {
        Self::Success(ToolSuccess {
            success: true,
            report,
        })
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(ToolFailure {
            success: false,
            error: error.into(),
            supported_values: Vec::new(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn report(&self) -> Option<&TaxReport> {
        match self {
            Self::Success(success) => Some(&success.report),
            Self::Failure(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self)
            .unwrap_or_else(|e| json!({ "success": false, "error": e.to_string() }))
    }
}

impl From<ValidationError> for ToolResponse {
    fn from(error: ValidationError) -> Self {
        Self::Failure(ToolFailure {
            success: false,
            supported_values: error.supported_values().to_vec(),
            error: error.to_string(),
        })
    }
}

/// Personal and corporate tax-rate calculator exposed as a tool.
#[derive(Debug, Clone)]
pub struct TaxRateTool {
    tables: RateTables,
}

impl TaxRateTool {
    pub const NAME: &'static str = "get_tax_rate";

    pub fn new(tables: RateTables) -> Self {
        Self { tables }
    }

    /// Creates the tool over the rate tables shipped with `tax-data`.
    pub fn builtin() -> Result<Self, RateTableLoaderError> {
        load_builtin().map(Self::new)
    }

    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    /// Function-calling schema describing the tool's arguments. Supported
    /// jurisdictions and years come from the loaded tables.
    pub fn schema(&self) -> Value {
        let provinces: Vec<&str> = self
            .tables
            .supported_provinces()
            .iter()
            .map(|code| code.as_str())
            .collect();

        json!({
            "name": Self::NAME,
            "description": "Calculate the marginal and effective tax rate for Personal \
                (Federal + Provincial) or Corporate (Small Business Deduction vs General \
                Rate) income tax. Returns amounts in CAD and rates as percentages.",
            "parameters": {
                "type": "object",
                "properties": {
                    "type": {
                        "type": "string",
                        "enum": ["personal", "corporate"],
                        "description": "\"personal\" for individual income tax, \"corporate\" for business tax",
                    },
                    "jurisdiction": {
                        "type": "string",
                        "enum": provinces,
                        "description": "Province or territory code",
                    },
                    "income_amount": {
                        "type": "number",
                        "minimum": 0,
                        "description": "Income amount in CAD dollars",
                    },
                    "tax_year": {
                        "type": "integer",
                        "enum": self.tables.supported_years(),
                        "description": "Tax year",
                    },
                },
                "required": ["type", "jurisdiction", "income_amount", "tax_year"],
            },
        })
    }

    /// Validates `request`, runs the matching calculator and decorates the
    /// result for display.
    pub fn execute(
        &self,
        request: &TaxRateRequest,
    ) -> ToolResponse {
        info!(
            tool = Self::NAME,
            tax_type = %request.tax_type,
            jurisdiction = %request.jurisdiction,
            tax_year = request.tax_year,
            "tool invoked"
        );

        let validated = match request.validate(&self.tables) {
            Ok(validated) => validated,
            Err(error) => {
                warn!(tool = Self::NAME, %error, "request rejected");
                return error.into();
            }
        };

        let report = match validated {
            ValidatedRequest::Personal { income, schedule } => {
                TaxReport::from(&calculate_personal_tax(income, &schedule))
            }
            ValidatedRequest::Corporate { income, schedule } => {
                TaxReport::from(&calculate_corporate_tax(income, &schedule))
            }
        };

        ToolResponse::success(report)
    }

    /// JSON-in, JSON-out variant of [`execute`](Self::execute) for agent
    /// frameworks that pass raw tool arguments.
    pub fn execute_json(
        &self,
        arguments: &Value,
    ) -> Value {
        match serde_json::from_value::<TaxRateRequest>(arguments.clone()) {
            Ok(request) => self.execute(&request).to_json(),
            Err(error) => {
                warn!(tool = Self::NAME, %error, "malformed tool arguments");
                ToolResponse::failure(format!("Invalid request: {error}")).to_json()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tax_core::TaxType;

    use super::*;

    fn tool() -> TaxRateTool {
        TaxRateTool::builtin().expect("built-in tables should load")
    }

    #[test]
    fn schema_lists_supported_values() {
        let schema = tool().schema();

        assert_eq!(schema["name"], "get_tax_rate");
        assert_eq!(
            schema["parameters"]["properties"]["jurisdiction"]["enum"],
            json!(["ON"])
        );
        assert_eq!(
            schema["parameters"]["properties"]["tax_year"]["enum"],
            json!([2025, 2026])
        );
    }

    #[test]
    fn execute_returns_report_for_valid_request() {
        let response = tool().execute(&TaxRateRequest::new(TaxType::Personal, "ON", 120000.0, 2025));

        assert!(response.is_success());
        assert!(matches!(response.report(), Some(TaxReport::Personal(_))));
    }

    #[test]
    fn execute_turns_validation_error_into_failure() {
        let response = tool().execute(&TaxRateRequest::new(TaxType::Personal, "ON", 1.0, 2020));

        match response {
            ToolResponse::Failure(failure) => {
                assert!(!failure.success);
                assert!(failure.error.contains("2020"));
                assert_eq!(failure.supported_values, vec!["2025", "2026"]);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn failure_serializes_without_empty_supported_values() {
        let json = ToolResponse::failure("boom").to_json();

        assert_eq!(json, json!({ "success": false, "error": "boom" }));
    }

    #[test]
    fn execute_json_reports_malformed_arguments() {
        let json = tool().execute_json(&json!({ "type": "estate", "jurisdiction": "ON" }));

        assert_eq!(json["success"], false);
        assert!(
            json["error"]
                .as_str()
                .is_some_and(|e| e.starts_with("Invalid request:"))
        );
    }
}
