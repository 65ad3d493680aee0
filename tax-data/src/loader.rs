use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{CorporateRates, Jurisdiction, RateTables, RateTablesError, TaxBracket};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading rate table data.
#[derive(Debug, Error)]
pub enum RateTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown jurisdiction '{0}' (expected FED or a province code)")]
    UnknownJurisdiction(String),

    #[error("Invalid rate table: {0}")]
    Tables(#[from] RateTablesError),
}

impl From<csv::Error> for RateTableLoaderError {
    fn from(err: csv::Error) -> Self {
        RateTableLoaderError::CsvParse(err.to_string())
    }
}

fn parse_jurisdiction(code: &str) -> Result<Jurisdiction, RateTableLoaderError> {
    Jurisdiction::parse(code).ok_or_else(|| RateTableLoaderError::UnknownJurisdiction(code.to_string()))
}

/// A single record from the personal brackets CSV file.
///
/// - `tax_year`: The tax year (e.g., 2025)
/// - `jurisdiction`: `FED` or a province code (e.g., `ON`)
/// - `min_income`: Lower edge of the bracket
/// - `max_income`: Inclusive upper bound (empty for unlimited)
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.145 for 14.5%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub jurisdiction: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

/// A single record from the corporate rates CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CorporateRateRecord {
    pub tax_year: i32,
    pub jurisdiction: String,
    pub general: Decimal,
    pub small_business: Decimal,
    pub business_limit: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for rate table data from CSV files.
///
/// Parsing and building are separate steps so callers can inspect the raw
/// records (the `tax-data-check` binary prints them) before the store is
/// frozen.
pub struct RateTableLoader;

impl RateTableLoader {
    /// Parse personal bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, RateTableLoaderError> {
        Self::parse(reader)
    }

    /// Parse corporate rate records from a CSV reader.
    pub fn parse_corporate_rates<R: Read>(
        reader: R
    ) -> Result<Vec<CorporateRateRecord>, RateTableLoaderError> {
        Self::parse(reader)
    }

    fn parse<R: Read, T: serde::de::DeserializeOwned>(
        reader: R
    ) -> Result<Vec<T>, RateTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: T = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build an immutable [`RateTables`] store from parsed records.
    ///
    /// Bracket records are grouped by (tax_year, jurisdiction) and sorted by
    /// `min_income` within each group; every group must then form a valid
    /// progressive schedule. Corporate records must be unique per
    /// (tax_year, jurisdiction).
    pub fn build(
        brackets: &[BracketRecord],
        corporate: &[CorporateRateRecord],
    ) -> Result<RateTables, RateTableLoaderError> {
        let mut groups: BTreeMap<(i32, Jurisdiction), Vec<TaxBracket>> = BTreeMap::new();

        for record in brackets {
            let jurisdiction = parse_jurisdiction(&record.jurisdiction)?;
            groups
                .entry((record.tax_year, jurisdiction))
                .or_default()
                .push(TaxBracket::new(
                    record.min_income,
                    record.max_income,
                    record.rate,
                ));
        }

        let mut builder = RateTables::builder();

        for ((tax_year, jurisdiction), mut schedule) in groups {
            schedule.sort_by(|a, b| a.min_income.cmp(&b.min_income));
            debug!(
                tax_year,
                %jurisdiction,
                brackets = schedule.len(),
                "loading bracket schedule"
            );
            builder = builder.personal(tax_year, jurisdiction, schedule)?;
        }

        for record in corporate {
            let jurisdiction = parse_jurisdiction(&record.jurisdiction)?;
            builder = builder.corporate(
                record.tax_year,
                jurisdiction,
                CorporateRates {
                    general: record.general,
                    small_business: record.small_business,
                    business_limit: record.business_limit,
                },
            )?;
        }

        Ok(builder.build())
    }

    /// Parse both CSV sources and build the store in one step.
    pub fn load<B: Read, C: Read>(
        brackets: B,
        corporate: C,
    ) -> Result<RateTables, RateTableLoaderError> {
        let bracket_records = Self::parse_brackets(brackets)?;
        let corporate_records = Self::parse_corporate_rates(corporate)?;
        Self::build(&bracket_records, &corporate_records)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{BracketScheduleError, ProvinceCode};

    use super::*;

    const BRACKET_HEADER: &str = "tax_year,jurisdiction,min_income,max_income,rate\n";
    const CORPORATE_CSV: &str = "tax_year,jurisdiction,general,small_business,business_limit
2025,FED,0.15,0.09,500000
2025,ON,0.115,0.032,500000
";

    #[test]
    fn test_parse_bracket_row() {
        let csv = format!("{BRACKET_HEADER}2025,FED,0,57375,0.145");

        let records = RateTableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            BracketRecord {
                tax_year: 2025,
                jurisdiction: "FED".to_string(),
                min_income: dec!(0),
                max_income: Some(dec!(57375)),
                rate: dec!(0.145),
            }
        );
    }

    #[test]
    fn test_parse_unlimited_max_income() {
        let csv = format!("{BRACKET_HEADER}2025,ON,220000,,0.1316");

        let records = RateTableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].max_income, None);
        assert_eq!(records[0].rate, dec!(0.1316));
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let csv = format!("{BRACKET_HEADER} 2025 , ON , 0 , 52886 , 0.0505 ");

        let records = RateTableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].jurisdiction, "ON");
        assert_eq!(records[0].max_income, Some(dec!(52886)));
    }

    #[test]
    fn test_parse_corporate_rates() {
        let records = RateTableLoader::parse_corporate_rates(CORPORATE_CSV.as_bytes())
            .expect("Failed to parse CSV");

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].small_business, dec!(0.032));
        assert_eq!(records[1].business_limit, dec!(500000));
    }

    #[test]
    fn test_parse_rejects_bad_decimal() {
        let csv = format!("{BRACKET_HEADER}2025,FED,0,abc,0.145");

        let result = RateTableLoader::parse_brackets(csv.as_bytes());

        assert!(matches!(result, Err(RateTableLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_build_sorts_unordered_rows() {
        let csv = format!("{BRACKET_HEADER}2025,ON,50000,,0.10\n2025,ON,0,50000,0.05");
        let records = RateTableLoader::parse_brackets(csv.as_bytes()).unwrap();

        let tables = RateTableLoader::build(&records, &[]).expect("Failed to build tables");

        let on = tables
            .brackets(2025, Jurisdiction::Provincial(ProvinceCode::Ontario))
            .expect("ON brackets should exist");
        assert_eq!(on[0].min_income, dec!(0));
        assert_eq!(on[1].min_income, dec!(50000));
    }

    #[test]
    fn test_build_rejects_unknown_jurisdiction() {
        let csv = format!("{BRACKET_HEADER}2025,ZZ,0,,0.10");
        let records = RateTableLoader::parse_brackets(csv.as_bytes()).unwrap();

        let result = RateTableLoader::build(&records, &[]);

        assert!(matches!(
            result,
            Err(RateTableLoaderError::UnknownJurisdiction(code)) if code == "ZZ"
        ));
    }

    #[test]
    fn test_build_rejects_gap_between_brackets() {
        let csv = format!("{BRACKET_HEADER}2025,FED,0,114750,0.205\n2025,FED,114750.01,,0.26");
        let records = RateTableLoader::parse_brackets(csv.as_bytes()).unwrap();

        let result = RateTableLoader::build(&records, &[]);

        assert!(matches!(
            result,
            Err(RateTableLoaderError::Tables(RateTablesError::InvalidSchedule {
                source: BracketScheduleError::NotContiguous { .. },
                ..
            }))
        ));
    }

    #[test]
    fn test_build_rejects_duplicate_corporate_rates() {
        let csv = format!("{CORPORATE_CSV}2025,ON,0.115,0.032,500000\n");
        let records = RateTableLoader::parse_corporate_rates(csv.as_bytes()).unwrap();

        let result = RateTableLoader::build(&[], &records);

        assert!(matches!(
            result,
            Err(RateTableLoaderError::Tables(
                RateTablesError::DuplicateCorporateRates { tax_year: 2025, .. }
            ))
        ));
    }

    #[test]
    fn test_load_combines_both_sources() {
        let brackets = format!("{BRACKET_HEADER}2025,FED,0,,0.15\n2025,ON,0,,0.05");

        let tables = RateTableLoader::load(brackets.as_bytes(), CORPORATE_CSV.as_bytes())
            .expect("Failed to load tables");

        assert!(tables.personal_schedule(2025, ProvinceCode::Ontario).is_some());
        assert!(tables.corporate_schedule(2025, ProvinceCode::Ontario).is_some());
    }
}
