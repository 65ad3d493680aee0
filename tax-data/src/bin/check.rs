use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_data::{CORPORATE_RATES_CSV, PERSONAL_BRACKETS_CSV, RateTableLoader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validate rate table CSV files before shipping them.
///
/// The personal brackets file needs the columns
/// `tax_year,jurisdiction,min_income,max_income,rate` (empty `max_income`
/// for the open-ended top bracket). The corporate file needs
/// `tax_year,jurisdiction,general,small_business,business_limit`.
/// Jurisdiction is `FED` or a province code. Files that are not given fall
/// back to the tables built into the crate.
#[derive(Parser, Debug)]
#[command(name = "tax-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the personal brackets CSV file
    #[arg(short, long)]
    personal: Option<PathBuf>,

    /// Path to the corporate rates CSV file
    #[arg(short, long)]
    corporate: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let brackets = match &args.personal {
        Some(path) => {
            info!("Reading personal brackets from: {}", path.display());
            let file =
                File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
            RateTableLoader::parse_brackets(file)
                .with_context(|| format!("Failed to parse CSV: {}", path.display()))?
        }
        None => RateTableLoader::parse_brackets(PERSONAL_BRACKETS_CSV.as_bytes())
            .context("Failed to parse built-in personal brackets")?,
    };

    let corporate = match &args.corporate {
        Some(path) => {
            info!("Reading corporate rates from: {}", path.display());
            let file =
                File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
            RateTableLoader::parse_corporate_rates(file)
                .with_context(|| format!("Failed to parse CSV: {}", path.display()))?
        }
        None => RateTableLoader::parse_corporate_rates(CORPORATE_RATES_CSV.as_bytes())
            .context("Failed to parse built-in corporate rates")?,
    };

    println!(
        "Parsed {} bracket records and {} corporate records",
        brackets.len(),
        corporate.len()
    );

    let tables =
        RateTableLoader::build(&brackets, &corporate).context("Rate tables failed validation")?;

    let years: Vec<String> = tables
        .supported_years()
        .iter()
        .map(ToString::to_string)
        .collect();
    let provinces: Vec<&str> = tables
        .supported_provinces()
        .iter()
        .map(|code| code.as_str())
        .collect();

    println!("Tax years:  {}", years.join(", "));
    println!("Provinces:  {}", provinces.join(", "));
    println!("Rate tables are valid.");

    Ok(())
}
