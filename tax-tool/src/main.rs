use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde_json::Value;
use tracing::debug;

use tax_core::TaxType;
use tax_tool::logging::init_logging;
use tax_tool::{TaxRateRequest, TaxRateTool, ToolConfig};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Canadian personal and corporate tax-rate calculator.
///
/// Builds a `get_tax_rate` request from the flags (or takes one verbatim
/// with `--request`), runs it, and prints the JSON response on stdout.
/// Exits with status 1 when the response is a failure.
#[derive(Debug, Parser)]
#[command(name = "tax-rate", version, allow_negative_numbers = true)]
struct Cli {
    /// Tax type: `personal` or `corporate`.
    #[arg(long = "type", value_parser = parse_tax_type)]
    tax_type: Option<TaxType>,

    /// Province code or name. Falls back to `default_jurisdiction`.
    #[arg(long)]
    jurisdiction: Option<String>,

    /// Income amount in CAD.
    #[arg(long)]
    income: Option<f64>,

    /// Tax year. Falls back to `default_tax_year`.
    #[arg(long)]
    year: Option<i32>,

    /// Raw tool arguments as JSON, e.g.
    /// `{"type":"personal","jurisdiction":"ON","income_amount":120000,"tax_year":2025}`.
    #[arg(long, conflicts_with_all = ["tax_type", "jurisdiction", "income", "year"])]
    request: Option<String>,

    /// Print the tool's function-calling schema and exit.
    #[arg(long)]
    schema: bool,

    /// Path to a TOML config file (defaults to `tax-rate.toml` if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print compact instead of pretty JSON.
    #[arg(long)]
    compact: bool,
}

fn parse_tax_type(s: &str) -> Result<TaxType, String> {
    TaxType::parse(s).ok_or_else(|| format!("expected 'personal' or 'corporate', got '{s}'"))
}

// ─── request assembly ────────────────────────────────────────────────────────

fn request_from_flags(
    cli: &Cli,
    config: &ToolConfig,
) -> Result<TaxRateRequest> {
    let tax_type = cli
        .tax_type
        .ok_or_else(|| anyhow!("--type is required unless --request is given"))?;
    let income = cli
        .income
        .ok_or_else(|| anyhow!("--income is required unless --request is given"))?;
    let jurisdiction = cli
        .jurisdiction
        .clone()
        .or_else(|| config.default_jurisdiction.clone())
        .ok_or_else(|| anyhow!("--jurisdiction is required (or set default_jurisdiction)"))?;
    let year = cli
        .year
        .or(config.default_tax_year)
        .ok_or_else(|| anyhow!("--year is required (or set default_tax_year)"))?;

    Ok(TaxRateRequest::new(tax_type, jurisdiction, income, year))
}

fn print_json(
    value: &Value,
    compact: bool,
) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("Failed to render response")?;
    println!("{rendered}");
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = ToolConfig::load_or_default(cli.config.as_deref())?;
    init_logging(&config.log_level);
    debug!(?config, "configuration loaded");

    let tool = TaxRateTool::builtin().context("Failed to load built-in rate tables")?;

    if cli.schema {
        print_json(&tool.schema(), cli.compact)?;
        return Ok(ExitCode::SUCCESS);
    }

    let response = match &cli.request {
        Some(raw) => {
            let arguments: Value =
                serde_json::from_str(raw).context("--request is not valid JSON")?;
            tool.execute_json(&arguments)
        }
        None => tool.execute(&request_from_flags(&cli, &config)?).to_json(),
    };

    print_json(&response, cli.compact)?;

    if response["success"].as_bool() == Some(true) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
