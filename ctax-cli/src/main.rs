use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ctax_core::FilingYearConfig;
use ctax_core::calculations::{SimplifiedTaxConfig, SimplifiedTaxWorksheet};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ctax_cli::config_file;
use ctax_cli::input::{self, RawAmounts};
use ctax_cli::report;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Simplified-scheme consumption tax return calculator.
///
/// Computes every line of the annual return from the period's gross revenue
/// and prints the values to enter on Schedules 4-3 and 5-3 and Forms 1 and 2.
/// Amounts not given as options are prompted for.
#[derive(Debug, Parser)]
#[command(name = "ctax", version, about)]
struct Cli {
    /// Gross business revenue for the period, tax inclusive (yen).
    #[arg(long)]
    gross_sales: Option<String>,

    /// Taxable sales in the reference period, tax exclusive (yen).
    #[arg(long)]
    reference_sales: Option<String>,

    /// Interim consumption tax paid (yen). Blank means 0.
    #[arg(long)]
    interim_national: Option<String>,

    /// Interim local consumption tax paid (yen). Blank means 0.
    #[arg(long)]
    interim_local: Option<String>,

    /// TOML file with the filing-year rates and business category.
    /// Defaults to the built-in 2025 category 5 configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names and writes to stderr, keeping stdout
///   for the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let filing_year = match &cli.config {
        Some(path) => config_file::load_config(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
        None => FilingYearConfig::standard_2025(),
    };
    debug!(
        filing_year = filing_year.filing_year,
        category = filing_year.business_category.as_str(),
        "using configuration"
    );

    let raw = RawAmounts {
        gross_sales: cli.gross_sales,
        reference_period_sales: cli.reference_sales,
        interim_national_paid: cli.interim_national,
        interim_local_paid: cli.interim_local,
    };
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut prompt_writer = io::stderr();
    let inputs = input::collect_inputs(&raw, &mut reader, &mut prompt_writer)
        .context("Failed to collect input amounts")?;

    let worksheet =
        SimplifiedTaxWorksheet::new(SimplifiedTaxConfig::from_filing_year_config(&filing_year));
    let result = worksheet
        .calculate(&inputs)
        .context("Invalid filing-year configuration")?;
    info!(total_payable = %result.total_payable, "return calculated");

    let mapping = result.field_mapping();
    let mut stdout = io::stdout().lock();
    match cli.format {
        OutputFormat::Text => report::render_text(&mut stdout, &filing_year, &mapping)
            .context("Failed to write report")?,
        OutputFormat::Csv => {
            report::render_csv(&mut stdout, &mapping).context("Failed to write CSV report")?
        }
    }
    stdout.flush().context("Failed to write report")?;

    Ok(())
}
