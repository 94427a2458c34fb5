mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use personal_finance_core::TaxYearConfig;

use commands::decimal::FormatAmountArgs;
use commands::eligibility::EligibilityArgs;
use commands::mortgage::{AffordabilityArgs, MortgageArgs};
use commands::risk::{AllocationArgs, RiskFactorsArgs, RiskScoreArgs};
use commands::tax::{IncomeTaxArgs, NationalInsuranceArgs, RegionalTaxArgs};

/// UK personal-finance calculations
#[derive(Parser)]
#[command(
    name = "pfa",
    version,
    about = "UK personal-finance tax, affordability and risk-score calculations",
    long_about = "A CLI for UK personal-finance calculations with decimal precision. \
                  Supports income tax, National Insurance, disposable income, mortgage \
                  limits, monthly spend, investment risk scores and eligibility gates."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Tax year rates (JSON or YAML) overriding the UK 2024/25 defaults
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log calculation detail to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate UK income tax with band breakdown
    IncomeTax(IncomeTaxArgs),
    /// Calculate Class 1 employee National Insurance
    NationalInsurance(NationalInsuranceArgs),
    /// Full affordability assessment: tax, NI, take-home, mortgage and spend
    Affordability(AffordabilityArgs),
    /// Maximum mortgage from salary, age and applicant flags
    Mortgage(MortgageArgs),
    /// Flat-rate regional tax estimate (UK, US, EU)
    RegionalTax(RegionalTaxArgs),
    /// Investment risk score (6-20) from age, income, net worth and tax rate
    RiskScore(RiskScoreArgs),
    /// Print the risk factor threshold tables
    RiskFactors(RiskFactorsArgs),
    /// Validate an allocation against recommended ranges
    AllocationCheck(AllocationArgs),
    /// Mortgage qualification and opportunity preconditions
    Eligibility(EligibilityArgs),
    /// Format an amount with thousands separators, truncated to pence
    FormatAmount(FormatAmountArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&str>) -> Result<TaxYearConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            let config = input::file::read_config(p)?;
            tracing::info!(path = p, tax_year = %config.name, "loaded tax year config");
            Ok(config)
        }
        None => Ok(TaxYearConfig::default()),
    }
}

fn run(cli: Cli) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::IncomeTax(args) => commands::tax::run_income_tax(args, &config),
        Commands::NationalInsurance(args) => commands::tax::run_national_insurance(args, &config),
        Commands::Affordability(args) => commands::mortgage::run_affordability(args, &config),
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args, &config),
        Commands::RegionalTax(args) => commands::tax::run_regional_tax(args),
        Commands::RiskScore(args) => commands::risk::run_risk_score(args),
        Commands::RiskFactors(args) => commands::risk::run_risk_factors(args),
        Commands::AllocationCheck(args) => commands::risk::run_allocation_check(args),
        Commands::Eligibility(args) => commands::eligibility::run_eligibility(args),
        Commands::FormatAmount(args) => commands::decimal::run_format_amount(args),
        Commands::Version => Ok(serde_json::json!({
            "name": "pfa",
            "version": env!("CARGO_PKG_VERSION"),
            "tax_year": config.name,
        })),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.output.clone();
    match run(cli) {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
