//! Debt Payoff CLI - Command Line Operations for the Payoff Simulator
//!
//! # Commands
//!
//! - `debt-payoff simulate --input <file>` - Run one strategy and print the summary
//! - `debt-payoff compare --input <file>` - Compare avalanche, snowball and minimum-only
//! - `debt-payoff schedule --input <file>` - Print the month-by-month schedule
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`; `--verbose`
//! defaults it to `debug`.

use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use debt_payoff_core_rs::PayoffStrategy;
use rust_decimal::Decimal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{Overrides, ScenarioFile};
use output::OutputFormat;

/// Debt payoff simulator
#[derive(Parser)]
#[command(name = "debt-payoff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command
#[derive(Args)]
struct ScenarioArgs {
    /// Path to the scenario file (JSON)
    #[arg(short, long)]
    input: String,

    /// Extra monthly payment, overriding the file
    #[arg(short, long)]
    extra: Option<Decimal>,

    /// Start date (YYYY-MM-DD); defaults to the file's date, then today
    #[arg(short = 'd', long)]
    start_date: Option<NaiveDate>,

    /// Period cap in months
    #[arg(long)]
    max_periods: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one payoff strategy
    Simulate {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Strategy (avalanche or snowball), overriding the file
        #[arg(short, long)]
        strategy: Option<PayoffStrategy>,
    },

    /// Compare avalanche, snowball and minimum payments only
    Compare {
        #[command(flatten)]
        scenario: ScenarioArgs,
    },

    /// Print the month-by-month amortization schedule
    Schedule {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Strategy (avalanche or snowball), overriding the file
        #[arg(short, long)]
        strategy: Option<PayoffStrategy>,

        /// Only show this debt
        #[arg(long)]
        debt: Option<String>,
    },
}

impl ScenarioArgs {
    fn load(&self, strategy: Option<PayoffStrategy>) -> Result<config::Scenario> {
        let overrides = Overrides {
            strategy,
            extra_monthly_payment: self.extra,
            start_date: self.start_date,
            max_periods: self.max_periods,
        };
        let today = chrono::Local::now().date_naive();

        Ok(ScenarioFile::load(&self.input)?.resolve(&overrides, today))
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Simulate { scenario, strategy } => {
            commands::simulate::run(scenario.load(strategy)?, scenario.format)
        }
        Commands::Compare { scenario } => {
            commands::compare::run(scenario.load(None)?, scenario.format)
        }
        Commands::Schedule {
            scenario,
            strategy,
            debt,
        } => commands::schedule::run(scenario.load(strategy)?, debt.as_deref(), scenario.format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialise tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err.user_message());
            ExitCode::FAILURE
        }
    }
}
