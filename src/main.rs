use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use debt_payoff::application::comparison::compare_async;
use debt_payoff::application::engine::{SimulationRequest, simulate_with, sum_of_minimums};
use debt_payoff::application::outlook::{DEFAULT_ANNUAL_ROI_PERCENT, outlook};
use debt_payoff::domain::debt::Debt;
use debt_payoff::domain::money::Money;
use debt_payoff::domain::strategy::Strategy;
use debt_payoff::interfaces::csv::debt_reader::DebtReader;
use debt_payoff::interfaces::csv::plan_writer::PlanWriter;
use debt_payoff::logging;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Month-by-month payoff schedule for one strategy
    Plan {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        budget: BudgetArgs,

        /// Snowball or Avalanche (case-insensitive, anything else means Snowball)
        #[arg(long, default_value = "Snowball")]
        strategy: Strategy,

        /// Print one row per debt instead of the full schedule
        #[arg(long)]
        summary: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
    /// Snowball and avalanche side by side
    Compare {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        budget: BudgetArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
    /// Minimum-only payoff versus a snowball plan, with a wealth projection
    Outlook {
        #[command(flatten)]
        input: InputArgs,

        /// Annual return used for the wealth projection, in percent
        #[arg(long, default_value_t = DEFAULT_ANNUAL_ROI_PERCENT)]
        roi: Decimal,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Debts CSV file (id,name,balance,interest_rate,minimum_payment)
    input: PathBuf,

    /// Date of the first scheduled month (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    start: Option<NaiveDate>,
}

impl InputArgs {
    fn start_date(&self) -> NaiveDate {
        self.start
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[derive(Args)]
struct BudgetArgs {
    /// Paid on top of the sum of minimums every month
    #[arg(long, conflicts_with = "budget")]
    extra: Option<Decimal>,

    /// Total monthly budget; whatever the minimums leave becomes the extra payment
    #[arg(long)]
    budget: Option<Decimal>,

    /// Keep paying the minimums of retired debts into the pool
    #[arg(long)]
    rollover: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            input,
            budget,
            strategy,
            summary,
            format,
        } => {
            let debts = load_debts(&input.input)?;
            let request = build_request(&debts, &budget, strategy, input.start_date());
            let plan = simulate_with(&debts, &request);
            info!(
                "{} plan: {} months, {} interest, outcome {}",
                plan.strategy,
                plan.month_count(),
                plan.total_interest,
                plan.outcome.as_str()
            );

            match (format, summary) {
                (OutputFormat::Csv, false) => PlanWriter::new(io::stdout().lock())
                    .write_schedule(&plan)
                    .into_diagnostic()?,
                (OutputFormat::Csv, true) => PlanWriter::new(io::stdout().lock())
                    .write_summaries(&plan.debt_summaries())
                    .into_diagnostic()?,
                (OutputFormat::Json, false) => write_json(&plan)?,
                (OutputFormat::Json, true) => write_json(&plan.debt_summaries())?,
            }
        }
        Command::Compare {
            input,
            budget,
            format,
        } => {
            let debts = load_debts(&input.input)?;
            let request =
                build_request(&debts, &budget, Strategy::Snowball, input.start_date());
            let comparison = compare_async(&debts, &request).await.into_diagnostic()?;

            match format {
                OutputFormat::Csv => PlanWriter::new(io::stdout().lock())
                    .write_comparison(&comparison)
                    .into_diagnostic()?,
                OutputFormat::Json => write_json(&comparison)?,
            }
        }
        Command::Outlook { input, roi } => {
            let debts = load_debts(&input.input)?;
            write_json(&outlook(&debts, roi, input.start_date()))?;
        }
    }

    Ok(())
}

/// Reads every well-formed debt; bad rows and repeated ids are logged and skipped.
fn load_debts(path: &Path) -> Result<Vec<Debt>> {
    let file = File::open(path).into_diagnostic()?;
    let reader = DebtReader::new(file);

    let mut seen = HashSet::new();
    let mut debts = Vec::new();
    for debt_result in reader.debts() {
        match debt_result {
            Ok(debt) => {
                if seen.insert(debt.id) {
                    debts.push(debt);
                } else {
                    warn!("Skipping debt with duplicate id {}", debt.id);
                }
            }
            Err(e) => {
                warn!("Skipping malformed debt row: {}", e);
            }
        }
    }

    info!("Loaded {} debts from {}", debts.len(), path.display());
    Ok(debts)
}

fn build_request(
    debts: &[Debt],
    args: &BudgetArgs,
    strategy: Strategy,
    start: NaiveDate,
) -> SimulationRequest {
    match args.budget {
        Some(budget) => {
            let minimums = sum_of_minimums(debts);
            if Money::new(budget) < minimums {
                warn!(
                    "Budget {} is below the sum of minimums {}; no extra payment applied",
                    Money::new(budget),
                    minimums
                );
            }
            SimulationRequest::from_budget(debts, budget, strategy, start)
        }
        None => SimulationRequest::new(strategy, args.extra.unwrap_or(Decimal::ZERO), start),
    }
    .with_rollover(args.rollover)
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).into_diagnostic()?;
    writeln!(stdout).into_diagnostic()?;
    Ok(())
}
