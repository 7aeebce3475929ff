use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use payoff::application::orderer::ReorderPolicy;
use payoff::application::simulator::DEFAULT_MAX_MONTHS;
use payoff::interfaces::csv::debt_reader::DebtReader;
use payoff::interfaces::csv::schedule_writer::ScheduleWriter;
use payoff::logging::init_logging;
use payoff::{Debt, Money, PayoffEngine, PayoffError, SimulationConfig, SimulationResult, Strategy};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    /// Payoff timeline as CSV
    Csv,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debts CSV file (id,name,balance,annual_rate_percent,minimum_payment)
    input: PathBuf,

    /// Prioritisation strategy: avalanche or snowball
    #[arg(long, default_value = "avalanche")]
    strategy: Strategy,

    /// Extra amount paid every month on top of the minimums
    #[arg(long, default_value = "0")]
    extra: Decimal,

    /// Give up after this many months
    #[arg(long, default_value_t = DEFAULT_MAX_MONTHS)]
    max_months: u32,

    /// Priority ordering: static (fixed up front) or monthly (re-sorted every month)
    #[arg(long, default_value = "static")]
    reorder: ReorderPolicy,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the month-by-month trace as CSV to this file
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Simulate both strategies side by side
    #[arg(long)]
    compare: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let file = File::open(&cli.input).into_diagnostic()?;
    let debts = DebtReader::new(file).read_all()?;

    let config = SimulationConfig {
        max_months: cli.max_months,
        record_trace: cli.trace.is_some(),
    };
    let engine = Arc::new(PayoffEngine::with_policy(cli.reorder, config));
    let extra = Money::new(cli.extra);

    let results = if cli.compare {
        let debts: Arc<[Debt]> = debts.into();
        engine.compare(debts, extra).await
    } else {
        engine
            .simulate(&debts, cli.strategy, extra)
            .map(|result| vec![result])
    };

    let results = match results {
        Ok(results) => results,
        Err(err) => {
            explain_partial_state(&err);
            return Err(err.into());
        }
    };

    if let Some(path) = &cli.trace {
        let mut writer = ScheduleWriter::new(File::create(path).into_diagnostic()?);
        for result in &results {
            if let Some(trace) = &result.trace {
                writer.write_trace(result.strategy, trace)?;
            }
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Json if cli.compare => {
            serde_json::to_writer_pretty(&mut out, &results).into_diagnostic()?;
            writeln!(out).into_diagnostic()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &results[0]).into_diagnostic()?;
            writeln!(out).into_diagnostic()?;
        }
        OutputFormat::Csv => {
            let mut writer = ScheduleWriter::new(&mut out);
            for result in &results {
                writer.write_timeline(result.strategy, &result.timeline)?;
            }
        }
        OutputFormat::Text => {
            for result in &results {
                write_text(&mut out, result).into_diagnostic()?;
            }
            if let [first, second] = results.as_slice() {
                write_comparison(&mut out, first, second).into_diagnostic()?;
            }
        }
    }

    Ok(())
}

fn explain_partial_state(err: &PayoffError) {
    if let PayoffError::NonConvergence { partial, .. } = err {
        for (debt_id, balance) in &partial.remaining {
            eprintln!("{debt_id}: {} still owed", balance.cents());
        }
    }
}

fn write_text(out: &mut impl Write, result: &SimulationResult) -> io::Result<()> {
    writeln!(out, "{}", result.narrative())?;
    writeln!(out, "Priority order: {}", result.priority_order.join(", "))?;
    for event in &result.timeline {
        writeln!(
            out,
            "  month {:>3}  {} ({})  interest {}",
            event.month, event.name, event.debt_id, event.interest_paid
        )?;
    }
    writeln!(out)
}

fn write_comparison(
    out: &mut impl Write,
    first: &SimulationResult,
    second: &SimulationResult,
) -> io::Result<()> {
    let (cheaper, dearer) = if first.total_interest_paid <= second.total_interest_paid {
        (first, second)
    } else {
        (second, first)
    };
    writeln!(
        out,
        "The {} method saves {} in interest over the {} method.",
        cheaper.strategy,
        dearer.total_interest_paid - cheaper.total_interest_paid,
        dearer.strategy
    )
}
