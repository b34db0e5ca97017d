mod analysis;
mod classifier;
mod cleaning;
mod loader;
mod models;
mod output;
mod types;

use std::io::stderr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::analysis::MoneyField;
use crate::models::{SchemaProfile, Transaction};
use crate::types::Hour;

/// Batch fraud analytics over a mobile-money transaction export.
#[derive(Debug, Parser)]
#[command(name = "fraud-insights", version, about)]
struct Cli {
    /// Path to the raw transaction export
    input: PathBuf,

    /// Directory for the canonical table and report artifacts
    #[arg(long, default_value = "data/output")]
    out_dir: PathBuf,

    /// Canonical schema profile
    #[arg(long, value_enum, default_value = "historical")]
    profile: SchemaProfile,

    /// First hour of the aggregation range
    #[arg(long, default_value_t = 1)]
    start_hour: Hour,

    /// Last hour of the aggregation range (defaults to the dataset span)
    #[arg(long)]
    end_hour: Option<Hour>,

    /// Amount threshold for the over-amount report
    #[arg(long, default_value = "200000.00")]
    threshold: Decimal,

    /// Monetary column the threshold filter applies to
    #[arg(long, value_enum, default_value = "amount")]
    threshold_field: MoneyField,

    /// SQLite database to bulk-load the canonical table into
    #[arg(long, requires = "sql_script")]
    load_db: Option<PathBuf>,

    /// SQL setup script executed before the bulk load
    #[arg(long)]
    sql_script: Option<PathBuf>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let rows = cleaning::clean(&cli.input, cli.profile, &cli.out_dir)?;
    let table = cleaning::validate(rows, cli.profile)?;

    let total_volume: Decimal = table.iter().map(|row| row.amount).sum();
    println!("Total transacted volume: {:.2}", total_volume.round_dp(2));

    let over = analysis::over_amount(&table, cli.threshold_field, cli.threshold, &cli.out_dir)?;
    println!("Transactions at or over {}: {}", cli.threshold, over.len());

    let zero_count = analysis::zero_amount(&table, &cli.out_dir)?;
    println!("Transactions of zero amount: {zero_count}");

    analysis::pivot_by_type(&table, &cli.out_dir)?;

    let end_hour = cli.end_hour.unwrap_or_else(|| table.max_hour());
    let summaries = analysis::aggregate_hourly(&table, cli.start_hour, end_hour, &cli.out_dir)?;

    report_fraudulent_hours(&cli, &table, &summaries)?;

    let score = classifier::train_and_score(&table)?;
    println!("The average precision score of the current fraud detection system is: {score}%");

    if let (Some(db_path), Some(script)) = (&cli.load_db, &cli.sql_script) {
        let report = loader::load_into_sqlite(db_path, script, &table)?;
        println!(
            "Bulk load: {} statement(s) executed, {} skipped, {} row(s) inserted",
            report.statements_executed, report.statements_skipped, report.rows_inserted
        );
    }

    Ok(())
}

fn report_fraudulent_hours(
    cli: &Cli,
    table: &cleaning::ValidatedTable,
    summaries: &[models::HourlySummary],
) -> Result<()> {
    let fraud_hours = analysis::fully_fraudulent_hours(summaries);

    if fraud_hours.is_empty() {
        println!("No hour in the aggregation range was fully fraudulent");
        return Ok(());
    }

    let runs = analysis::find_runs(&fraud_hours)?;
    let stats = analysis::run_stats(&runs);

    println!("Instances of consecutive fraudulent hours: {}", stats.validated_runs);
    match stats.mean_length {
        Some(mean) => println!("Average number of consecutive fraudulent hours: {mean}"),
        None => println!("No run of fully fraudulent hours lasted two hours or more")
    }

    let subset: Vec<Transaction> = table
        .iter()
        .filter(|row| fraud_hours.contains(&row.hour))
        .cloned()
        .collect();

    info!("{} transaction(s) fall inside fully fraudulent hours", subset.len());

    output::write_transactions(
        &subset,
        cli.profile,
        &cli.out_dir.join(output::FRAUD_HOURS_FILE),
    )?;

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    // Metrics go to stdout, so logging stays on stderr.
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
