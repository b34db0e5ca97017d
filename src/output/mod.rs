use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;
use rust_decimal::Decimal;
use tracing::debug;

use crate::analysis::PivotRow;
use crate::models::{HourlySummary, PipelineError, SchemaProfile, Transaction};

pub const CANONICAL_FILE: &str = "cleaned_transactions.csv";
pub const HOURLY_FILE: &str = "hourly_summary.csv";
pub const PIVOT_FILE: &str = "pivot_by_type.csv";
pub const ZERO_AMOUNT_FILE: &str = "transactions_with_zero_amount.csv";
pub const FRAUD_HOURS_FILE: &str = "fraudulent_hour_transactions.csv";

/// Fixed two-decimal display for monetary values.
///
/// Applied here, at serialization time, and nowhere else; computation
/// upstream never carries display state.
fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn create_writer(path: &Path) -> Result<Writer<fs::File>, PipelineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    Ok(Writer::from_path(path)?)
}

/// Writes the canonical table artifact under `out_dir`.
pub fn write_canonical(
    rows: &[Transaction],
    profile: SchemaProfile,
    out_dir: &Path,
) -> Result<PathBuf, PipelineError> {
    let path = out_dir.join(CANONICAL_FILE);
    write_transactions(rows, profile, &path)?;

    Ok(path)
}

/// Writes a set of canonical rows to `path` in the profile's column order.
pub fn write_transactions(
    rows: &[Transaction],
    profile: SchemaProfile,
    path: &Path,
) -> Result<(), PipelineError> {
    let mut writer = create_writer(path)?;
    writer.write_record(profile.header())?;

    for row in rows {
        let mut record = vec![
            row.hour.to_string(),
            row.kind.to_string(),
            money(row.amount),
            row.initiator_id.clone(),
            money(row.initiator_old_balance),
            money(row.initiator_new_balance),
            row.target_id.clone(),
            money(row.target_old_balance),
            money(row.target_new_balance),
            row.is_fraud.to_string(),
        ];

        if profile.derives_limit_flag() {
            record.push(i64::from(row.exceeds_transaction_limit()).to_string());
        }

        writer.write_record(&record)?;
    }

    writer.flush()?;
    debug!("Wrote {} row(s) to [{}]", rows.len(), path.display());

    Ok(())
}

/// Writes the hourly summary artifact under `out_dir`.
pub fn write_hourly(
    summaries: &[HourlySummary],
    out_dir: &Path,
) -> Result<PathBuf, PipelineError> {
    let path = out_dir.join(HOURLY_FILE);
    let mut writer = create_writer(&path)?;

    writer.write_record([
        "hour",
        "volume",
        "number_of_transactions",
        "percentage_of_fraudulent_transactions",
        "most_frequent_type",
        "most_frequent_type_volume",
        "number_of_most_frequent_type_transactions",
    ])?;

    for summary in summaries {
        writer.write_record([
            summary.hour.to_string(),
            money(summary.volume),
            summary.number_of_transactions.to_string(),
            format!("{:.2}", summary.percentage_of_fraudulent_transactions),
            summary
                .most_frequent_type
                .map(|kind| kind.to_string())
                .unwrap_or_default(),
            money(summary.most_frequent_type_volume),
            summary.number_of_most_frequent_type_transactions.to_string(),
        ])?;
    }

    writer.flush()?;
    debug!("Wrote {} hourly summaries to [{}]", summaries.len(), path.display());

    Ok(path)
}

/// Writes the pivot artifact under `out_dir`.
///
/// Undefined standard deviations (single-element groups) serialize as empty
/// fields so the artifact stays numerically parseable.
pub fn write_pivot(rows: &[PivotRow], out_dir: &Path) -> Result<PathBuf, PipelineError> {
    let path = out_dir.join(PIVOT_FILE);
    let mut writer = create_writer(&path)?;

    writer.write_record(["type", "amount_sum", "amount_std", "is_fraud_sum", "is_fraud_std"])?;

    for row in rows {
        writer.write_record([
            row.kind.map(|kind| kind.to_string()).unwrap_or_else(|| "All".to_string()),
            money(row.amount_sum),
            row.amount_std.map(|std| format!("{std:.2}")).unwrap_or_default(),
            row.fraud_sum.to_string(),
            row.fraud_std.map(|std| format!("{std:.2}")).unwrap_or_default(),
        ])?;
    }

    writer.flush()?;

    Ok(path)
}
