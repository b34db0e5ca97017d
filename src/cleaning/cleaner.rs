use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::{PipelineError, RawRecord, SchemaProfile, Transaction, TransactionType};
use crate::output;
use crate::types::parse_money;

/// Cleans the raw export at `path` into the canonical table.
///
/// Exact-duplicate rows are dropped keeping the first occurrence, any missing
/// value remaining afterwards is a fatal data-quality failure, text fields are
/// whitespace-trimmed, columns are renamed to the profile's canonical names in
/// canonical order, the upstream flagged-fraud indicator is discarded, and
/// every monetary field is stripped of leading non-numeric noise and parsed.
///
/// The canonical artifact is written under `out_dir`, and the table is also
/// returned directly so later stages never re-read it from disk.
pub fn clean(
    path: &Path,
    profile: SchemaProfile,
    out_dir: &Path,
) -> Result<Vec<Transaction>, PipelineError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let mut seen = HashSet::new();
    let mut raw_rows = Vec::new();
    let mut duplicates = 0usize;

    for result in reader.deserialize::<RawRecord>() {
        let record = result?;
        if seen.insert(record.clone()) {
            raw_rows.push(record);
        } else {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        debug!("Dropped {duplicates} exact-duplicate row(s)");
    }

    let mut rows = Vec::with_capacity(raw_rows.len());
    for (index, record) in raw_rows.iter().enumerate() {
        rows.push(canonicalize(index + 1, record)?);
    }

    info!("Cleaned {} row(s) from [{}]", rows.len(), path.display());

    output::write_canonical(&rows, profile, out_dir)?;

    Ok(rows)
}

fn canonicalize(row: usize, record: &RawRecord) -> Result<Transaction, PipelineError> {
    let hour = record.step.ok_or_else(|| PipelineError::data_quality(row, "hour"))?;

    let label = required_text(row, "type", record.kind.as_deref())?;
    let kind = TransactionType::from_label(label)
        .ok_or_else(|| PipelineError::parse(row, "type", label, "not a known transaction type"))?;

    let is_fraud = record
        .is_fraud
        .ok_or_else(|| PipelineError::data_quality(row, "is_fraud"))?;

    // The upstream flagged-fraud indicator is not part of the canonical
    // model; it still participates in the missing-value check before being
    // dropped here.
    record
        .is_flagged_fraud
        .ok_or_else(|| PipelineError::data_quality(row, "isFlaggedFraud"))?;

    Ok(Transaction {
        hour,
        kind,
        amount: money(row, "amount", record.amount.as_deref())?,
        initiator_id: required_text(row, "initiator_id", record.name_orig.as_deref())?.to_string(),
        initiator_old_balance: money(row, "initiator_old_balance", record.old_balance_orig.as_deref())?,
        initiator_new_balance: money(row, "initiator_new_balance", record.new_balance_orig.as_deref())?,
        target_id: required_text(row, "target_id", record.name_dest.as_deref())?.to_string(),
        target_old_balance: money(row, "target_old_balance", record.old_balance_dest.as_deref())?,
        target_new_balance: money(row, "target_new_balance", record.new_balance_dest.as_deref())?,
        is_fraud
    })
}

fn required_text<'a>(
    row: usize,
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, PipelineError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(PipelineError::data_quality(row, field))
    }
}

fn money(row: usize, field: &'static str, value: Option<&str>) -> Result<Decimal, PipelineError> {
    let text = required_text(row, field, value)?;

    parse_money(text).map_err(|error| PipelineError::parse(row, field, text, error))
}
