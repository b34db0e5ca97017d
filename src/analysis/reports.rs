use std::path::Path;

use clap::ValueEnum;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::info;

use crate::cleaning::ValidatedTable;
use crate::models::{PipelineError, Transaction, TransactionType};
use crate::output;

/// Monetary columns of the canonical table that the threshold reporter can
/// filter on.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MoneyField {
    Amount,
    InitiatorOldBalance,
    InitiatorNewBalance,
    TargetOldBalance,
    TargetNewBalance
}

impl MoneyField {
    fn get(&self, row: &Transaction) -> Decimal {
        match self {
            MoneyField::Amount => row.amount,
            MoneyField::InitiatorOldBalance => row.initiator_old_balance,
            MoneyField::InitiatorNewBalance => row.initiator_new_balance,
            MoneyField::TargetOldBalance => row.target_old_balance,
            MoneyField::TargetNewBalance => row.target_new_balance
        }
    }
}

/// Rows where `field` is at or above `threshold`, written as an artifact
/// named after the threshold value.
pub fn over_amount(
    table: &ValidatedTable,
    field: MoneyField,
    threshold: Decimal,
    out_dir: &Path,
) -> Result<Vec<Transaction>, PipelineError> {
    let rows: Vec<Transaction> = table
        .iter()
        .filter(|row| field.get(row) >= threshold)
        .cloned()
        .collect();

    let path = out_dir.join(format!("transactions_over_{threshold}.csv"));
    output::write_transactions(&rows, table.profile(), &path)?;

    info!("{} transaction(s) at or over {threshold}", rows.len());

    Ok(rows)
}

/// Rows with a zero amount, written as an artifact; returns their count.
pub fn zero_amount(table: &ValidatedTable, out_dir: &Path) -> Result<usize, PipelineError> {
    let rows: Vec<Transaction> = table
        .iter()
        .filter(|row| row.amount.is_zero())
        .cloned()
        .collect();

    output::write_transactions(&rows, table.profile(), &out_dir.join(output::ZERO_AMOUNT_FILE))?;

    Ok(rows.len())
}

/// One row of the pivot report: sum and sample standard deviation of the
/// amount and fraud label for a transaction type, or for the whole table
/// (`kind == None`, the margin row).
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub kind: Option<TransactionType>,
    pub amount_sum: Decimal,
    pub amount_std: Option<f64>,
    pub fraud_sum: i64,
    pub fraud_std: Option<f64>
}

/// Pivots the table by transaction type, with an `All` margin row, and
/// writes the pivot artifact.
///
/// Standard deviation uses one delta degree of freedom, so a single-element
/// group has no defined value and its field is left empty.
pub fn pivot_by_type(table: &ValidatedTable, out_dir: &Path) -> Result<Vec<PivotRow>, PipelineError> {
    let mut rows: Vec<PivotRow> = TransactionType::ALL
        .iter()
        .filter_map(|&kind| {
            let group: Vec<&Transaction> = table.iter().filter(|row| row.kind == kind).collect();

            if group.is_empty() {
                None
            } else {
                Some(pivot_row(Some(kind), &group))
            }
        })
        .collect();

    let all: Vec<&Transaction> = table.iter().collect();
    rows.push(pivot_row(None, &all));

    output::write_pivot(&rows, out_dir)?;

    Ok(rows)
}

fn pivot_row(kind: Option<TransactionType>, group: &[&Transaction]) -> PivotRow {
    let amounts: Vec<f64> = group
        .iter()
        .map(|row| row.amount.to_f64().unwrap_or_default())
        .collect();
    let frauds: Vec<f64> = group.iter().map(|row| row.is_fraud as f64).collect();

    PivotRow {
        kind,
        amount_sum: group.iter().map(|row| row.amount).sum(),
        amount_std: sample_std(&amounts),
        fraud_sum: group.iter().map(|row| row.is_fraud).sum(),
        fraud_std: sample_std(&frauds)
    }
}

fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt())
}
