
use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};
use rust_decimal::prelude::ToPrimitive;
use tracing::{info, warn};

use crate::cleaning::ValidatedTable;
use crate::models::PipelineError;

/// Outcome of a bulk load. Individual statement failures are tolerated and
/// only counted; everything else is fatal.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct LoadReport {
    pub statements_executed: usize,
    pub statements_skipped: usize,
    pub rows_inserted: usize
}

/// Executes the setup script against the database at `db_path`, then
/// bulk-inserts the canonical table in a single transaction.
///
/// The script is split on `;` and executed statement by statement. A failing
/// statement is logged at warn level and skipped, the load is best-effort
/// against an externally managed schema. Opening the database, reading the
/// script or a failing row insert abort the load.
pub fn load_into_sqlite(
    db_path: &Path,
    script: &Path,
    table: &ValidatedTable,
) -> Result<LoadReport, PipelineError> {
    let mut connection = Connection::open(db_path)?;

    let mut report = run_script(&connection, script)?;
    report.rows_inserted = insert_rows(&mut connection, table)?;

    info!(
        "Bulk load into [{}] finished: {} statement(s) executed, {} skipped, {} row(s) inserted",
        db_path.display(),
        report.statements_executed,
        report.statements_skipped,
        report.rows_inserted
    );

    Ok(report)
}

fn run_script(connection: &Connection, script: &Path) -> Result<LoadReport, PipelineError> {
    let sql = fs::read_to_string(script)?;
    let mut report = LoadReport::default();

    for statement in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        match connection.execute(statement, []) {
            Ok(_) => report.statements_executed += 1,
            Err(error) => {
                warn!("Statement skipped: {error}");
                report.statements_skipped += 1;
            }
        }
    }

    Ok(report)
}

fn insert_rows(connection: &mut Connection, table: &ValidatedTable) -> Result<usize, PipelineError> {
    let profile = table.profile();
    let columns = profile.columns();

    let sql = if profile.derives_limit_flag() {
        format!(
            "INSERT INTO transactions (hour, type, amount, {}, {}, {}, {}, {}, {}, is_fraud, exceeds_transaction_limit) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            columns.initiator_id,
            columns.initiator_old_balance,
            columns.initiator_new_balance,
            columns.target_id,
            columns.target_old_balance,
            columns.target_new_balance
        )
    } else {
        format!(
            "INSERT INTO transactions (hour, type, amount, {}, {}, {}, {}, {}, {}, is_fraud) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            columns.initiator_id,
            columns.initiator_old_balance,
            columns.initiator_new_balance,
            columns.target_id,
            columns.target_old_balance,
            columns.target_new_balance
        )
    };

    let tx = connection.transaction()?;

    {
        let mut statement = tx.prepare(&sql)?;

        for row in table.rows() {
            if profile.derives_limit_flag() {
                statement.execute(params![
                    row.hour,
                    row.kind.as_str(),
                    row.amount.to_f64().unwrap_or_default(),
                    row.initiator_id,
                    row.initiator_old_balance.to_f64().unwrap_or_default(),
                    row.initiator_new_balance.to_f64().unwrap_or_default(),
                    row.target_id,
                    row.target_old_balance.to_f64().unwrap_or_default(),
                    row.target_new_balance.to_f64().unwrap_or_default(),
                    row.is_fraud,
                    i64::from(row.exceeds_transaction_limit()),
                ])?;
            } else {
                statement.execute(params![
                    row.hour,
                    row.kind.as_str(),
                    row.amount.to_f64().unwrap_or_default(),
                    row.initiator_id,
                    row.initiator_old_balance.to_f64().unwrap_or_default(),
                    row.initiator_new_balance.to_f64().unwrap_or_default(),
                    row.target_id,
                    row.target_old_balance.to_f64().unwrap_or_default(),
                    row.target_new_balance.to_f64().unwrap_or_default(),
                    row.is_fraud,
                ])?;
            }
        }
    }

    tx.commit()?;

    Ok(table.len())
}
