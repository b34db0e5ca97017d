use std::ops::Deref;

use rust_decimal::Decimal;
use tracing::info;

use crate::models::{PipelineError, SchemaProfile, Transaction, Violation};
use crate::types::Hour;

/// A canonical table whose rows have passed every schema constraint.
///
/// Downstream stages take this type instead of raw rows so the invariants are
/// checked exactly once and assumed true afterwards. The table is immutable
/// from here on.
#[derive(Debug, Clone)]
pub struct ValidatedTable {
    rows: Vec<Transaction>,
    profile: SchemaProfile
}

impl ValidatedTable {
    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn profile(&self) -> SchemaProfile {
        self.profile
    }

    /// Largest hour present in the dataset. The table is never empty, so this
    /// is always at least 1 once validation has passed.
    pub fn max_hour(&self) -> Hour {
        self.rows.iter().map(|row| row.hour).max().unwrap_or(0)
    }
}

impl Deref for ValidatedTable {
    type Target = [Transaction];

    fn deref(&self) -> &Self::Target {
        &self.rows
    }
}

/// Checks every field-level constraint of the canonical schema.
///
/// Validation is lazy: all violations across the whole table are collected
/// and reported in a single [`PipelineError::SchemaValidation`] rather than
/// failing on the first offending field. Profile-dependent fields are cited
/// under the profile's canonical names.
pub fn validate(
    rows: Vec<Transaction>,
    profile: SchemaProfile,
) -> Result<ValidatedTable, PipelineError> {
    if rows.is_empty() {
        return Err(PipelineError::empty_input("Schema validation"));
    }

    let columns = profile.columns();
    let mut violations = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let line = index + 1;

        if row.hour < 1 {
            violations.push(Violation::new(line, "hour", "must be >= 1", row.hour));
        }

        check_non_negative(&mut violations, line, "amount", row.amount);
        check_non_negative(&mut violations, line, columns.initiator_old_balance, row.initiator_old_balance);
        check_non_negative(&mut violations, line, columns.initiator_new_balance, row.initiator_new_balance);
        check_non_negative(&mut violations, line, columns.target_old_balance, row.target_old_balance);
        check_non_negative(&mut violations, line, columns.target_new_balance, row.target_new_balance);

        if row.initiator_id.is_empty() {
            violations.push(Violation::new(line, columns.initiator_id, "must be non-empty", "\"\""));
        }

        if row.target_id.is_empty() {
            violations.push(Violation::new(line, columns.target_id, "must be non-empty", "\"\""));
        }

        if !(0..=1).contains(&row.is_fraud) {
            violations.push(Violation::new(line, "is_fraud", "must be 0 or 1", row.is_fraud));
        }
    }

    if !violations.is_empty() {
        return Err(PipelineError::SchemaValidation { violations });
    }

    info!("Validated {} row(s) against the {:?} profile", rows.len(), profile);

    Ok(ValidatedTable { rows, profile })
}

fn check_non_negative(
    violations: &mut Vec<Violation>,
    line: usize,
    field: &'static str,
    value: Decimal,
) {
    if value.is_sign_negative() && !value.is_zero() {
        violations.push(Violation::new(line, field, "must be >= 0", value));
    }
}
