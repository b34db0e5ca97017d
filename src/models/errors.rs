use std::fmt;
use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::types::Hour;

/// A single canonical-schema constraint failure.
///
/// Violations are collected across the whole table before validation fails,
/// so one report covers every offending row and field.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Violation {
    pub row: usize,
    pub field: &'static str,
    pub constraint: &'static str,
    pub value: String
}

impl Violation {
    pub fn new(row: usize, field: &'static str, constraint: &'static str, value: impl Display) -> Self {
        Self {
            row,
            field,
            constraint,
            value: value.to_string()
        }
    }
}

impl Display for Violation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "row {}: field [{}] {} (got [{}])",
            self.row, self.field, self.constraint, self.value
        )
    }
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("\n  ")
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing value in field [{field}] on row {row} after deduplication")]
    DataQuality {
        row: usize,
        field: &'static str
    },
    #[error("Field [{field}] with value [{value}] on row {row} could not be parsed: {detail}")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
        detail: String
    },
    #[error("Canonical schema validation failed with {} violation(s):\n  {}", violations.len(), render_violations(violations))]
    SchemaValidation {
        violations: Vec<Violation>
    },
    #[error("Hour range [{start}, {end}] is invalid for a dataset spanning hours 1..={max_hour}")]
    Range {
        start: Hour,
        end: Hour,
        max_hour: Hour
    },
    #[error("{operation} requires a non-empty input")]
    EmptyInput {
        operation: &'static str
    },
    #[error("Classifier training failed: {detail}")]
    Training {
        detail: String
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database load error: {0}")]
    Load(#[from] rusqlite::Error)
}

impl PipelineError {
    pub fn data_quality(row: usize, field: &'static str) -> Self {
        Self::DataQuality { row, field }
    }

    pub fn parse(row: usize, field: &'static str, value: impl Display, detail: impl Display) -> Self {
        Self::Parse {
            row,
            field,
            value: value.to_string(),
            detail: detail.to_string()
        }
    }

    pub fn range(start: Hour, end: Hour, max_hour: Hour) -> Self {
        Self::Range { start, end, max_hour }
    }

    pub fn empty_input(operation: &'static str) -> Self {
        Self::EmptyInput { operation }
    }

    pub fn training(detail: impl Display) -> Self {
        Self::Training {
            detail: detail.to_string()
        }
    }
}
