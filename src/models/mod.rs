mod errors;
mod record;
mod summary;

use std::fmt;
use std::fmt::{Display, Formatter};

use clap::ValueEnum;
use rust_decimal::Decimal;

pub use errors::{PipelineError, Violation};
pub use record::{RawRecord, Transaction};
pub use summary::{HourlySummary, RunStats};

/// The closed set of mobile-money transaction kinds.
///
/// Declaration order doubles as the deterministic category order used by the
/// one-hot encoder and the pivot report.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TransactionType {
    CashIn,
    CashOut,
    Debit,
    Payment,
    Transfer
}

impl TransactionType {
    pub const ALL: [TransactionType; 5] = [
        TransactionType::CashIn,
        TransactionType::CashOut,
        TransactionType::Debit,
        TransactionType::Payment,
        TransactionType::Transfer
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "CASH_IN" => Some(TransactionType::CashIn),
            "CASH_OUT" => Some(TransactionType::CashOut),
            "DEBIT" => Some(TransactionType::Debit),
            "PAYMENT" => Some(TransactionType::Payment),
            "TRANSFER" => Some(TransactionType::Transfer),
            _ => None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::CashIn => "CASH_IN",
            TransactionType::CashOut => "CASH_OUT",
            TransactionType::Debit => "DEBIT",
            TransactionType::Payment => "PAYMENT",
            TransactionType::Transfer => "TRANSFER"
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// The two canonical schema variants found across the dataset's history.
///
/// The in-memory [`Transaction`] is profile-independent; the profile only
/// selects artifact column names, the derived limit column, and the field
/// names cited in validation violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum SchemaProfile {
    /// `initiator_id`/`target_id` party naming, no derived limit column.
    Historical,
    /// `sender`/`recipient` party naming plus a derived
    /// `exceeds_transaction_limit` column.
    Ledger
}

/// Canonical column names for the profile-dependent fields.
#[derive(Debug, Clone, Copy)]
pub struct ColumnNames {
    pub initiator_id: &'static str,
    pub initiator_old_balance: &'static str,
    pub initiator_new_balance: &'static str,
    pub target_id: &'static str,
    pub target_old_balance: &'static str,
    pub target_new_balance: &'static str
}

impl SchemaProfile {
    pub fn columns(&self) -> ColumnNames {
        match self {
            SchemaProfile::Historical => ColumnNames {
                initiator_id: "initiator_id",
                initiator_old_balance: "initiator_old_balance",
                initiator_new_balance: "initiator_new_balance",
                target_id: "target_id",
                target_old_balance: "target_old_balance",
                target_new_balance: "target_new_balance"
            },
            SchemaProfile::Ledger => ColumnNames {
                initiator_id: "sender",
                initiator_old_balance: "sender_old_balance",
                initiator_new_balance: "sender_new_balance",
                target_id: "recipient",
                target_old_balance: "recipient_old_balance",
                target_new_balance: "recipient_new_balance"
            }
        }
    }

    pub fn derives_limit_flag(&self) -> bool {
        matches!(self, SchemaProfile::Ledger)
    }

    /// Canonical column order for artifacts written under this profile.
    pub fn header(&self) -> Vec<&'static str> {
        let columns = self.columns();
        let mut header = vec![
            "hour",
            "type",
            "amount",
            columns.initiator_id,
            columns.initiator_old_balance,
            columns.initiator_new_balance,
            columns.target_id,
            columns.target_old_balance,
            columns.target_new_balance,
            "is_fraud",
        ];

        if self.derives_limit_flag() {
            header.push("exceeds_transaction_limit");
        }

        header
    }
}

/// Single-transfer limit above which the `Ledger` profile flags a row.
pub fn transaction_limit() -> Decimal {
    Decimal::from(200_000u32)
}
