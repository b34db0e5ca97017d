use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{transaction_limit, TransactionType};
use crate::types::Hour;

/// One row of the raw export, exactly as the historical header names it.
///
/// Every field is optional so that missing values survive deserialization and
/// can be rejected as a data-quality failure instead of an opaque csv error.
/// Monetary fields stay as strings here because the upstream formatter leaks
/// non-numeric prefixes that the cleaner strips before parsing.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize)]
pub struct RawRecord {
    pub step: Option<Hour>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<String>,
    #[serde(rename = "nameOrig")]
    pub name_orig: Option<String>,
    #[serde(rename = "oldbalanceOrg")]
    pub old_balance_orig: Option<String>,
    #[serde(rename = "newbalanceOrig")]
    pub new_balance_orig: Option<String>,
    #[serde(rename = "nameDest")]
    pub name_dest: Option<String>,
    #[serde(rename = "oldbalanceDest")]
    pub old_balance_dest: Option<String>,
    #[serde(rename = "newbalanceDest")]
    pub new_balance_dest: Option<String>,
    #[serde(rename = "isFraud")]
    pub is_fraud: Option<i64>,
    #[serde(rename = "isFlaggedFraud")]
    pub is_flagged_fraud: Option<i64>
}

/// One row of the canonical table.
///
/// Field names follow the `Historical` profile internally; the `Ledger`
/// profile only renames them at the serialization boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub hour: Hour,
    pub kind: TransactionType,
    pub amount: Decimal,
    pub initiator_id: String,
    pub initiator_old_balance: Decimal,
    pub initiator_new_balance: Decimal,
    pub target_id: String,
    pub target_old_balance: Decimal,
    pub target_new_balance: Decimal,
    pub is_fraud: i64
}

impl Transaction {
    /// Derived flag appended by the `Ledger` profile at serialization time.
    pub fn exceeds_transaction_limit(&self) -> bool {
        self.amount > transaction_limit()
    }
}
