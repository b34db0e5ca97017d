use rust_decimal::Decimal;

use crate::models::TransactionType;
use crate::types::Hour;

/// Derived statistics for a single hour of the aggregation range.
///
/// Computed fresh each run and never mutated afterwards. The dominant type is
/// `None` only for hours with no transactions at all.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySummary {
    pub hour: Hour,
    pub volume: Decimal,
    pub number_of_transactions: usize,
    pub percentage_of_fraudulent_transactions: Decimal,
    pub most_frequent_type: Option<TransactionType>,
    pub most_frequent_type_volume: Decimal,
    pub number_of_most_frequent_type_transactions: usize
}

/// Aggregate statistics over the validated consecutive fraud runs.
///
/// `mean_length` is `None` when no run lasted two hours or more, so an empty
/// result never turns into a division by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub validated_runs: usize,
    pub mean_length: Option<Decimal>
}
