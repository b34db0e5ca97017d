use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::cleaning::ValidatedTable;
use crate::models::{HourlySummary, PipelineError, Transaction, TransactionType};
use crate::output;
use crate::types::Hour;

/// Computes one [`HourlySummary`] per hour of `[start_hour, end_hour]`,
/// inclusive, in ascending hour order, and writes the summary artifact.
///
/// The range must satisfy `1 <= start_hour <= end_hour <= max hour in the
/// dataset`. Hours with no transactions still produce a summary row with
/// zero volume and counts, a 0.00 fraud percentage and no dominant type, so
/// the output always covers the full range.
pub fn aggregate_hourly(
    table: &ValidatedTable,
    start_hour: Hour,
    end_hour: Hour,
    out_dir: &Path,
) -> Result<Vec<HourlySummary>, PipelineError> {
    let max_hour = table.max_hour();

    if start_hour < 1 || start_hour > end_hour || end_hour > max_hour {
        return Err(PipelineError::range(start_hour, end_hour, max_hour));
    }

    let summaries: Vec<HourlySummary> = (start_hour..=end_hour)
        .map(|hour| summarize_hour(table.rows(), hour))
        .collect();

    info!("Aggregated hours {start_hour}..={end_hour} into {} summaries", summaries.len());

    output::write_hourly(&summaries, out_dir)?;

    Ok(summaries)
}

/// Hours of the aggregation range whose transactions were all fraudulent.
pub fn fully_fraudulent_hours(summaries: &[HourlySummary]) -> Vec<Hour> {
    summaries
        .iter()
        .filter(|summary| {
            summary.number_of_transactions > 0
                && summary.percentage_of_fraudulent_transactions == Decimal::from(100u32)
        })
        .map(|summary| summary.hour)
        .collect()
}

fn summarize_hour(rows: &[Transaction], hour: Hour) -> HourlySummary {
    let mut volume = Decimal::ZERO;
    let mut count = 0usize;
    let mut fraud_count = 0usize;
    // Per-type tallies in first-encountered order; the stable mode below
    // depends on this ordering for its tie-break.
    let mut tallies: Vec<(TransactionType, usize, Decimal)> = Vec::new();

    for row in rows.iter().filter(|row| row.hour == hour) {
        volume += row.amount;
        count += 1;

        if row.is_fraud == 1 {
            fraud_count += 1;
        }

        match tallies.iter_mut().find(|(kind, _, _)| *kind == row.kind) {
            Some(tally) => {
                tally.1 += 1;
                tally.2 += row.amount;
            }
            None => tallies.push((row.kind, 1, row.amount))
        }
    }

    // Stable count-based mode: a later type must be strictly more frequent
    // to displace an earlier one.
    let mut dominant: Option<(TransactionType, usize, Decimal)> = None;
    for &tally in &tallies {
        if dominant.is_none_or(|(_, best, _)| tally.1 > best) {
            dominant = Some(tally);
        }
    }

    let percentage = if count == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(fraud_count) * Decimal::from(100u32) / Decimal::from(count)).round_dp(2)
    };

    HourlySummary {
        hour,
        volume: volume.round_dp(2),
        number_of_transactions: count,
        percentage_of_fraudulent_transactions: percentage,
        most_frequent_type: dominant.map(|(kind, _, _)| kind),
        most_frequent_type_volume: dominant
            .map(|(_, _, type_volume)| type_volume.round_dp(2))
            .unwrap_or(Decimal::ZERO),
        number_of_most_frequent_type_transactions: dominant
            .map(|(_, type_count, _)| type_count)
            .unwrap_or(0)
    }
}
