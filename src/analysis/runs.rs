use rust_decimal::Decimal;

use crate::models::{PipelineError, RunStats};
use crate::types::Hour;

/// Groups strictly ascending, deduplicated hour indices into maximal
/// consecutive runs.
///
/// Each run is a chain of hours where every element equals its predecessor
/// plus one. The input itself is never mutated.
pub fn find_runs(hours: &[Hour]) -> Result<Vec<Vec<Hour>>, PipelineError> {
    if hours.is_empty() {
        return Err(PipelineError::empty_input("Consecutive-run detection"));
    }

    let mut runs = Vec::new();
    let mut current = vec![hours[0]];

    for window in hours.windows(2) {
        if window[1] == window[0] + 1 {
            current.push(window[1]);
        } else {
            runs.push(std::mem::replace(&mut current, vec![window[1]]));
        }
    }

    runs.push(current);

    Ok(runs)
}

/// Statistics over the validated runs (length two or more).
///
/// Isolated hours are noise, not a run. When nothing qualifies the result is
/// an explicit empty [`RunStats`] instead of a division by zero.
pub fn run_stats(runs: &[Vec<Hour>]) -> RunStats {
    let lengths: Vec<usize> = runs
        .iter()
        .map(Vec::len)
        .filter(|&length| length >= 2)
        .collect();

    if lengths.is_empty() {
        return RunStats {
            validated_runs: 0,
            mean_length: None
        };
    }

    let total: usize = lengths.iter().sum();
    let mean = (Decimal::from(total) / Decimal::from(lengths.len())).round_dp(2);

    RunStats {
        validated_runs: lengths.len(),
        mean_length: Some(mean)
    }
}
