use linfa::Dataset;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{PipelineError, Transaction, TransactionType};

/// Feature matrix paired with fraud labels.
pub type FraudDataset = Dataset<f64, usize, ndarray::Ix1>;

/// Columns that precede the one-hot block: hour, amount and the four
/// balances. Party identifiers carry no generalizable signal and are not
/// encoded at all.
const NUMERIC_FEATURES: usize = 6;

/// Assembles the feature matrix and label vector for the whole table.
///
/// The one-hot block has one column per observed transaction type, laid out
/// in `TransactionType::ALL` declaration order. Because the encoder sees the
/// full table before any split, repeated runs over the same data always
/// produce the same layout.
pub fn encode(rows: &[Transaction]) -> (Array2<f64>, Array1<usize>) {
    let observed: Vec<TransactionType> = TransactionType::ALL
        .into_iter()
        .filter(|&kind| rows.iter().any(|row| row.kind == kind))
        .collect();

    let mut features = Array2::zeros((rows.len(), NUMERIC_FEATURES + observed.len()));
    let mut labels = Array1::zeros(rows.len());

    for (i, row) in rows.iter().enumerate() {
        features[[i, 0]] = row.hour as f64;
        features[[i, 1]] = to_f64(row.amount);
        features[[i, 2]] = to_f64(row.initiator_old_balance);
        features[[i, 3]] = to_f64(row.initiator_new_balance);
        features[[i, 4]] = to_f64(row.target_old_balance);
        features[[i, 5]] = to_f64(row.target_new_balance);

        if let Some(position) = observed.iter().position(|&kind| kind == row.kind) {
            features[[i, NUMERIC_FEATURES + position]] = 1.0;
        }

        labels[i] = usize::from(row.is_fraud == 1);
    }

    (features, labels)
}

/// Splits rows into training and evaluation partitions.
///
/// Indices are shuffled with a fixed-seed `StdRng`, so the partition is
/// deterministic for a given table.
pub fn split(
    features: Array2<f64>,
    labels: Array1<usize>,
    test_fraction: f64,
    seed: u64,
) -> Result<(FraudDataset, FraudDataset), PipelineError> {
    let samples = features.nrows();
    let test_size = ((samples as f64) * test_fraction).round() as usize;

    if samples == 0 || test_size == 0 || test_size == samples {
        return Err(PipelineError::empty_input("Train/test split"));
    }

    let mut indices: Vec<usize> = (0..samples).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    let (test_indices, train_indices) = indices.split_at(test_size);

    Ok((
        subset(&features, &labels, train_indices),
        subset(&features, &labels, test_indices),
    ))
}

fn subset(features: &Array2<f64>, labels: &Array1<usize>, indices: &[usize]) -> FraudDataset {
    Dataset::new(
        features.select(Axis(0), indices),
        labels.select(Axis(0), indices),
    )
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
