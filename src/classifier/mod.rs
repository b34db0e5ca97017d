mod dataset;
mod forest;
mod metrics;

use tracing::info;

use crate::cleaning::ValidatedTable;
use crate::models::PipelineError;

pub use forest::BaggedForest;
pub use metrics::average_precision;

/// Number of trees in the bagging ensemble.
pub const ENSEMBLE_SIZE: usize = 15;
/// Seed for the train/test shuffle and every bootstrap resample, so results
/// are reproducible run to run.
pub const SEED: u64 = 121;

const TEST_FRACTION: f64 = 0.2;

/// Trains the fraud classifier and returns its average-precision score as a
/// percentage in `[0, 100]`, rounded to two decimals.
///
/// Party identifiers are dropped, the transaction type is one-hot encoded
/// over the full table, rows are split 80/20 with a fixed seed, and an
/// ensemble of decision trees is fit on the training partition. Class
/// predictions for the evaluation partition are scored against ground truth
/// with the precision-recall-curve average precision.
pub fn train_and_score(table: &ValidatedTable) -> Result<f64, PipelineError> {
    let (features, labels) = dataset::encode(table.rows());
    let (train, test) = dataset::split(features, labels, TEST_FRACTION, SEED)?;

    info!(
        "Training {ENSEMBLE_SIZE}-tree ensemble on {} row(s), evaluating on {}",
        train.records().nrows(),
        test.records().nrows()
    );

    let forest = BaggedForest::fit(&train, ENSEMBLE_SIZE, SEED)?;
    let predictions = forest.predict(test.records());

    let scores: Vec<f64> = predictions.iter().map(|&label| label as f64).collect();
    let truth: Vec<usize> = test.targets().iter().copied().collect();
    let score = average_precision(&scores, &truth)?;

    Ok((score * 10_000.0).round() / 100.0)
}
