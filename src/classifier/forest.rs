use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::classifier::dataset::FraudDataset;
use crate::models::PipelineError;

/// Bagging ensemble over CART decision trees.
///
/// linfa ships a single decision-tree learner; the ensemble is the usual
/// construction on top of it: each tree is fit on a bootstrap resample of the
/// training partition and prediction is a majority vote.
pub struct BaggedForest {
    trees: Vec<DecisionTree<f64, usize>>
}

impl BaggedForest {
    /// Fits `ensemble_size` trees, each on a seeded bootstrap resample.
    pub fn fit(
        train: &FraudDataset,
        ensemble_size: usize,
        seed: u64,
    ) -> Result<Self, PipelineError> {
        let samples = train.records().nrows();

        if samples == 0 || ensemble_size == 0 {
            return Err(PipelineError::empty_input("Ensemble training"));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(ensemble_size);

        for _ in 0..ensemble_size {
            let indices: Vec<usize> = (0..samples)
                .map(|_| rng.random_range(0..samples))
                .collect();

            let resample = Dataset::new(
                train.records().select(Axis(0), &indices),
                train.targets().select(Axis(0), &indices),
            );

            let tree = DecisionTree::params()
                .fit(&resample)
                .map_err(PipelineError::training)?;

            trees.push(tree);
        }

        Ok(Self { trees })
    }

    /// Fraction of trees voting fraud for each sample.
    pub fn vote_fractions(&self, records: &Array2<f64>) -> Array1<f64> {
        let mut votes = Array1::<f64>::zeros(records.nrows());

        for tree in &self.trees {
            let predicted = tree.predict(records);

            for (vote, label) in votes.iter_mut().zip(predicted.iter()) {
                *vote += *label as f64;
            }
        }

        votes / self.trees.len() as f64
    }

    /// Majority-vote class predictions.
    pub fn predict(&self, records: &Array2<f64>) -> Array1<usize> {
        self.vote_fractions(records)
            .mapv(|fraction| usize::from(fraction >= 0.5))
    }
}
