use std::cmp::Ordering;

use crate::models::PipelineError;

/// Average precision over the precision-recall curve, in `[0, 1]`.
///
/// Thresholds descend over the distinct score values and each recall
/// increment is weighted by the precision at that threshold, the standard
/// step-wise summary of the curve. Tied scores are consumed as a single
/// threshold so their ordering cannot affect the result.
pub fn average_precision(scores: &[f64], truth: &[usize]) -> Result<f64, PipelineError> {
    if scores.is_empty() || scores.len() != truth.len() {
        return Err(PipelineError::empty_input("Average-precision scoring"));
    }

    let positives = truth.iter().filter(|&&label| label == 1).count();
    if positives == 0 {
        return Err(PipelineError::empty_input(
            "Average-precision scoring over a partition with positive labels",
        ));
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    let mut true_positives = 0usize;
    let mut predicted = 0usize;
    let mut previous_recall = 0.0;
    let mut score = 0.0;

    let mut i = 0;
    while i < order.len() {
        let threshold = scores[order[i]];

        while i < order.len() && scores[order[i]] == threshold {
            predicted += 1;
            if truth[order[i]] == 1 {
                true_positives += 1;
            }
            i += 1;
        }

        let precision = true_positives as f64 / predicted as f64;
        let recall = true_positives as f64 / positives as f64;
        score += (recall - previous_recall) * precision;
        previous_recall = recall;
    }

    Ok(score)
}
