//! Binary Metrics
//!
//! Attack (1) is the positive class. Ratios with an empty denominator are 0.

use serde::{Deserialize, Serialize};

use crate::logic::error::{PrepError, PrepResult};
use crate::logic::labels::BinaryTarget;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_positive: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(truth: &[BinaryTarget], predicted: &[BinaryTarget]) -> PrepResult<Self> {
        check_len("predictions", truth.len(), predicted.len())?;

        let mut cm = Self::default();
        for (t, p) in truth.iter().zip(predicted) {
            match (t.is_attack(), p.is_attack()) {
                (false, false) => cm.true_negative += 1,
                (false, true) => cm.false_positive += 1,
                (true, false) => cm.false_negative += 1,
                (true, true) => cm.true_positive += 1,
            }
        }
        Ok(cm)
    }

    pub fn total(&self) -> usize {
        self.true_negative + self.false_positive + self.false_negative + self.true_positive
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r > 0.0 {
            2.0 * p * r / (p + r)
        } else {
            0.0
        }
    }

    /// Rows: actual (normal, attack); columns: predicted (normal, attack)
    pub fn as_grid(&self) -> [[usize; 2]; 2] {
        [
            [self.true_negative, self.false_positive],
            [self.false_negative, self.true_positive],
        ]
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn check_len(what: &str, expected: usize, actual: usize) -> PrepResult<()> {
    if expected != actual {
        return Err(PrepError::schema(format!(
            "{} has {} entries, truth has {}",
            what, actual, expected
        )));
    }
    Ok(())
}

/// Area under the ROC curve via the rank-sum statistic (ties averaged).
/// `None` unless both classes are present.
pub fn roc_auc(truth: &[BinaryTarget], scores: &[f64]) -> PrepResult<Option<f64>> {
    check_len("scores", truth.len(), scores.len())?;

    let positives = truth.iter().filter(|t| t.is_attack()).count();
    let negatives = truth.len() - positives;
    if positives == 0 || negatives == 0 {
        return Ok(None);
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    // 1-based ranks, tied scores share their average rank
    let mut ranks = vec![0.0; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && scores[order[end + 1]] == scores[order[start]] {
            end += 1;
        }
        let average = (start + end) as f64 / 2.0 + 1.0;
        for &i in &order[start..=end] {
            ranks[i] = average;
        }
        start = end + 1;
    }

    let positive_rank_sum: f64 = truth
        .iter()
        .zip(&ranks)
        .filter(|(t, _)| t.is_attack())
        .map(|(_, r)| r)
        .sum();

    let p = positives as f64;
    let n = negatives as f64;
    Ok(Some((positive_rank_sum - p * (p + 1.0) / 2.0) / (p * n)))
}
