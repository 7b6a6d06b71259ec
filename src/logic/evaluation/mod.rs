//! Evaluation Module - Binary classification scoring
//!
//! Scores predictions returned by a classifier collaborator against the
//! carried-through test targets.

pub mod metrics;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::logic::error::PrepResult;
use crate::logic::labels::BinaryTarget;

pub use metrics::{roc_auc, ConfusionMatrix};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelReport {
    pub model: String,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub roc_auc: Option<f64>,
}

/// Score one model's output
pub fn evaluate(
    model: &str,
    truth: &[BinaryTarget],
    predicted: &[BinaryTarget],
    scores: Option<&[f64]>,
) -> PrepResult<ModelReport> {
    let cm = ConfusionMatrix::from_predictions(truth, predicted)?;
    let roc_auc = match scores {
        Some(s) => roc_auc(truth, s)?,
        None => None,
    };

    let report = ModelReport {
        model: model.to_string(),
        accuracy: cm.accuracy(),
        precision: cm.precision(),
        recall: cm.recall(),
        f1_score: cm.f1(),
        confusion_matrix: cm,
        roc_auc,
    };

    log::info!(
        "{}: accuracy {:.4}, precision {:.4}, recall {:.4}, f1 {:.4}{}",
        report.model,
        report.accuracy,
        report.precision,
        report.recall,
        report.f1_score,
        report.roc_auc.map(|a| format!(", roc_auc {:.4}", a)).unwrap_or_default()
    );

    Ok(report)
}

/// Highest F1; the earliest report wins ties
pub fn best_by_f1(reports: &[ModelReport]) -> Option<&ModelReport> {
    reports.iter().fold(None, |best: Option<&ModelReport>, r| match best {
        Some(b) if b.f1_score >= r.f1_score => Some(b),
        _ => Some(r),
    })
}
