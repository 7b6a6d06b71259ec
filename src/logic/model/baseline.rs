//! Reference Classifiers
//!
//! Small smoke baselines that let the pipeline run end to end without an
//! external ML library. They are not tuned and not meant to be competitive.

use ndarray::{Array1, ArrayView2, Axis};

use crate::logic::labels::BinaryTarget;
use super::classifier::{check_rows, check_width, Classifier, ModelError, ModelResult};

// ============================================================================
// MAJORITY CLASS
// ============================================================================

/// Always predicts the dominant training class. Exposes no scores.
#[derive(Debug, Clone, Default)]
pub struct MajorityClassifier {
    fitted: Option<(BinaryTarget, usize)>,
}

impl MajorityClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn fitted(&self) -> ModelResult<(BinaryTarget, usize)> {
        self.fitted.ok_or_else(|| ModelError::NotFitted(self.name().to_string()))
    }
}

impl Classifier for MajorityClassifier {
    fn name(&self) -> &str {
        "Majority"
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, target: &[BinaryTarget]) -> ModelResult<()> {
        check_rows(&features, target)?;

        let attacks = target.iter().filter(|t| t.is_attack()).count();
        let class = BinaryTarget::from_attack(attacks * 2 > target.len());
        self.fitted = Some((class, features.ncols()));
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> ModelResult<Vec<BinaryTarget>> {
        let (class, width) = self.fitted()?;
        check_width(&features, width)?;
        Ok(vec![class; features.nrows()])
    }

    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> ModelResult<Option<Vec<f64>>> {
        let (_, width) = self.fitted()?;
        check_width(&features, width)?;
        Ok(None)
    }
}

// ============================================================================
// NEAREST CENTROID
// ============================================================================

#[derive(Debug, Clone)]
struct Centroids {
    normal: Array1<f64>,
    attack: Array1<f64>,
}

/// Nearest class centroid in (standardized) feature space.
///
/// Attack score = d_normal / (d_normal + d_attack), 0.5 when both are zero.
#[derive(Debug, Clone, Default)]
pub struct CentroidClassifier {
    centroids: Option<Centroids>,
}

impl CentroidClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn centroids(&self) -> ModelResult<&Centroids> {
        self.centroids
            .as_ref()
            .ok_or_else(|| ModelError::NotFitted(self.name().to_string()))
    }

    fn scores(&self, features: ArrayView2<'_, f64>) -> ModelResult<Vec<f64>> {
        let centroids = self.centroids()?;
        check_width(&features, centroids.normal.len())?;

        let scores = features
            .axis_iter(Axis(0))
            .map(|row| {
                let to_normal = (&row - &centroids.normal).mapv(|v| v * v).sum().sqrt();
                let to_attack = (&row - &centroids.attack).mapv(|v| v * v).sum().sqrt();
                let total = to_normal + to_attack;
                if total > 0.0 {
                    to_normal / total
                } else {
                    0.5
                }
            })
            .collect();

        Ok(scores)
    }
}

impl Classifier for CentroidClassifier {
    fn name(&self) -> &str {
        "NearestCentroid"
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, target: &[BinaryTarget]) -> ModelResult<()> {
        check_rows(&features, target)?;

        let width = features.ncols();
        let mut normal = Array1::<f64>::zeros(width);
        let mut attack = Array1::<f64>::zeros(width);
        let (mut normal_rows, mut attack_rows) = (0usize, 0usize);

        for (row, class) in features.axis_iter(Axis(0)).zip(target) {
            if class.is_attack() {
                attack += &row;
                attack_rows += 1;
            } else {
                normal += &row;
                normal_rows += 1;
            }
        }

        if normal_rows == 0 || attack_rows == 0 {
            return Err(ModelError::SingleClass);
        }

        normal /= normal_rows as f64;
        attack /= attack_rows as f64;
        self.centroids = Some(Centroids { normal, attack });
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> ModelResult<Vec<BinaryTarget>> {
        Ok(self
            .scores(features)?
            .into_iter()
            .map(|score| BinaryTarget::from_attack(score > 0.5))
            .collect())
    }

    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> ModelResult<Option<Vec<f64>>> {
        self.scores(features).map(Some)
    }
}
