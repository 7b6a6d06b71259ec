//! Standardization - zero mean, unit variance
//!
//! Statistics are fitted on the training matrix only and returned as a value.
//! Nothing is cached between calls.

use ndarray::{Array2, Axis, Zip};
use serde::{Deserialize, Serialize};

use crate::logic::error::{PrepError, PrepResult};

/// Scales below this are treated as zero variance
const MIN_SCALE: f64 = 10.0 * f64::EPSILON;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    pub samples: usize,
}

impl ScalingParams {
    /// Per-column mean and population standard deviation.
    /// Zero-variance (or empty) columns get scale 1.
    pub fn fit(train: &Array2<f64>) -> Self {
        let (rows, cols) = train.dim();

        if rows == 0 {
            return Self {
                mean: vec![0.0; cols],
                scale: vec![1.0; cols],
                samples: 0,
            };
        }

        let n = rows as f64;
        let mean: Vec<f64> = train
            .axis_iter(Axis(1))
            .map(|column| column.sum() / n)
            .collect();

        let scale = train
            .axis_iter(Axis(1))
            .zip(mean.iter())
            .map(|(column, &m)| {
                let variance = column.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n;
                let std = variance.sqrt();
                if std < MIN_SCALE {
                    1.0
                } else {
                    std
                }
            })
            .collect();

        Self {
            mean,
            scale,
            samples: rows,
        }
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// Apply fitted statistics in place
    pub fn transform(&self, matrix: &mut Array2<f64>) -> PrepResult<()> {
        if matrix.ncols() != self.width() {
            return Err(PrepError::schema(format!(
                "scaler fitted on {} columns, matrix has {}",
                self.width(),
                matrix.ncols()
            )));
        }

        for mut row in matrix.axis_iter_mut(Axis(0)) {
            Zip::from(&mut row)
                .and(&self.mean[..])
                .and(&self.scale[..])
                .for_each(|x, &m, &s| *x = (*x - m) / s);
        }

        Ok(())
    }
}
