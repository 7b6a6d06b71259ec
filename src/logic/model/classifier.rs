//! Classifier Collaborator
//!
//! The preparation core hands aligned matrices to anything implementing
//! `Classifier`. Real models live outside this crate.

use ndarray::ArrayView2;
use thiserror::Error;

use crate::logic::labels::BinaryTarget;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("{0} has not been fitted")]
    NotFitted(String),

    #[error("shape mismatch: expected {expected} {what}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("training target contains a single class")]
    SingleClass,
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Trait for classifiers (fit / predict / predict_proba)
pub trait Classifier {
    fn name(&self) -> &str;

    fn fit(&mut self, features: ArrayView2<'_, f64>, target: &[BinaryTarget]) -> ModelResult<()>;

    fn predict(&self, features: ArrayView2<'_, f64>) -> ModelResult<Vec<BinaryTarget>>;

    /// Attack-class scores in [0, 1]; `None` when the model exposes none
    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> ModelResult<Option<Vec<f64>>>;
}

/// Row count of `features` must match `target`
pub fn check_rows(features: &ArrayView2<'_, f64>, target: &[BinaryTarget]) -> ModelResult<()> {
    if features.nrows() != target.len() {
        return Err(ModelError::ShapeMismatch {
            what: "target rows",
            expected: features.nrows(),
            actual: target.len(),
        });
    }
    Ok(())
}

/// Column count of `features` must match what the model was fitted on
pub fn check_width(features: &ArrayView2<'_, f64>, fitted: usize) -> ModelResult<()> {
    if features.ncols() != fitted {
        return Err(ModelError::ShapeMismatch {
            what: "feature columns",
            expected: fitted,
            actual: features.ncols(),
        });
    }
    Ok(())
}
