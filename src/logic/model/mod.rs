//! Model Module - Classifier seam
//!
//! `Classifier` is the contract external models implement. Two reference
//! baselines ship with the crate so the pipeline can run on its own.

pub mod classifier;
pub mod baseline;

// Re-export common types
pub use classifier::{Classifier, ModelError, ModelResult};
pub use baseline::{CentroidClassifier, MajorityClassifier};

/// Reference classifiers in evaluation order
pub fn reference_classifiers() -> Vec<Box<dyn Classifier>> {
    vec![
        Box::new(MajorityClassifier::new()),
        Box::new(CentroidClassifier::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::labels::BinaryTarget::{self, Attack, Normal};
    use ndarray::array;

    fn training() -> (ndarray::Array2<f64>, Vec<BinaryTarget>) {
        let x = array![[0.0, 0.0], [0.2, 0.0], [5.0, 5.0], [5.2, 4.8], [4.9, 5.1]];
        (x, vec![Normal, Normal, Attack, Attack, Attack])
    }

    #[test]
    fn test_majority_predicts_dominant_class() {
        let (x, y) = training();
        let mut model = MajorityClassifier::new();
        model.fit(x.view(), &y).unwrap();

        assert_eq!(model.predict(x.view()).unwrap(), vec![Attack; 5]);
        assert_eq!(model.predict_proba(x.view()).unwrap(), None);
    }

    #[test]
    fn test_centroid_separates_clusters() {
        let (x, y) = training();
        let mut model = CentroidClassifier::new();
        model.fit(x.view(), &y).unwrap();

        let probe = array![[0.1, 0.1], [5.0, 5.0]];
        assert_eq!(model.predict(probe.view()).unwrap(), vec![Normal, Attack]);

        let scores = model.predict_proba(probe.view()).unwrap().unwrap();
        assert!(scores[0] < 0.5);
        assert!(scores[1] > 0.5);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_centroid_rejects_single_class() {
        let x = array![[1.0], [2.0]];
        let mut model = CentroidClassifier::new();
        assert_eq!(model.fit(x.view(), &[Attack, Attack]), Err(ModelError::SingleClass));
    }

    #[test]
    fn test_unfitted_and_shape_errors() {
        let (x, y) = training();
        let mut model = CentroidClassifier::new();
        assert!(matches!(model.predict(x.view()), Err(ModelError::NotFitted(_))));

        assert!(matches!(
            model.fit(x.view(), &y[..2]),
            Err(ModelError::ShapeMismatch { .. })
        ));

        model.fit(x.view(), &y).unwrap();
        let narrow = array![[1.0]];
        assert!(matches!(
            model.predict(narrow.view()),
            Err(ModelError::ShapeMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_reference_classifiers() {
        let names: Vec<String> = reference_classifiers().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["Majority", "NearestCentroid"]);
    }
}
