use super::*;
use crate::logic::error::PrepError;
use crate::logic::labels::BinaryTarget::{Attack, Normal};

#[test]
fn test_confusion_counts() {
    let truth = [Normal, Normal, Attack, Attack, Attack];
    let predicted = [Normal, Attack, Attack, Attack, Normal];

    let cm = ConfusionMatrix::from_predictions(&truth, &predicted).unwrap();
    assert_eq!(cm.as_grid(), [[1, 1], [1, 2]]);
    assert_eq!(cm.total(), 5);
    assert!((cm.accuracy() - 0.6).abs() < 1e-12);
    assert!((cm.precision() - 2.0 / 3.0).abs() < 1e-12);
    assert!((cm.recall() - 2.0 / 3.0).abs() < 1e-12);
    assert!((cm.f1() - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_empty_denominators_score_zero() {
    let truth = [Attack, Attack];
    let predicted = [Normal, Normal];

    let cm = ConfusionMatrix::from_predictions(&truth, &predicted).unwrap();
    assert_eq!(cm.precision(), 0.0);
    assert_eq!(cm.recall(), 0.0);
    assert_eq!(cm.f1(), 0.0);
}

#[test]
fn test_length_mismatch() {
    let result = ConfusionMatrix::from_predictions(&[Normal], &[Normal, Attack]);
    assert!(matches!(result, Err(PrepError::SchemaMismatch(_))));
}

#[test]
fn test_roc_auc_perfect_and_inverted() {
    let truth = [Normal, Normal, Attack, Attack];

    let perfect = roc_auc(&truth, &[0.1, 0.2, 0.8, 0.9]).unwrap().unwrap();
    assert!((perfect - 1.0).abs() < 1e-12);

    let inverted = roc_auc(&truth, &[0.9, 0.8, 0.2, 0.1]).unwrap().unwrap();
    assert!(inverted.abs() < 1e-12);
}

#[test]
fn test_roc_auc_ties() {
    let truth = [Normal, Attack, Normal, Attack];
    let auc = roc_auc(&truth, &[0.5, 0.5, 0.5, 0.5]).unwrap().unwrap();
    assert!((auc - 0.5).abs() < 1e-12);

    // one positive above both negatives, one tied with a negative
    let auc = roc_auc(&[Normal, Normal, Attack, Attack], &[0.1, 0.4, 0.4, 0.9]).unwrap().unwrap();
    assert!((auc - 0.875).abs() < 1e-12);
}

#[test]
fn test_roc_auc_single_class() {
    assert_eq!(roc_auc(&[Attack, Attack], &[0.3, 0.7]).unwrap(), None);
}

#[test]
fn test_evaluate_report() {
    let truth = [Normal, Attack, Attack, Normal];
    let predicted = [Normal, Attack, Normal, Normal];
    let scores = [0.1, 0.9, 0.4, 0.2];

    let report = evaluate("probe", &truth, &predicted, Some(&scores[..])).unwrap();
    assert_eq!(report.model, "probe");
    assert!((report.accuracy - 0.75).abs() < 1e-12);
    assert!((report.precision - 1.0).abs() < 1e-12);
    assert!((report.recall - 0.5).abs() < 1e-12);
    assert_eq!(report.roc_auc, Some(1.0));

    let without = evaluate("plain", &truth, &predicted, None).unwrap();
    assert_eq!(without.roc_auc, None);
}

#[test]
fn test_best_by_f1_prefers_first_on_tie() {
    let truth = [Normal, Attack];
    let a = evaluate("a", &truth, &[Normal, Attack], None).unwrap();
    let b = evaluate("b", &truth, &[Attack, Attack], None).unwrap();
    let c = evaluate("c", &truth, &[Normal, Attack], None).unwrap();

    let reports = vec![b, a, c];
    assert_eq!(best_by_f1(&reports).map(|r| r.model.as_str()), Some("a"));
    assert!(best_by_f1(&[]).is_none());
}
