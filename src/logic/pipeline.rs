//! Pipeline - End-to-end sequencing
//!
//! raw tables → binary labels → aligned matrices → classifiers → metrics.
//! All state is local to one `run`; nothing is cached between runs.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{APP_VERSION, LABEL_SUMMARY_TOP};
use crate::logic::config::PipelineConfig;
use crate::logic::error::PrepResult;
use crate::logic::evaluation::{self, ModelReport};
use crate::logic::features::{self, AlignedFeatures, CatalogInfo, CoercionCounts};
use crate::logic::labels::{self, LabelCode, LabelSummary};
use crate::logic::model::{self, Classifier};
use crate::logic::table::{self, Table};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Labels derived and features aligned, ready for the classifiers
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub candidates: Vec<String>,
    pub train_labels: LabelSummary,
    pub test_labels: LabelSummary,
    pub features: AlignedFeatures,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub app_version: String,
    pub normal_value: String,
    pub candidates: Vec<String>,
    pub train_labels: LabelSummary,
    pub test_labels: LabelSummary,
    pub train_shape: (usize, usize),
    pub test_shape: (usize, usize),
    pub catalog: CatalogInfo,
    pub coercions: CoercionCounts,
    pub coercions_by_column: BTreeMap<String, CoercionCounts>,
    pub unseen_categories: BTreeMap<String, BTreeSet<String>>,
    pub models: Vec<ModelReport>,
    pub best_model: Option<String>,
}

impl RunReport {
    pub fn to_json(&self) -> PrepResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> PrepResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        log::info!("Report written to {}", path.display());
        Ok(())
    }
}

// ============================================================================
// STAGES
// ============================================================================

/// Load both tables from the configured paths and run every stage
pub fn run(config: &PipelineConfig) -> PrepResult<RunReport> {
    log::info!("Loading dataset files...");
    let train = table::read_table_from_path(&config.train_path, config.has_headers)?;
    let test = table::read_table_from_path(&config.test_path, config.has_headers)?;

    let prepared = prepare(train, test, config)?;
    let mut classifiers = model::reference_classifiers();
    let models = evaluate_models(&prepared.features, &mut classifiers)?;

    Ok(build_report(prepared, models))
}

/// Choose the normal value on train, apply it to test, align features
pub fn prepare(train: Table, test: Table, config: &PipelineConfig) -> PrepResult<PreparedData> {
    log::info!("Training samples: {}, testing samples: {}", train.len(), test.len());

    let ranking = labels::rank_labels(&train, &config.label_column)?;
    for entry in ranking.iter().take(LABEL_SUMMARY_TOP) {
        log::info!("   Label {}: {:>6} samples", entry.label, entry.count);
    }

    let chain = labels::candidate_chain(&config.normal_labels, &ranking, config.fallback_depth);
    let candidates: Vec<String> = chain.iter().map(LabelCode::canonical).collect();
    log::info!("Normal-value candidates: {:?}", candidates);

    let train = labels::normalize_with_fallback(train, &config.label_column, &chain)?;

    // Test must use the value chosen on train, no independent fallback
    let normal = LabelCode::Name(train.normal_value().to_string());
    let test = labels::normalize(test, &config.label_column, &normal)?;

    let train_labels = labels::summarize(&train)?;
    let test_labels = labels::summarize(&test)?;
    log::info!("Train attack ratio: {:.3}", train_labels.attack_ratio);
    log::info!("Test attack ratio: {:.3}", test_labels.attack_ratio);

    let features = features::align(&train, &test, &config.excluded())?;

    Ok(PreparedData {
        candidates,
        train_labels,
        test_labels,
        features,
    })
}

/// Fit, predict and score each classifier. A classifier that fails is
/// skipped with a warning; the others still run.
pub fn evaluate_models(
    features: &AlignedFeatures,
    classifiers: &mut [Box<dyn Classifier>],
) -> PrepResult<Vec<ModelReport>> {
    let mut reports = Vec::with_capacity(classifiers.len());

    for classifier in classifiers.iter_mut() {
        let name = classifier.name().to_string();
        log::info!("Training {}...", name);

        let outcome = classifier
            .fit(features.train.view(), &features.train_target)
            .and_then(|_| classifier.predict(features.test.view()))
            .and_then(|predicted| {
                classifier
                    .predict_proba(features.test.view())
                    .map(|scores| (predicted, scores))
            });

        match outcome {
            Ok((predicted, scores)) => {
                reports.push(evaluation::evaluate(
                    &name,
                    &features.test_target,
                    &predicted,
                    scores.as_deref(),
                )?);
            }
            Err(e) => log::warn!("Skipping {}: {}", name, e),
        }
    }

    Ok(reports)
}

fn build_report(prepared: PreparedData, models: Vec<ModelReport>) -> RunReport {
    let PreparedData {
        candidates,
        train_labels,
        test_labels,
        features,
    } = prepared;

    let best_model = evaluation::best_by_f1(&models).map(|r| r.model.clone());
    if let Some(best) = &best_model {
        log::info!("Best model by F1: {}", best);
    }

    RunReport {
        run_id: uuid::Uuid::new_v4().to_string(),
        generated_at: Utc::now(),
        app_version: APP_VERSION.to_string(),
        normal_value: train_labels.normal_value.clone(),
        candidates,
        train_labels,
        test_labels,
        train_shape: features.train.dim(),
        test_shape: features.test.dim(),
        catalog: features.catalog.info(),
        coercions: features.diagnostics.coercion_totals(),
        coercions_by_column: features.diagnostics.coercions,
        unseen_categories: features.diagnostics.unseen_categories,
        models,
        best_model,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::error::PrepError;

    fn train_table() -> Table {
        Table::from_rows(
            &["protocol", "bytes", "difficulty", "label"],
            vec![
                vec!["tcp", "100", "21", "21"],
                vec!["tcp", "120", "21", "21"],
                vec!["udp", "9000", "18", "11"],
                vec!["udp", "9100", "15", "11"],
                vec!["tcp", "110", "20", "21"],
            ],
        )
        .unwrap()
    }

    fn test_table() -> Table {
        Table::from_rows(
            &["protocol", "bytes", "difficulty", "label"],
            vec![
                vec!["tcp", "105", "21", "21"],
                vec!["icmp", "N/A", "19", "11"],
                vec!["udp", "8900", "17", "11"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_prepare_falls_back_to_frequent_label() {
        let config = PipelineConfig::default();
        let prepared = prepare(train_table(), test_table(), &config).unwrap();

        assert_eq!(prepared.candidates, vec!["normal", "21", "11"]);
        assert_eq!(prepared.train_labels.normal_value, "21");
        assert_eq!(prepared.train_labels.normal_count, 3);
        assert_eq!(prepared.test_labels.attack_count, 2);

        let names = prepared.features.catalog.names();
        assert_eq!(names, vec!["protocol_tcp", "protocol_udp", "bytes"]);
        assert_eq!(prepared.features.train.ncols(), prepared.features.test.ncols());
    }

    #[test]
    fn test_prepare_fails_when_test_has_no_normals() {
        let config = PipelineConfig::default();
        let test = Table::from_rows(
            &["protocol", "bytes", "difficulty", "label"],
            vec![vec!["tcp", "1", "1", "11"]],
        )
        .unwrap();

        let result = prepare(train_table(), test, &config);
        assert!(matches!(result, Err(PrepError::DegenerateLabel { .. })));
    }

    #[test]
    fn test_models_are_scored() {
        let config = PipelineConfig::default();
        let prepared = prepare(train_table(), test_table(), &config).unwrap();

        let mut classifiers = model::reference_classifiers();
        let reports = evaluate_models(&prepared.features, &mut classifiers).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].roc_auc, None);
        assert!(reports[1].roc_auc.is_some());
        assert_eq!(reports[1].confusion_matrix.total(), 3);
    }

    #[test]
    fn test_run_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let train_path = dir.path().join("train.csv");
        let test_path = dir.path().join("test.csv");
        fs::write(&train_path, "protocol,bytes,label\ntcp,10,normal\nudp,900,neptune\ntcp,12,normal\n").unwrap();
        fs::write(&test_path, "protocol,bytes,label\ntcp,11,normal\nicmp,800,smurf\n").unwrap();

        let config = PipelineConfig {
            has_headers: true,
            excluded_columns: Vec::new(),
            report_path: Some(dir.path().join("out").join("report.json")),
            ..PipelineConfig::default()
        }
        .with_paths(&train_path, &test_path);

        let report = run(&config).unwrap();
        assert_eq!(report.normal_value, "normal");
        assert_eq!(report.train_shape, (3, 3));
        assert_eq!(report.test_shape, (2, 3));
        assert!(report.unseen_categories["protocol"].contains("icmp"));
        assert!(report.best_model.is_some());

        let path = config.report_path.as_ref().unwrap();
        report.write_json(path).unwrap();
        let parsed: RunReport = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed.run_id, report.run_id);
        assert_eq!(parsed.catalog.hash, report.catalog.hash);
    }
}
