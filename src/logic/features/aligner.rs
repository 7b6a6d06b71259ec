//! Feature Aligner
//!
//! Turns a (train, test) pair of labeled tables into numeric matrices that
//! share one column layout:
//!
//! 1. Select feature columns (label always out, caller exclusions validated)
//! 2. Classify + expand on train → `ColumnCatalog`
//! 3. Encode both tables onto the catalog (unseen test categories → all zeros)
//! 4. Zero-fill cells that are missing or not numeric (`CoercionWarning`)
//! 5. Standardize with statistics fitted on train only

use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::constants::TARGET_COLUMN;
use crate::logic::error::{PrepError, PrepResult};
use crate::logic::labels::{BinaryTarget, LabeledTable};
use crate::logic::table::Table;
use super::catalog::{ColumnCatalog, ColumnSource};
use super::scaler::ScalingParams;

/// Zero-filled cells kept individually; the rest are only counted
pub const COERCION_SAMPLE_LIMIT: usize = 20;

// ============================================================================
// DIAGNOSTICS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatrixSide {
    Train,
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoercionReason {
    Missing,
    Unparsable,
}

/// A cell that was zero-filled. Non-fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoercionWarning {
    pub side: MatrixSide,
    pub row: usize,
    pub column: String,
    pub raw: Option<String>,
    pub reason: CoercionReason,
}

/// Zero-filled cell counts per matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionCounts {
    pub train: usize,
    pub test: usize,
}

impl CoercionCounts {
    pub fn get(&self, side: MatrixSide) -> usize {
        match side {
            MatrixSide::Train => self.train,
            MatrixSide::Test => self.test,
        }
    }

    pub fn total(&self) -> usize {
        self.train + self.test
    }

    fn record(&mut self, side: MatrixSide) {
        match side {
            MatrixSide::Train => self.train += 1,
            MatrixSide::Test => self.test += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentDiagnostics {
    /// Zero-filled cells per source column
    pub coercions: BTreeMap<String, CoercionCounts>,
    /// First `COERCION_SAMPLE_LIMIT` zero-filled cells, in encounter order
    pub coercion_samples: Vec<CoercionWarning>,
    /// Test-only category values per source column (dropped from the output)
    pub unseen_categories: BTreeMap<String, BTreeSet<String>>,
}

impl AlignmentDiagnostics {
    pub fn coercion_count(&self, side: MatrixSide) -> usize {
        self.coercions.values().map(|c| c.get(side)).sum()
    }

    pub fn coercion_totals(&self) -> CoercionCounts {
        CoercionCounts {
            train: self.coercion_count(MatrixSide::Train),
            test: self.coercion_count(MatrixSide::Test),
        }
    }

    pub fn unseen_count(&self) -> usize {
        self.unseen_categories.values().map(BTreeSet::len).sum()
    }

    fn record_coercion(&mut self, warning: CoercionWarning) {
        self.coercions
            .entry(warning.column.clone())
            .or_default()
            .record(warning.side);

        if self.coercion_samples.len() < COERCION_SAMPLE_LIMIT {
            log::debug!(
                "Zero-filled {:?} row {} column '{}' ({:?})",
                warning.side,
                warning.row,
                warning.column,
                warning.raw
            );
            self.coercion_samples.push(warning);
        }
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Steps 1-4: aligned, zero-filled, not yet scaled
#[derive(Debug, Clone)]
pub struct EncodedFeatures {
    pub catalog: ColumnCatalog,
    pub train: Array2<f64>,
    pub test: Array2<f64>,
    pub train_target: Vec<BinaryTarget>,
    pub test_target: Vec<BinaryTarget>,
    pub diagnostics: AlignmentDiagnostics,
}

/// Final classifier-ready matrices plus the statistics used to scale them
#[derive(Debug, Clone)]
pub struct AlignedFeatures {
    pub catalog: ColumnCatalog,
    pub train: Array2<f64>,
    pub test: Array2<f64>,
    pub train_target: Vec<BinaryTarget>,
    pub test_target: Vec<BinaryTarget>,
    pub scaling: ScalingParams,
    pub diagnostics: AlignmentDiagnostics,
}

impl EncodedFeatures {
    /// Step 5: fit on train, apply the same statistics to test
    pub fn standardize(self) -> PrepResult<AlignedFeatures> {
        let EncodedFeatures {
            catalog,
            mut train,
            mut test,
            train_target,
            test_target,
            diagnostics,
        } = self;

        let scaling = ScalingParams::fit(&train);
        scaling.transform(&mut train)?;
        scaling.transform(&mut test)?;

        Ok(AlignedFeatures {
            catalog,
            train,
            test,
            train_target,
            test_target,
            scaling,
            diagnostics,
        })
    }
}

// ============================================================================
// ALIGNMENT
// ============================================================================

/// Full alignment pass: encode then standardize
pub fn align(train: &LabeledTable, test: &LabeledTable, excluded_columns: &[&str]) -> PrepResult<AlignedFeatures> {
    let aligned = encode(train, test, excluded_columns)?.standardize()?;

    log::info!(
        "Final shapes - Train: {:?}, Test: {:?}",
        aligned.train.dim(),
        aligned.test.dim()
    );

    Ok(aligned)
}

/// Steps 1-4 without scaling
pub fn encode(train: &LabeledTable, test: &LabeledTable, excluded_columns: &[&str]) -> PrepResult<EncodedFeatures> {
    let features = select_features(train, test, excluded_columns)?;
    log::info!("Using {} feature columns", features.len());

    let catalog = ColumnCatalog::build(train.table(), &features)?;
    log::info!(
        "Column catalog: {} columns ({} indicators), layout hash {:08x}",
        catalog.len(),
        catalog.indicator_count(),
        catalog.layout_hash()
    );

    let mut diagnostics = AlignmentDiagnostics::default();
    let train_matrix = encode_table(train.table(), &catalog, MatrixSide::Train, &mut diagnostics);
    let test_matrix = encode_table(test.table(), &catalog, MatrixSide::Test, &mut diagnostics);

    report_diagnostics(&diagnostics);

    Ok(EncodedFeatures {
        catalog,
        train: train_matrix,
        test: test_matrix,
        train_target: train.targets().to_vec(),
        test_target: test.targets().to_vec(),
        diagnostics,
    })
}

/// Source column indices that become features.
///
/// The label column is always removed. Exclusions must name real columns
/// (the reserved target name excepted) and a raw column carrying the target
/// name must be excluded explicitly.
pub fn select_features(train: &LabeledTable, test: &LabeledTable, excluded_columns: &[&str]) -> PrepResult<Vec<usize>> {
    if train.label_column() != test.label_column() {
        return Err(PrepError::schema(format!(
            "label column differs: train '{}', test '{}'",
            train.label_column(),
            test.label_column()
        )));
    }

    let schema = train.table().schema();
    check_same_schema(schema, test.table().schema())?;

    for &name in excluded_columns {
        if name != TARGET_COLUMN && !schema.iter().any(|c| c == name) {
            return Err(PrepError::schema(format!("excluded column '{}' not in schema", name)));
        }
    }

    if schema.iter().any(|c| c == TARGET_COLUMN) && !excluded_columns.contains(&TARGET_COLUMN) {
        return Err(PrepError::schema(format!(
            "raw column '{}' would leak the target into features",
            TARGET_COLUMN
        )));
    }

    let features: Vec<usize> = schema
        .iter()
        .enumerate()
        .filter(|(i, name)| *i != train.label_index() && !excluded_columns.contains(&name.as_str()))
        .map(|(i, _)| i)
        .collect();

    if features.is_empty() {
        return Err(PrepError::schema("no feature columns remain after exclusions"));
    }

    Ok(features)
}

fn check_same_schema(train: &[String], test: &[String]) -> PrepResult<()> {
    if train.len() != test.len() {
        return Err(PrepError::schema(format!(
            "train has {} columns, test has {}",
            train.len(),
            test.len()
        )));
    }

    if let Some((i, (a, b))) = train.iter().zip(test).enumerate().find(|(_, (a, b))| a != b) {
        return Err(PrepError::schema(format!(
            "column {} is '{}' in train but '{}' in test",
            i, a, b
        )));
    }

    Ok(())
}

fn encode_table(
    table: &Table,
    catalog: &ColumnCatalog,
    side: MatrixSide,
    diagnostics: &mut AlignmentDiagnostics,
) -> Array2<f64> {
    let mut matrix = Array2::<f64>::zeros((table.len(), catalog.len()));

    let numeric: Vec<(usize, usize, &str)> = catalog
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(position, column)| match column.source {
            ColumnSource::Numeric { source } => Some((position, source, column.source_name.as_str())),
            ColumnSource::Indicator { .. } => None,
        })
        .collect();
    let indicators = catalog.indicator_index();

    for (r, row) in table.rows().iter().enumerate() {
        for &(position, source, name) in &numeric {
            let cell = &row.cells()[source];
            matrix[[r, position]] = match cell.as_number() {
                Some(v) => v,
                None => {
                    let reason = if cell.is_missing() {
                        CoercionReason::Missing
                    } else {
                        CoercionReason::Unparsable
                    };
                    let raw = (!cell.is_missing()).then(|| cell.canonical());
                    diagnostics.record_coercion(CoercionWarning {
                        side,
                        row: r,
                        column: name.to_string(),
                        raw,
                        reason,
                    });
                    0.0
                }
            };
        }

        for (&source, values) in &indicators {
            let cell = &row.cells()[source];
            if cell.is_missing() {
                continue;
            }

            let token = cell.canonical();
            match values.get(token.as_str()) {
                Some(&position) => matrix[[r, position]] = 1.0,
                None => {
                    diagnostics
                        .unseen_categories
                        .entry(table.schema()[source].clone())
                        .or_default()
                        .insert(token);
                }
            }
        }
    }

    matrix
}

fn report_diagnostics(diagnostics: &AlignmentDiagnostics) {
    for (column, counts) in &diagnostics.coercions {
        log::warn!(
            "Zero-filled {} train / {} test cells of '{}' that were missing or non-numeric",
            counts.train,
            counts.test,
            column
        );
    }

    for (column, values) in &diagnostics.unseen_categories {
        log::warn!("Dropped {} test-only categories of '{}': {:?}", values.len(), column, values);
    }
}
