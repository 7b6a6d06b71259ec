//! Label Normalizer
//!
//! Collapses the raw multi-class label into Normal (0) / Attack (1).
//! Comparison always happens on canonical tokens, never on raw types.

use crate::constants::LABEL_SUMMARY_TOP;
use crate::logic::error::{PrepError, PrepResult};
use crate::logic::table::Table;
use super::frequency::rank_labels;
use super::types::{BinaryTarget, LabelCode, LabelSummary, LabeledTable};

/// Derive the target column without taking ownership of the table.
///
/// Fails with `DegenerateLabel` when no row matches `normal_value`.
/// A missing label cell never counts as normal.
pub fn derive_targets(
    table: &Table,
    label_column: &str,
    normal_value: &LabelCode,
) -> PrepResult<Vec<BinaryTarget>> {
    let index = table.require_column(label_column)?;
    let normal = normal_value.canonical();

    let targets: Vec<BinaryTarget> = table
        .column(index)
        .map(|cell| BinaryTarget::from_attack(cell.is_missing() || cell.canonical() != normal))
        .collect();

    if targets.iter().all(|t| t.is_attack()) {
        return Err(PrepError::DegenerateLabel {
            normal_value: normal,
            rows: targets.len(),
        });
    }

    if targets.iter().all(|t| !t.is_attack()) {
        log::warn!("Every row matched normal value '{}' - target has no attacks", normal);
    }

    Ok(targets)
}

/// Augment `table` with a BinaryTarget column
pub fn normalize(table: Table, label_column: &str, normal_value: &LabelCode) -> PrepResult<LabeledTable> {
    let targets = derive_targets(&table, label_column, normal_value)?;
    Ok(wrap(table, label_column, normal_value, targets))
}

/// Try each candidate in order until one yields a two-class target
pub fn normalize_with_fallback(
    table: Table,
    label_column: &str,
    candidates: &[LabelCode],
) -> PrepResult<LabeledTable> {
    let mut tried = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match derive_targets(&table, label_column, candidate) {
            Ok(targets) => {
                if !tried.is_empty() {
                    log::info!("Normal value '{}' accepted after {} rejected", candidate, tried.len());
                }
                return Ok(wrap(table, label_column, candidate, targets));
            }
            Err(e) if e.is_retryable() => {
                log::warn!("Rejected normal candidate: {}", e);
                tried.push(candidate.canonical());
            }
            Err(e) => return Err(e),
        }
    }

    Err(PrepError::NoNormalCandidate { tried })
}

fn wrap(table: Table, label_column: &str, normal_value: &LabelCode, targets: Vec<BinaryTarget>) -> LabeledTable {
    // derive_targets already resolved the column
    let label_index = table.column_index(label_column).unwrap_or_default();
    let labeled = LabeledTable::new(table, label_column, label_index, normal_value.canonical(), targets);

    log::info!(
        "Binary labels using '{}' as normal: {} normal, {} attack",
        labeled.normal_value(),
        labeled.normal_count(),
        labeled.attack_count()
    );

    labeled
}

/// Distribution summary for logs and reports
pub fn summarize(labeled: &LabeledTable) -> PrepResult<LabelSummary> {
    let mut top_labels = rank_labels(labeled.table(), labeled.label_column())?;
    top_labels.truncate(LABEL_SUMMARY_TOP);

    let attack_count = labeled.attack_count();
    let attack_ratio = if labeled.is_empty() {
        0.0
    } else {
        attack_count as f64 / labeled.len() as f64
    };

    Ok(LabelSummary {
        normal_value: labeled.normal_value().to_string(),
        normal_count: labeled.normal_count(),
        attack_count,
        attack_ratio,
        top_labels,
    })
}
