//! Label Frequency Analysis
//!
//! Ranks raw labels by frequency and turns the ranking into an auditable
//! chain of normal-value candidates.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::logic::error::PrepResult;
use crate::logic::table::Table;
use super::types::LabelCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFrequency {
    pub label: String,
    pub count: usize,
}

/// Count canonical labels; most frequent first, ties by label.
/// Blank label cells are not a label and are left out.
pub fn rank_labels(table: &Table, label_column: &str) -> PrepResult<Vec<LabelFrequency>> {
    let index = table.require_column(label_column)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for cell in table.column(index).filter(|cell| !cell.is_missing()) {
        *counts.entry(cell.canonical()).or_insert(0) += 1;
    }

    let mut ranking: Vec<LabelFrequency> = counts
        .into_iter()
        .map(|(label, count)| LabelFrequency { label, count })
        .collect();
    ranking.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

    Ok(ranking)
}

/// Configured values first, then the `depth` most frequent labels.
/// Duplicates (by canonical form) keep their first position; blank
/// tokens are never candidates.
pub fn candidate_chain(
    configured: &[LabelCode],
    ranking: &[LabelFrequency],
    depth: usize,
) -> Vec<LabelCode> {
    let ranked = ranking
        .iter()
        .take(depth)
        .map(|f| LabelCode::Name(f.label.clone()));

    let mut seen = HashSet::new();
    configured
        .iter()
        .cloned()
        .chain(ranked)
        .filter(|code| {
            let token = code.canonical();
            !token.is_empty() && seen.insert(token)
        })
        .collect()
}
