//! Column Catalog - Ordered feature layout derived from the training table
//!
//! **The catalog is computed from train only.** Test tables are encoded onto
//! it, never the other way round.
//!
//! ## Ordering rules
//! 1. Source columns keep schema order
//! 2. A numeric column contributes one column under its own name
//! 3. A categorical column contributes `<column>_<value>` indicators, values
//!    sorted by canonical token (byte order)
//! 4. Every generated name is unique; a collision is a schema mismatch

use std::collections::{BTreeSet, HashMap, HashSet};

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::logic::error::{PrepError, PrepResult};
use crate::logic::table::Table;

// ============================================================================
// COLUMN CLASSIFICATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Numeric iff every non-missing cell parses as a finite number
pub fn classify_column(table: &Table, index: usize) -> ColumnKind {
    let numeric = table
        .column(index)
        .filter(|cell| !cell.is_missing())
        .all(|cell| cell.as_number().is_some());

    if numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Where a catalog column takes its value from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSource {
    Numeric { source: usize },
    Indicator { source: usize, value: String },
}

impl ColumnSource {
    pub fn source_index(&self) -> usize {
        match self {
            ColumnSource::Numeric { source } | ColumnSource::Indicator { source, .. } => *source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogColumn {
    pub name: String,
    pub source_name: String,
    pub source: ColumnSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCatalog {
    columns: Vec<CatalogColumn>,
}

impl ColumnCatalog {
    /// Classify and expand the selected `features` of the training table
    pub fn build(train: &Table, features: &[usize]) -> PrepResult<Self> {
        let mut columns = Vec::new();
        let mut numeric = 0usize;
        let mut categorical = Vec::new();

        for &index in features {
            let source_name = train.schema()[index].clone();

            match classify_column(train, index) {
                ColumnKind::Numeric => {
                    numeric += 1;
                    columns.push(CatalogColumn {
                        name: source_name.clone(),
                        source_name,
                        source: ColumnSource::Numeric { source: index },
                    });
                }
                ColumnKind::Categorical => {
                    let values: BTreeSet<String> = train
                        .column(index)
                        .filter(|cell| !cell.is_missing())
                        .map(|cell| cell.canonical())
                        .collect();

                    for value in values {
                        columns.push(CatalogColumn {
                            name: format!("{}_{}", source_name, value),
                            source_name: source_name.clone(),
                            source: ColumnSource::Indicator { source: index, value },
                        });
                    }
                    categorical.push(source_name);
                }
            }
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(PrepError::schema(format!(
                    "feature name '{}' from column '{}' collides with another feature",
                    column.name, column.source_name
                )));
            }
        }

        log::info!("Numeric columns: {}", numeric);
        log::info!("Categorical columns: {:?}", categorical);

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[CatalogColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Index of a column by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn indicator_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| matches!(c.source, ColumnSource::Indicator { .. }))
            .count()
    }

    pub fn numeric_count(&self) -> usize {
        self.len() - self.indicator_count()
    }

    /// CRC32 of the ordered column names
    pub fn layout_hash(&self) -> u32 {
        let mut hasher = Hasher::new();
        for column in &self.columns {
            hasher.update(column.name.as_bytes());
            hasher.update(&[0]); // Separator
        }
        hasher.finalize()
    }

    /// Indicator lookup per categorical source column: canonical value → column
    pub(crate) fn indicator_index(&self) -> HashMap<usize, HashMap<&str, usize>> {
        let mut index: HashMap<usize, HashMap<&str, usize>> = HashMap::new();
        for (position, column) in self.columns.iter().enumerate() {
            if let ColumnSource::Indicator { source, value } = &column.source {
                index.entry(*source).or_default().insert(value.as_str(), position);
            }
        }
        index
    }

    pub fn info(&self) -> CatalogInfo {
        CatalogInfo {
            hash: self.layout_hash(),
            column_count: self.len(),
            numeric_columns: self.numeric_count(),
            indicator_columns: self.indicator_count(),
            column_names: self.columns.iter().map(|c| c.name.clone()).collect(),
        }
    }
}

// ============================================================================
// CATALOG INFO
// ============================================================================

/// Layout summary for logging/serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub hash: u32,
    pub column_count: usize,
    pub numeric_columns: usize,
    pub indicator_columns: usize,
    pub column_names: Vec<String>,
}
