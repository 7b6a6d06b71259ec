use std::fmt;

use serde::{Deserialize, Serialize};

use crate::logic::table::cell::canonical_text;
use crate::logic::table::Table;
use super::frequency::LabelFrequency;

// ============================================================================
// LABEL CODE
// ============================================================================

/// Raw label token. The domain is open: attack names, numeric codes, or
/// anything else a dataset variant ships with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelCode {
    Code(i64),
    Name(String),
}

impl LabelCode {
    /// Canonical token, comparable with `Cell::canonical()`
    pub fn canonical(&self) -> String {
        match self {
            LabelCode::Code(c) => c.to_string(),
            LabelCode::Name(s) => canonical_text(s),
        }
    }
}

impl fmt::Display for LabelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl From<i64> for LabelCode {
    fn from(code: i64) -> Self {
        LabelCode::Code(code)
    }
}

impl From<&str> for LabelCode {
    fn from(name: &str) -> Self {
        LabelCode::Name(name.to_string())
    }
}

impl From<String> for LabelCode {
    fn from(name: String) -> Self {
        LabelCode::Name(name)
    }
}

// ============================================================================
// BINARY TARGET
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BinaryTarget {
    Normal = 0,
    Attack = 1,
}

impl BinaryTarget {
    pub fn from_attack(is_attack: bool) -> Self {
        if is_attack {
            BinaryTarget::Attack
        } else {
            BinaryTarget::Normal
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_f64(self) -> f64 {
        self.as_u8() as f64
    }

    pub fn is_attack(self) -> bool {
        self == BinaryTarget::Attack
    }
}

// ============================================================================
// LABELED TABLE
// ============================================================================

/// A table augmented with its BinaryTarget column.
///
/// The target lives beside the raw cells, never among them, so feature
/// selection cannot pick it up.
#[derive(Debug, Clone)]
pub struct LabeledTable {
    table: Table,
    label_column: String,
    label_index: usize,
    normal_value: String,
    targets: Vec<BinaryTarget>,
}

impl LabeledTable {
    pub(super) fn new(
        table: Table,
        label_column: &str,
        label_index: usize,
        normal_value: String,
        targets: Vec<BinaryTarget>,
    ) -> Self {
        Self {
            table,
            label_column: label_column.to_string(),
            label_index,
            normal_value,
            targets,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    pub fn label_index(&self) -> usize {
        self.label_index
    }

    /// Canonical normal value the targets were derived with
    pub fn normal_value(&self) -> &str {
        &self.normal_value
    }

    pub fn targets(&self) -> &[BinaryTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn attack_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_attack()).count()
    }

    pub fn normal_count(&self) -> usize {
        self.len() - self.attack_count()
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSummary {
    pub normal_value: String,
    pub normal_count: usize,
    pub attack_count: usize,
    pub attack_ratio: f64,
    pub top_labels: Vec<LabelFrequency>,
}
