//! BlackWall Core - NSL-KDD label normalization & feature alignment
//!
//! Prepares tabular intrusion-detection data for binary (normal vs attack)
//! classification: raw labels become a BinaryTarget, categorical columns are
//! one-hot expanded on train and aligned onto test, and both matrices are
//! standardized with train statistics.

pub mod constants;
pub mod logic;

pub use logic::error::{PrepError, PrepResult};
pub use logic::features::{align, AlignedFeatures, ColumnCatalog};
pub use logic::labels::{normalize, normalize_with_fallback, BinaryTarget, LabelCode, LabeledTable};
pub use logic::table::{Cell, Row, Table};
