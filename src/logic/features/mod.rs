//! Features Module - Train/test feature alignment
//!
//! Produces classifier-ready matrices whose column `i` means the same thing in
//! train and test. A model fitted on one layout and fed another predicts
//! garbage silently, so the layout is owned here and nowhere else.
//!
//! # Architecture
//! - `catalog.rs`: column classification, one-hot expansion, layout hash
//! - `aligner.rs`: schema checks, encoding, zero-fill diagnostics
//! - `scaler.rs`: train-fitted standardization

pub mod catalog;
pub mod aligner;
pub mod scaler;


pub use catalog::{classify_column, CatalogInfo, ColumnCatalog, ColumnKind, ColumnSource};
pub use aligner::{
    align, encode, select_features, AlignedFeatures, AlignmentDiagnostics, CoercionCounts,
    CoercionReason, CoercionWarning, EncodedFeatures, MatrixSide, COERCION_SAMPLE_LIMIT,
};
pub use scaler::ScalingParams;
