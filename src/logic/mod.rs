//! Logic Module - Data preparation engines
//!
//! ## Architecture
//! - `table/` - Immutable input tables + NSL-KDD loader
//! - `labels/` - Binary label normalization with ranked fallback
//! - `features/` - Column catalog, train/test alignment, scaling
//! - `model/` - Classifier seam + reference baselines
//! - `evaluation/` - Binary metrics
//! - `pipeline.rs` - End-to-end sequencing

pub mod error;
pub mod config;

// Data preparation core
pub mod table;
pub mod labels;
pub mod features;

// Collaborators
pub mod model;
pub mod evaluation;

pub mod pipeline;
