//! Labels Module - Binary label normalization (normal vs attack)
//!
//! Which raw value means "normal" is always supplied by the caller, either
//! directly or as a ranked candidate chain built from label frequencies.
//! Numeric label codes are treated as opaque tokens; no code-to-attack-name
//! mapping is assumed.

pub mod types;
pub mod frequency;
pub mod normalizer;


pub use types::{BinaryTarget, LabelCode, LabelSummary, LabeledTable};
pub use frequency::{candidate_chain, rank_labels, LabelFrequency};
pub use normalizer::{derive_targets, normalize, normalize_with_fallback, summarize};
