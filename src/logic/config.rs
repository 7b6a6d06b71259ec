//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_FALLBACK_DEPTH, DEFAULT_NORMAL_LABEL, DEFAULT_TEST_PATH, DEFAULT_TRAIN_PATH,
    DIFFICULTY_COLUMN, LABEL_COLUMN,
};
use crate::logic::labels::LabelCode;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Training table (delimited text)
    pub train_path: PathBuf,

    /// Test table (delimited text)
    pub test_path: PathBuf,

    /// Raw label column
    pub label_column: String,

    /// Normal-value candidates tried before the frequency fallback
    pub normal_labels: Vec<LabelCode>,

    /// Most-frequent labels appended to the candidate chain
    pub fallback_depth: usize,

    /// Columns kept out of the feature matrices (label is always out)
    pub excluded_columns: Vec<String>,

    /// Whether input files start with a header row
    pub has_headers: bool,

    /// Write the JSON report here instead of stdout
    pub report_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_path: PathBuf::from(DEFAULT_TRAIN_PATH),
            test_path: PathBuf::from(DEFAULT_TEST_PATH),
            label_column: LABEL_COLUMN.to_string(),
            normal_labels: vec![LabelCode::from(DEFAULT_NORMAL_LABEL)],
            fallback_depth: DEFAULT_FALLBACK_DEPTH,
            excluded_columns: vec![DIFFICULTY_COLUMN.to_string()],
            has_headers: false,
            report_path: None,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            train_path: lookup("BLACKWALL_TRAIN_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.train_path),

            test_path: lookup("BLACKWALL_TEST_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.test_path),

            label_column: lookup("BLACKWALL_LABEL_COLUMN")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.label_column),

            normal_labels: lookup("BLACKWALL_NORMAL_LABELS")
                .map(|s| parse_list(&s).into_iter().map(parse_label).collect::<Vec<_>>())
                .filter(|labels| !labels.is_empty())
                .unwrap_or(defaults.normal_labels),

            fallback_depth: lookup("BLACKWALL_FALLBACK_DEPTH")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.fallback_depth),

            excluded_columns: lookup("BLACKWALL_EXCLUDED_COLUMNS")
                .map(|s| parse_list(&s))
                .unwrap_or(defaults.excluded_columns),

            has_headers: lookup("BLACKWALL_HAS_HEADERS")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.has_headers),

            report_path: lookup("BLACKWALL_REPORT_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Override input paths (positional CLI arguments)
    pub fn with_paths(mut self, train: impl Into<PathBuf>, test: impl Into<PathBuf>) -> Self {
        self.train_path = train.into();
        self.test_path = test.into();
        self
    }

    pub fn excluded(&self) -> Vec<&str> {
        self.excluded_columns.iter().map(String::as_str).collect()
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_label(raw: String) -> LabelCode {
    match raw.parse::<i64>() {
        Ok(code) => LabelCode::Code(code),
        Err(_) => LabelCode::Name(raw),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::from_lookup(|_| None);
        assert_eq!(config.train_path, PathBuf::from(DEFAULT_TRAIN_PATH));
        assert_eq!(config.label_column, "label");
        assert_eq!(config.normal_labels, vec![LabelCode::from("normal")]);
        assert_eq!(config.fallback_depth, DEFAULT_FALLBACK_DEPTH);
        assert_eq!(config.excluded(), vec!["difficulty"]);
        assert!(!config.has_headers);
        assert!(config.report_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = PipelineConfig::from_lookup(lookup_from(&[
            ("BLACKWALL_NORMAL_LABELS", "normal, 21 ,"),
            ("BLACKWALL_FALLBACK_DEPTH", "5"),
            ("BLACKWALL_EXCLUDED_COLUMNS", ""),
            ("BLACKWALL_HAS_HEADERS", "Yes"),
            ("BLACKWALL_REPORT_PATH", "out/report.json"),
        ]));

        assert_eq!(
            config.normal_labels,
            vec![LabelCode::from("normal"), LabelCode::Code(21)]
        );
        assert_eq!(config.fallback_depth, 5);
        assert!(config.excluded_columns.is_empty());
        assert!(config.has_headers);
        assert_eq!(config.report_path, Some(PathBuf::from("out/report.json")));
    }

    #[test]
    fn test_unparsable_values_keep_defaults() {
        let config = PipelineConfig::from_lookup(lookup_from(&[
            ("BLACKWALL_FALLBACK_DEPTH", "many"),
            ("BLACKWALL_HAS_HEADERS", "maybe"),
            ("BLACKWALL_NORMAL_LABELS", " , "),
        ]));

        assert_eq!(config.fallback_depth, DEFAULT_FALLBACK_DEPTH);
        assert!(!config.has_headers);
        assert_eq!(config.normal_labels, vec![LabelCode::from("normal")]);
    }

    #[test]
    fn test_with_paths() {
        let config = PipelineConfig::default().with_paths("a.txt", "b.txt");
        assert_eq!(config.train_path, PathBuf::from("a.txt"));
        assert_eq!(config.test_path, PathBuf::from("b.txt"));
    }
}
