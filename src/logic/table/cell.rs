//! Cell - A single raw value read from the input table
//!
//! Cells are either numeric, free text (protocol names, attack names) or
//! missing. Comparison of categorical and label values always goes through
//! `canonical()` so that `21`, `21.0` and `"21"` are the same token.

use serde::{Deserialize, Serialize};

/// Integers beyond this magnitude lose digits as `f64`
const EXACT_INTEGER_LIMIT: u64 = 1 << 53;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Parse a raw field: blank → Missing, finite number → Number, else Text.
    /// Integers too large for an exact `f64` stay Text so their digits survive.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Missing;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            if i.unsigned_abs() > EXACT_INTEGER_LIMIT {
                return Cell::Text(trimmed.to_string());
            }
        }
        match parse_finite(trimmed) {
            Some(v) => Cell::Number(v),
            None => Cell::Text(trimmed.to_string()),
        }
    }

    /// Numeric view of the cell, `None` if it does not parse as a finite number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if v.is_finite() => Some(*v),
            Cell::Number(_) => None,
            Cell::Text(s) => parse_finite(s.trim()),
            Cell::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Canonical string token used for label and category comparison
    pub fn canonical(&self) -> String {
        match self {
            Cell::Number(v) => canonical_number(*v),
            Cell::Text(s) => canonical_text(s),
            Cell::Missing => String::new(),
        }
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integral values render without a fractional part
pub fn canonical_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Trimmed text; numeric-looking text takes the numeric canonical form.
/// Integral text goes through `i64` first so large codes render exactly.
pub fn canonical_text(s: &str) -> String {
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return i.to_string();
    }
    match parse_finite(trimmed) {
        Some(v) => canonical_number(v),
        None => trimmed.to_string(),
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        if v.unsigned_abs() > EXACT_INTEGER_LIMIT {
            Cell::Text(v.to_string())
        } else {
            Cell::Number(v as f64)
        }
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        Cell::parse(raw)
    }
}

impl From<String> for Cell {
    fn from(raw: String) -> Self {
        Cell::parse(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!(Cell::parse("tcp"), Cell::Text("tcp".to_string()));
        assert_eq!(Cell::parse(" 491 "), Cell::Number(491.0));
        assert_eq!(Cell::parse(""), Cell::Missing);
        assert_eq!(Cell::parse("   "), Cell::Missing);
    }

    #[test]
    fn test_non_finite_is_text() {
        assert_eq!(Cell::parse("NaN"), Cell::Text("NaN".to_string()));
        assert_eq!(Cell::parse("inf"), Cell::Text("inf".to_string()));
        assert_eq!(Cell::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_canonical_numeric_forms_agree() {
        assert_eq!(Cell::Number(21.0).canonical(), "21");
        assert_eq!(Cell::Text("21".to_string()).canonical(), "21");
        assert_eq!(Cell::Text(" 21.0 ".to_string()).canonical(), "21");
        assert_eq!(Cell::Number(0.5).canonical(), "0.5");
        assert_eq!(Cell::Missing.canonical(), "");
    }

    #[test]
    fn test_large_integers_keep_their_digits() {
        let big = 9_007_199_254_740_993i64;
        assert_eq!(Cell::parse("9007199254740993"), Cell::Text("9007199254740993".to_string()));
        assert_eq!(Cell::parse(" 9007199254740993 ").canonical(), big.to_string());
        assert_eq!(Cell::from(big).canonical(), big.to_string());
        assert_eq!(canonical_text("+021"), "21");
        assert_eq!(Cell::parse("9007199254740992"), Cell::Number(9_007_199_254_740_992.0));
    }

    #[test]
    fn test_as_number_on_text() {
        assert_eq!(Cell::Text("3.5".to_string()).as_number(), Some(3.5));
        assert_eq!(Cell::Text("N/A".to_string()).as_number(), None);
        assert_eq!(Cell::Missing.as_number(), None);
    }
}
