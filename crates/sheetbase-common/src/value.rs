//! Raw cell values and the loose comparison rule used by predicate search.

use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row-major rectangle of raw cell values. Rows may be shorter than the
/// widest row; missing trailing cells stand for empty cells.
pub type Grid = Vec<Vec<CellValue>>;

/// A single raw cell value as the remote API hands it over.
///
/// This deliberately stays a scalar subset of what a spreadsheet can hold:
/// nothing here evaluates formulas or tracks formats, so dates arrive as
/// either display text or serial numbers depending on the caller's render
/// options.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Number(f64),
    Bool(bool),
    Text(String),
    Empty,
}

impl CellValue {
    /// True for the values a header scan treats as "no header here": the
    /// empty cell and empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Numeric interpretation used by [`loose_eq`]. Booleans count as 1/0,
    /// text parses if the trimmed string is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            CellValue::Empty => None,
        }
    }

    /// Write-path normalization: the remote format has no null
    /// representation, so the empty value becomes empty text.
    pub fn sanitized(self) -> CellValue {
        match self {
            CellValue::Empty => CellValue::Text(String::new()),
            other => other,
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// The spreadsheet's "everything is a cell value" equality: if both sides
/// interpret as numbers, compare numerically; otherwise compare the rendered
/// text. This is an explicit rule, not language coercion, so `"1"` matches
/// `1` and `1.0`, and the empty value matches empty text.
pub fn loose_eq(a: &CellValue, b: &CellValue) -> bool {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x == y,
        _ => a.to_string() == b.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_matches_number() {
        assert!(loose_eq(&CellValue::from("1"), &CellValue::Int(1)));
        assert!(loose_eq(&CellValue::from("1"), &CellValue::Number(1.0)));
        assert!(loose_eq(&CellValue::from(" 2.5 "), &CellValue::Number(2.5)));
        assert!(!loose_eq(&CellValue::from("1"), &CellValue::Int(2)));
    }

    #[test]
    fn text_falls_back_to_string_compare() {
        assert!(loose_eq(&CellValue::from("Julie"), &CellValue::from("Julie")));
        assert!(!loose_eq(&CellValue::from("Julie"), &CellValue::from("julie")));
    }

    #[test]
    fn empty_matches_empty_text() {
        assert!(loose_eq(&CellValue::Empty, &CellValue::from("")));
        assert!(!loose_eq(&CellValue::Empty, &CellValue::Int(0)));
    }

    #[test]
    fn bools_compare_as_numbers() {
        assert!(loose_eq(&CellValue::Bool(true), &CellValue::Int(1)));
        assert!(loose_eq(&CellValue::Bool(false), &CellValue::from("0")));
        assert!(loose_eq(&CellValue::Bool(true), &CellValue::from("true")));
    }

    #[test]
    fn sanitized_replaces_empty() {
        assert_eq!(CellValue::Empty.sanitized(), CellValue::Text(String::new()));
        assert_eq!(CellValue::Int(3).sanitized(), CellValue::Int(3));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_bare_scalars() {
        let row = vec![
            CellValue::Int(1),
            CellValue::from("Julie"),
            CellValue::Bool(true),
            CellValue::Empty,
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[1,"Julie",true,null]"#);
        let back: Vec<CellValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
