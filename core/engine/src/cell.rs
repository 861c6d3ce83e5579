//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the value held by a single staged cell.
//! CONTEXT: Source cells arrive as numbers, text or blanks intermixed. The
//! `CellValue` enum keeps that tagging explicit and owns the numeric coercion
//! rules used by the aggregate row.

use serde::{Deserialize, Serialize};

/// The raw data within a staged cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn number(n: f64) -> Self {
        CellValue::Number(n)
    }

    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Interprets the cell as a number for summation.
    ///
    /// Blank cells and whitespace-only text are never numeric. Text is parsed
    /// with plain decimal parsing (surrounding whitespace ignored); non-finite
    /// results such as `NaN` or `inf` are rejected.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => n.is_finite().then_some(*n),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
    }

    /// Returns the display value of the cell as a String.
    /// Numbers are rendered with at most six decimals and no trailing zeros.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_plain_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }
}

/// Formats a number in fixed notation, then strips trailing zeros and a
/// dangling decimal point.
pub fn format_plain_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let fixed = format!("{:.6}", n);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
