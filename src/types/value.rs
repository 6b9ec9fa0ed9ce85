use std::fmt;

use serde::{Deserialize, Serialize};

/// The typed value held by a cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// What the data store holds for one cell: its value plus optional formula text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellContent {
    pub value: CellValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl CellContent {
    /// Empty value, no formula.
    pub const BLANK: Self = Self {
        value: CellValue::Empty,
        formula: None,
    };

    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            formula: None,
        }
    }

    pub fn with_formula(value: impl Into<CellValue>, formula: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            formula: Some(formula.into()),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.is_empty() && self.formula.is_none()
    }

    /// Text shown in the grid.
    pub fn display(&self) -> String {
        self.value.to_string()
    }

    /// Text an edit session starts from: the formula if present, else the display value.
    pub fn raw_text(&self) -> String {
        match &self.formula {
            Some(formula) => formula.clone(),
            None => self.display(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_display_values() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(42.5).to_string(), "42.5");
        assert_eq!(CellValue::Boolean(true).to_string(), "TRUE");
        assert_eq!(CellValue::from("hi").to_string(), "hi");
    }

    #[test]
    fn test_raw_text_prefers_formula() {
        let content = CellContent::with_formula(3.0, "=1+2");
        assert_eq!(content.display(), "3");
        assert_eq!(content.raw_text(), "=1+2");
        assert_eq!(CellContent::new("x").raw_text(), "x");
    }
}
