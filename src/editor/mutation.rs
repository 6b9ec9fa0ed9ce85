//! Turning committed draft text into typed cell content.

use serde::Serialize;

use crate::cell_ref::CellId;
use crate::error::Result;
use crate::store::CellStore;
use crate::types::CellValue;

/// A committed edit, handed to the data store and the host's commit hook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellCommit {
    pub cell: CellId,
    pub value: CellValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl CellCommit {
    pub fn from_draft(cell: CellId, draft: &str) -> Self {
        let (value, formula) = classify_draft(draft);
        Self {
            cell,
            value,
            formula,
        }
    }
}

/// Detect what a draft means.
///
/// - Leading `=` → formula text, value left empty for the evaluator
/// - Empty/whitespace → empty cell
/// - "true"/"false" (case-insensitive) → Boolean
/// - Parseable as a finite f64 → Number
/// - Otherwise → Text (untrimmed)
pub fn classify_draft(draft: &str) -> (CellValue, Option<String>) {
    let trimmed = draft.trim();

    if trimmed.starts_with('=') {
        return (CellValue::Empty, Some(trimmed.to_string()));
    }
    if trimmed.is_empty() {
        return (CellValue::Empty, None);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return (CellValue::Boolean(true), None);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return (CellValue::Boolean(false), None);
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return (CellValue::Number(n), None);
        }
    }
    (CellValue::Text(draft.to_string()), None)
}

/// Write a commit through the data store.
pub(crate) fn apply_commit<S: CellStore + ?Sized>(store: &mut S, commit: &CellCommit) -> Result<()> {
    store.set_cell(commit.cell, commit.value.clone(), commit.formula.clone())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::cell_ref::to_id;
    use crate::store::Sheet;
    use crate::types::GridExtent;

    #[test]
    fn test_classify_formula() {
        assert_eq!(
            classify_draft(" =SUM(A1:A3) "),
            (CellValue::Empty, Some("=SUM(A1:A3)".to_string()))
        );
    }

    #[test]
    fn test_classify_scalars() {
        assert_eq!(classify_draft("42.5").0, CellValue::Number(42.5));
        assert_eq!(classify_draft("TRUE").0, CellValue::Boolean(true));
        assert_eq!(classify_draft("False").0, CellValue::Boolean(false));
        assert_eq!(classify_draft("   ").0, CellValue::Empty);
        assert_eq!(classify_draft("inf").0, CellValue::Text("inf".into()));
        assert_eq!(classify_draft(" hello ").0, CellValue::Text(" hello ".into()));
    }

    #[test]
    fn test_apply_commit_writes_store() {
        let mut sheet = Sheet::new("Sheet1", GridExtent::new(2, 2));
        let commit = CellCommit::from_draft(to_id(1, 0), "12");
        apply_commit(&mut sheet, &commit).unwrap();
        assert_eq!(sheet.display(1, 0), "12");
    }

    #[test]
    fn test_apply_commit_out_of_bounds_fails() {
        let mut sheet = Sheet::new("Sheet1", GridExtent::new(2, 2));
        let commit = CellCommit::from_draft(to_id(5, 0), "x");
        assert!(apply_commit(&mut sheet, &commit).is_err());
    }
}
