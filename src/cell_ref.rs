//! Cell coordinates, opaque cell identifiers, and A1-style labels.
//!
//! This is the only module that encodes or decodes identifier text. Every
//! other component works with [`CellCoord`] or [`CellId`] values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{GridError, Result};

const ID_PREFIX: &str = "cell-";

/// Zero-based (row, column) position in a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl From<(u32, u32)> for CellCoord {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

/// Opaque, reversible cell identifier.
///
/// Ordering is row-major, so sorted collections of ids iterate the way a
/// sheet reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(CellCoord);

impl CellId {
    pub const fn new(row: u32, col: u32) -> Self {
        Self(CellCoord::new(row, col))
    }

    pub const fn coord(self) -> CellCoord {
        self.0
    }

    pub const fn row(self) -> u32 {
        self.0.row
    }

    pub const fn col(self) -> u32 {
        self.0.col
    }
}

impl From<CellCoord> for CellId {
    fn from(coord: CellCoord) -> Self {
        Self(coord)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}", ID_PREFIX, self.0.row, self.0.col)
    }
}

impl FromStr for CellId {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        from_id(s).map(Self)
    }
}

impl Serialize for CellId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Build the identifier for `(row, col)`.
pub const fn to_id(row: u32, col: u32) -> CellId {
    CellId::new(row, col)
}

/// Decode identifier text produced by [`CellId`]'s `Display` impl.
///
/// Only the exact `cell-{row}-{col}` form with unsigned decimal parts and no
/// leading zeros is accepted; anything else is a [`GridError::Parse`].
pub fn from_id(id: &str) -> Result<CellCoord> {
    let malformed = || GridError::Parse(id.to_string());
    let rest = id.strip_prefix(ID_PREFIX).ok_or_else(malformed)?;
    let (row, col) = rest.split_once('-').ok_or_else(malformed)?;
    Ok(CellCoord::new(
        parse_index(row).ok_or_else(malformed)?,
        parse_index(col).ok_or_else(malformed)?,
    ))
}

fn parse_index(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // one spelling per index
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse().ok()
}

/// Convert a 0-based column index to spreadsheet letters (A, B, ..., Z, AA, AB, ...)
pub fn column_label(col: u32) -> String {
    let mut result = Vec::new();
    let mut n = u64::from(col) + 1;
    while n > 0 {
        n -= 1;
        // n % 26 < 26, so the byte stays within 'A'..='Z'
        #[allow(clippy::cast_possible_truncation)]
        result.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    result.reverse();
    String::from_utf8_lossy(&result).into_owned()
}

/// A1-style reference for a cell, as shown in the formula bar name box.
pub fn cell_reference(row: u32, col: u32) -> String {
    format!("{}{}", column_label(col), u64::from(row) + 1)
}

/// Parse a reference like "B12" (optionally with `$` markers) into a coordinate.
pub fn parse_cell_ref(cell_ref: &str) -> Result<CellCoord> {
    let malformed = || GridError::Parse(cell_ref.to_string());
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for b in cell_ref.trim().bytes() {
        if b == b'$' {
            continue;
        }
        if b.is_ascii_alphabetic() {
            if saw_row {
                return Err(malformed());
            }
            let digit = u32::from(b.to_ascii_uppercase() - b'A') + 1;
            col = col
                .checked_mul(26)
                .and_then(|c| c.checked_add(digit))
                .ok_or_else(malformed)?;
            saw_col = true;
        } else if b.is_ascii_digit() {
            row = row
                .checked_mul(10)
                .and_then(|r| r.checked_add(u32::from(b - b'0')))
                .ok_or_else(malformed)?;
            saw_row = true;
        } else {
            return Err(malformed());
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return Err(malformed());
    }

    Ok(CellCoord::new(row - 1, col - 1))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_id_text_form() {
        assert_eq!(to_id(3, 1).to_string(), "cell-3-1");
        assert_eq!(from_id("cell-3-1").unwrap(), CellCoord::new(3, 1));
    }

    #[test]
    fn test_from_id_rejects_garbage() {
        for bad in [
            "", "cell-", "cell-1", "cell-1-", "cell--1", "cell-1-x", "row-1-2", "cell-+1-2",
            "cell-1-2-3", "cell-99999999999-0", " cell-1-2",
        ] {
            assert!(
                matches!(from_id(bad), Err(GridError::Parse(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_column_labels() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(27), "AB");
        assert_eq!(column_label(701), "ZZ");
        assert_eq!(column_label(702), "AAA");
    }

    #[test]
    fn test_cell_reference_round_trip() {
        assert_eq!(cell_reference(0, 0), "A1");
        assert_eq!(cell_reference(11, 1), "B12");
        assert_eq!(parse_cell_ref("B12").unwrap(), CellCoord::new(11, 1));
        assert_eq!(parse_cell_ref("$AA$3").unwrap(), CellCoord::new(2, 26));
        assert!(parse_cell_ref("A0").is_err());
        assert!(parse_cell_ref("1A").is_err());
        assert!(parse_cell_ref("A-1").is_err());
    }

    #[test]
    fn test_id_orders_row_major() {
        let mut ids = vec![to_id(1, 0), to_id(0, 5), to_id(0, 1)];
        ids.sort();
        assert_eq!(ids, vec![to_id(0, 1), to_id(0, 5), to_id(1, 0)]);
    }

    #[test]
    fn test_id_serializes_as_text() {
        let json = serde_json::to_string(&to_id(2, 7)).unwrap();
        assert_eq!(json, "\"cell-2-7\"");
        let back: CellId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, to_id(2, 7));
    }
}
