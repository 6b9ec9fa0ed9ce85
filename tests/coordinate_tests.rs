//! Cell identifier and A1 reference tests.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use sheetgrid::{
    cell_reference, column_label, from_id, parse_cell_ref, to_id, CellCoord, CellId, GridError,
};
use test_case::test_case;

#[test_case(0, 0 ; "origin")]
#[test_case(3, 25 ; "last single letter column")]
#[test_case(99, 26 ; "past z")]
#[test_case(1_048_575, 16_383 ; "excel limits")]
#[test_case(u32::MAX, u32::MAX ; "u32 max")]
fn id_round_trip(row: u32, col: u32) {
    let id = to_id(row, col);
    assert_eq!(from_id(&id.to_string()).unwrap(), CellCoord::new(row, col));
    assert_eq!(id.to_string().parse::<CellId>().unwrap(), id);
}

#[test]
fn id_round_trip_small_grid_exhaustive() {
    for row in 0..100 {
        for col in 0..26 {
            let coord = from_id(&to_id(row, col).to_string()).unwrap();
            assert_eq!((coord.row, coord.col), (row, col));
        }
    }
}

#[test]
fn distinct_coordinates_never_collide() {
    // "1-11" vs "11-1" style ambiguity
    assert_ne!(to_id(1, 11).to_string(), to_id(11, 1).to_string());
    assert_ne!(to_id(1, 11), to_id(11, 1));
}

#[test_case("" ; "empty")]
#[test_case("cell-1" ; "missing column")]
#[test_case("cell-a-1" ; "letters")]
#[test_case("cell--1-2" ; "negative")]
#[test_case("cell-1-2-3" ; "extra part")]
#[test_case("row-1-2" ; "wrong prefix")]
#[test_case("cell-+1-2" ; "plus sign")]
#[test_case("cell-99999999999-0" ; "overflow")]
#[test_case("cell-01-2" ; "leading zero row")]
#[test_case("cell-1-00" ; "leading zero column")]
fn malformed_ids_are_rejected(text: &str) {
    assert!(matches!(from_id(text), Err(GridError::Parse(_))));
}

#[test_case("cell-0-0")]
#[test_case("cell-0-10")]
#[test_case("cell-100-7")]
fn id_text_is_canonical(text: &str) {
    let id: CellId = text.parse().unwrap();
    assert_eq!(id.to_string(), text);
}

#[test_case(0, "A")]
#[test_case(25, "Z")]
#[test_case(26, "AA")]
#[test_case(51, "AZ")]
#[test_case(52, "BA")]
#[test_case(701, "ZZ")]
#[test_case(702, "AAA")]
fn column_labels(col: u32, expected: &str) {
    assert_eq!(column_label(col), expected);
}

#[test_case(0, 0, "A1")]
#[test_case(11, 1, "B12")]
#[test_case(99, 25, "Z100")]
#[test_case(0, 27, "AB1")]
fn a1_references(row: u32, col: u32, expected: &str) {
    assert_eq!(cell_reference(row, col), expected);
    assert_eq!(parse_cell_ref(expected).unwrap(), CellCoord::new(row, col));
}

#[test_case("A0" ; "row zero")]
#[test_case("1A" ; "digits first")]
#[test_case("A1B" ; "letters after digits")]
#[test_case("" ; "empty")]
fn bad_a1_references(text: &str) {
    assert!(parse_cell_ref(text).is_err());
}

#[test]
fn ids_serialize_as_strings() {
    let json = serde_json::to_string(&to_id(4, 2)).unwrap();
    assert_eq!(json, "\"cell-4-2\"");
    let back: CellId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, to_id(4, 2));
    assert!(serde_json::from_str::<CellId>("\"cell-x\"").is_err());
}
