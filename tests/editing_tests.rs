//! Edit session tests: opening, committing, discarding, and store writes.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{center, click, grid};
use sheetgrid::{
    classify_draft, to_id, CellCommit, CellContent, CellStore, CellValue, EditSession, EditState,
    GridController, GridConfig, GridExtent, GridError, Key, Modifiers, PointerButton, Sheet,
};
use test_case::test_case;

fn recording(grid: &mut GridController<Sheet>) -> Rc<RefCell<Vec<CellCommit>>> {
    let commits = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&commits);
    grid.set_commit_hook(Some(Box::new(move |commit: &CellCommit| {
        sink.borrow_mut().push(commit.clone());
    })));
    commits
}

#[test]
fn opening_second_session_discards_first_draft() {
    let mut session = EditSession::new();
    session.begin(to_id(0, 0), String::new());
    session.set_draft("unsaved A");
    let discarded = session.begin(to_id(1, 1), "B".to_string());
    assert_eq!(discarded, Some(to_id(0, 0)));
    assert_eq!(
        session.state(),
        &EditState::Editing {
            cell: to_id(1, 1),
            draft: "B".to_string()
        }
    );
}

#[test]
fn edit_exclusivity_through_controller() {
    let mut grid = grid();
    let commits = recording(&mut grid);
    grid.begin_edit(to_id(0, 0));
    grid.set_draft("draft for A");
    grid.begin_edit(to_id(1, 1));
    assert_eq!(grid.edit().editing_cell(), Some(to_id(1, 1)));
    assert_eq!(grid.edit().draft(), Some(""));
    assert_eq!(grid.store().cell(0, 0), Some(&CellContent::default()));
    assert!(commits.borrow().is_empty());
}

#[test]
fn double_click_opens_editor_seeded_with_display_value() {
    let mut grid = grid();
    grid.update_store(|sheet| sheet.set_cell(to_id(2, 1), CellValue::Number(7.5), None))
        .unwrap();
    let p = center(&grid, 2, 1);
    assert!(grid.double_click(p));
    assert_eq!(grid.edit().editing_cell(), Some(to_id(2, 1)));
    assert_eq!(grid.edit().draft(), Some("7.5"));
    assert_eq!(grid.selection().active(), Some(to_id(2, 1)));
}

#[test]
fn f2_seeds_formula_text() {
    let mut grid = grid();
    grid.update_store(|sheet| {
        sheet.set_cell(to_id(0, 0), CellValue::Number(3.0), Some("=SUM(A2:A3)".into()))
    })
    .unwrap();
    click(&mut grid, 0, 0);
    assert!(grid.key_down(Key::F2, Modifiers::NONE));
    assert_eq!(grid.edit().draft(), Some("=SUM(A2:A3)"));
}

#[test]
fn enter_commits_to_store_and_hook() {
    let mut grid = grid();
    let commits = recording(&mut grid);
    click(&mut grid, 4, 2);
    grid.key_down(Key::Enter, Modifiers::NONE);
    grid.set_draft("42");
    assert!(grid.key_down(Key::Enter, Modifiers::NONE));
    assert!(!grid.edit().is_editing());
    assert_eq!(
        grid.store().cell(4, 2).unwrap().value,
        CellValue::Number(42.0)
    );
    let commits = commits.borrow();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].cell, to_id(4, 2));
    assert_eq!(commits[0].formula, None);
}

#[test]
fn escape_discards_without_writing() {
    let mut grid = grid();
    let commits = recording(&mut grid);
    click(&mut grid, 0, 0);
    grid.key_down(Key::Enter, Modifiers::NONE);
    grid.set_draft("never saved");
    assert!(grid.key_down(Key::Escape, Modifiers::NONE));
    assert!(!grid.edit().is_editing());
    assert_eq!(grid.store().cell(0, 0), Some(&CellContent::default()));
    assert!(commits.borrow().is_empty());
    // escape with nothing open is not handled
    assert!(!grid.key_down(Key::Escape, Modifiers::NONE));
}

#[test]
fn arrows_while_editing_stay_in_the_input() {
    let mut grid = grid();
    click(&mut grid, 0, 0);
    grid.key_down(Key::Enter, Modifiers::NONE);
    assert!(!grid.key_down(Key::ArrowDown, Modifiers::NONE));
    assert_eq!(grid.selection().active(), Some(to_id(0, 0)));
    assert!(grid.edit().is_editing());
}

#[test]
fn pointer_down_elsewhere_commits_like_blur() {
    let mut grid = grid();
    let commits = recording(&mut grid);
    click(&mut grid, 0, 0);
    grid.key_down(Key::Enter, Modifiers::NONE);
    grid.set_draft("=A2*2");
    let p = center(&grid, 3, 3);
    grid.pointer_down(p, PointerButton::Primary, Modifiers::NONE);
    let cell = grid.store().cell(0, 0).unwrap();
    assert_eq!(cell.formula.as_deref(), Some("=A2*2"));
    assert_eq!(commits.borrow().len(), 1);
    assert_eq!(grid.selection().active(), Some(to_id(3, 3)));
}

#[test]
fn commit_with_nothing_open_is_none() {
    let mut grid = grid();
    assert!(grid.commit_edit().is_none());
    assert!(!grid.cancel_edit());
}

#[test]
fn loading_smaller_sheet_cancels_edit() {
    let mut grid = grid();
    let commits = recording(&mut grid);
    grid.begin_edit(to_id(50, 10));
    grid.load_store(Sheet::new("Tiny", GridExtent::new(5, 5)));
    assert!(!grid.edit().is_editing());
    assert!(commits.borrow().is_empty());
    assert!(!grid.begin_edit(to_id(50, 10)));
}

#[test]
fn shrinking_store_in_place_cancels_out_of_range_edit() {
    let rows = vec![vec![CellContent::new("x"); 4]; 4];
    let mut grid = GridController::new(Sheet::from_rows("Data", rows), GridConfig::default()).unwrap();
    grid.begin_edit(to_id(3, 3));
    grid.update_store(|sheet| *sheet = Sheet::new("Data", GridExtent::new(2, 2)));
    assert!(!grid.edit().is_editing());
}

#[test]
fn store_rejects_out_of_bounds_writes() {
    let mut sheet = Sheet::new("S", GridExtent::new(2, 2));
    let err = sheet
        .set_cell(to_id(5, 0), CellValue::Boolean(true), None)
        .unwrap_err();
    assert!(matches!(
        err,
        GridError::OutOfBounds {
            row: 5,
            col: 0,
            rows: 2,
            cols: 2
        }
    ));
}

#[test_case("=A1+1", CellValue::Empty, Some("=A1+1") ; "formula")]
#[test_case("  =B2 ", CellValue::Empty, Some("=B2") ; "padded formula")]
#[test_case("", CellValue::Empty, None ; "empty")]
#[test_case("12.5", CellValue::Number(12.5), None ; "number")]
#[test_case("TRUE", CellValue::Boolean(true), None ; "boolean")]
#[test_case("hello world", CellValue::Text("hello world".into()), None ; "text")]
#[test_case("NaN", CellValue::Text("NaN".into()), None ; "nan stays text")]
fn draft_classification(draft: &str, value: CellValue, formula: Option<&str>) {
    let (got_value, got_formula) = classify_draft(draft);
    assert_eq!(got_value, value);
    assert_eq!(got_formula.as_deref(), formula);
}
