//! Interaction controller tests: clicks, drags, autoscroll, keyboard.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{
    assert_selection, block, center, click, click_with, grid, grid_with, ids, press, CONTAINER,
};
use sheetgrid::{to_id, CellCoord, GridConfig, Key, Modifiers, Point, PointerButton, Size};
use test_case::test_case;

#[test]
fn keyboard_navigation_scenario() {
    let mut grid = grid();
    click(&mut grid, 0, 0);
    press(&mut grid, Key::ArrowDown, 3);
    press(&mut grid, Key::ArrowRight, 1);
    assert_eq!(grid.selection().active(), Some(to_id(3, 1)));
    assert_selection(&grid, &ids(&[(3, 1)]));
}

#[test]
fn shift_click_range_scenario() {
    let mut grid = grid();
    click(&mut grid, 1, 1);
    click_with(&mut grid, 3, 3, Modifiers::SHIFT);
    assert_selection(&grid, &block(1..=3, 1..=3));
    assert_eq!(grid.selection().active(), Some(to_id(3, 3)));
}

#[test]
fn shift_click_without_prior_selection_selects_single() {
    let mut grid = grid();
    click_with(&mut grid, 4, 4, Modifiers::SHIFT);
    assert_selection(&grid, &ids(&[(4, 4)]));
}

#[test_case(Modifiers::CTRL ; "ctrl")]
#[test_case(Modifiers::META ; "cmd")]
fn ctrl_click_toggle_scenario(mods: Modifiers) {
    let mut grid = grid();
    click(&mut grid, 0, 0);
    click_with(&mut grid, 0, 0, mods);
    assert!(grid.selection().is_empty());
    assert_eq!(grid.selection().active(), None);
}

#[test]
fn ctrl_click_adds_and_focuses() {
    let mut grid = grid();
    click(&mut grid, 0, 0);
    click_with(&mut grid, 2, 2, Modifiers::CTRL);
    assert_selection(&grid, &ids(&[(0, 0), (2, 2)]));
    assert_eq!(grid.selection().active(), Some(to_id(2, 2)));
}

#[test]
fn clicking_active_cell_reselects() {
    let mut grid = grid();
    click(&mut grid, 1, 1);
    click_with(&mut grid, 3, 3, Modifiers::SHIFT);
    let rev = grid.selection().revision();
    click(&mut grid, 3, 3);
    assert!(grid.selection().revision() > rev);
    assert_selection(&grid, &ids(&[(3, 3)]));
    assert_eq!(grid.selection().anchor(), Some(to_id(3, 3)));
}

#[test]
fn drag_selects_rectangle_and_ends_cleanly() {
    let mut grid = grid();
    let start = center(&grid, 2, 1);
    assert!(grid.pointer_down(start, PointerButton::Primary, Modifiers::NONE));
    let p = center(&grid, 4, 3);
    assert!(grid.pointer_move(p));
    assert_selection(&grid, &block(2..=4, 1..=3));
    // dragging back past the anchor flips the rectangle
    let p = center(&grid, 0, 0);
    grid.pointer_move(p);
    assert_selection(&grid, &block(0..=2, 0..=1));
    assert_eq!(grid.drag().anchor, Some(to_id(2, 1)));
    grid.pointer_up();
    assert!(!grid.is_dragging());
}

#[test]
fn drag_outside_container_clamps() {
    let mut grid = grid();
    let start = center(&grid, 1, 1);
    grid.pointer_down(start, PointerButton::Primary, Modifiers::NONE);
    grid.pointer_move(Point::new(-400.0, -400.0));
    assert_selection(&grid, &block(0..=1, 0..=1));
    grid.pointer_move(Point::new(f32::INFINITY, f32::NAN));
    assert!(grid.selection().active().is_some());
}

#[test]
fn resize_during_drag_retargets_pointer_cell() {
    let mut grid = grid();
    grid.set_scroll(Point::new(0.0, 10_000.0));
    assert_eq!(grid.scroll().y, 2800.0);
    let p = center(&grid, 95, 0);
    grid.pointer_down(p, PointerButton::Primary, Modifiers::NONE);
    let pointer = Point::new(100.0, 200.0);
    grid.pointer_move(pointer);
    assert_eq!(grid.selection().active(), Some(to_id(92, 0)));

    // a taller container lowers the max scroll, shifting rows under the pointer
    assert!(grid.resize(Size::new(CONTAINER.width, CONTAINER.height + 200.0)));
    assert_eq!(grid.scroll().y, 2600.0);
    let under = grid.geometry().cell_at(pointer, grid.scroll()).unwrap();
    assert_eq!(under, CellCoord::new(86, 0));
    assert_eq!(grid.selection().active(), Some(to_id(86, 0)));
    assert_selection(&grid, &block(86..=95, 0..=0));
    assert!(grid.is_dragging());
}

#[test]
fn resize_without_drag_keeps_selection() {
    let mut grid = grid();
    click(&mut grid, 3, 2);
    grid.resize(Size::new(400.0, 200.0));
    assert_selection(&grid, &ids(&[(3, 2)]));
}

#[test]
fn end_drag_is_idempotent() {
    let mut grid = grid();
    let p = center(&grid, 0, 0);
    grid.pointer_down(p, PointerButton::Primary, Modifiers::NONE);
    assert!(grid.pointer_up());
    let drag = *grid.drag();
    let selection = grid.selection().clone();
    assert!(!grid.pointer_up());
    assert_eq!(*grid.drag(), drag);
    assert_eq!(grid.selection(), &selection);
    assert!(!grid.is_dragging());
}

#[test]
fn moves_without_drag_are_ignored() {
    let mut grid = grid();
    click(&mut grid, 0, 0);
    let p = center(&grid, 5, 5);
    assert!(!grid.pointer_move(p));
    assert_selection(&grid, &ids(&[(0, 0)]));
}

#[test]
fn window_blur_ends_drag() {
    let mut grid = grid();
    let p = center(&grid, 0, 0);
    grid.pointer_down(p, PointerButton::Primary, Modifiers::NONE);
    assert!(grid.blur());
    assert!(!grid.is_dragging());
    assert!(!grid.wants_autoscroll());
}

#[test_case(Point::new(400.0, 431.0), Point::new(0.0, 19.5) ; "bottom edge")]
#[test_case(Point::new(400.0, 392.0), Point::new(0.0, 0.0) ; "bottom zone boundary")]
#[test_case(Point::new(400.0, 10.0), Point::new(0.0, -15.0) ; "top zone")]
#[test_case(Point::new(838.0, 200.0), Point::new(15.0, 0.0) ; "right zone")]
#[test_case(Point::new(-50.0, 1000.0), Point::new(-20.0, 20.0) ; "outside corner")]
fn autoscroll_step_scales_with_depth(pointer: Point, expected: Point) {
    let mut grid = grid();
    let p = center(&grid, 5, 2);
    grid.pointer_down(p, PointerButton::Primary, Modifiers::NONE);
    grid.pointer_move(pointer);
    assert_eq!(grid.autoscroll_step(), expected);
}

#[test]
fn autoscroll_keeps_extending_selection() {
    let mut grid = grid();
    let p = center(&grid, 5, 0);
    grid.pointer_down(p, PointerButton::Primary, Modifiers::NONE);
    // hold the pointer on the bottom edge
    grid.pointer_move(Point::new(100.0, 432.0));
    let mut last_row = grid.selection().active().unwrap().row();
    let mut frames = 0;
    while grid.autoscroll_tick() {
        let row = grid.selection().active().unwrap().row();
        assert!(row >= last_row);
        last_row = row;
        frames += 1;
    }
    // 2800px of scroll at 20px per frame
    assert_eq!(frames, 140);
    assert_eq!(grid.scroll().y, 2800.0);
    assert_eq!(last_row, 99);
    assert_eq!(grid.selection().len(), 95);
    // still in the zone, but nothing left to scroll
    assert!(grid.wants_autoscroll());
    grid.pointer_up();
    assert!(!grid.wants_autoscroll());
}

#[test]
fn autoscroll_stops_when_pointer_leaves_zone() {
    let mut grid = grid();
    let p = center(&grid, 5, 0);
    grid.pointer_down(p, PointerButton::Primary, Modifiers::NONE);
    grid.pointer_move(Point::new(100.0, 432.0));
    assert!(grid.autoscroll_tick());
    grid.pointer_move(Point::new(100.0, 200.0));
    assert!(!grid.wants_autoscroll());
    assert!(!grid.autoscroll_tick());
}

#[test]
fn disabled_autoscroll() {
    let config = GridConfig {
        autoscroll_threshold: 0.0,
        ..GridConfig::default()
    };
    let mut grid = grid_with(config);
    let p = center(&grid, 0, 0);
    grid.pointer_down(p, PointerButton::Primary, Modifiers::NONE);
    grid.pointer_move(Point::new(0.0, 432.0));
    assert!(!grid.wants_autoscroll());
}

#[test]
fn arrows_clamp_at_edges() {
    let mut grid = grid();
    click(&mut grid, 0, 0);
    press(&mut grid, Key::ArrowUp, 3);
    press(&mut grid, Key::ArrowLeft, 3);
    assert_eq!(grid.selection().active(), Some(to_id(0, 0)));
    press(&mut grid, Key::ArrowRight, 40);
    assert_eq!(grid.selection().active(), Some(to_id(0, 25)));
    // scrolled so the last column is fully visible
    assert_eq!(grid.scroll().x, 26.0 * 128.0 - 800.0);
}

#[test]
fn shift_arrows_extend_from_anchor() {
    let mut grid = grid();
    click(&mut grid, 2, 2);
    grid.key_down(Key::ArrowDown, Modifiers::SHIFT);
    grid.key_down(Key::ArrowRight, Modifiers::SHIFT);
    assert_selection(&grid, &block(2..=3, 2..=3));
    grid.key_down(Key::ArrowUp, Modifiers::SHIFT);
    grid.key_down(Key::ArrowUp, Modifiers::SHIFT);
    assert_selection(&grid, &block(1..=2, 2..=3));
    assert_eq!(grid.selection().anchor(), Some(to_id(2, 2)));
}

#[test]
fn non_primary_buttons_do_nothing() {
    let mut grid = grid();
    click(&mut grid, 0, 0);
    let p = center(&grid, 3, 3);
    assert!(!grid.pointer_down(p, PointerButton::Middle, Modifiers::NONE));
    assert!(!grid.pointer_down(p, PointerButton::Secondary, Modifiers::SHIFT));
    assert_selection(&grid, &ids(&[(0, 0)]));
}
