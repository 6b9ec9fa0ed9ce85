//! Benchmarks for the per-frame hot paths: viewport recompute, pool
//! reposition, range selection and render projection.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_precision_loss)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sheetgrid::{
    project, to_id, CellPool, GridConfig, GridController, GridExtent, Point, SelectionEngine,
    Sheet, Size, Viewport, ViewportInput,
};

/// Scroll a tall sheet one pixel at a time, repositioning the pool each step.
fn bench_scroll(c: &mut Criterion) {
    let extent = GridExtent::new(1_000_000, 16_384);
    let mut pool = CellPool::new();

    c.bench_function("viewport_scroll_1000_steps", |b| {
        b.iter(|| {
            for step in 0..1000 {
                let input = ViewportInput {
                    scroll: Point::new(0.0, step as f32 * 7.0),
                    container: Size::new(1920.0, 1080.0),
                    cell: Size::new(128.0, 32.0),
                    extent,
                    buffer: 5,
                };
                let viewport = Viewport::compute(black_box(&input));
                pool.reposition(&viewport, extent);
            }
        });
    });
}

fn bench_select_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_range");
    for size in [10_u32, 100, 300] {
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut selection = SelectionEngine::new();
            b.iter(|| {
                selection.select_range(to_id(0, 0), black_box(to_id(size - 1, size - 1)));
            });
        });
    }
    group.finish();
}

fn bench_project(c: &mut Criterion) {
    let mut grid =
        GridController::with_blank_sheet(GridConfig::default()).expect("default config is valid");
    grid.resize(Size::new(1968.0, 1112.0));
    grid.select_cells((0..20).map(|row| to_id(row, 0)));

    c.bench_function("project_full_hd_frame", |b| {
        b.iter(|| project(black_box(&grid)));
    });
}

/// Drag across the sheet while autoscrolling to the bottom.
fn bench_autoscroll(c: &mut Criterion) {
    c.bench_function("autoscroll_to_bottom", |b| {
        b.iter(|| {
            let sheet = Sheet::new("Bench", GridExtent::new(2000, 26));
            let mut grid =
                GridController::new(sheet, GridConfig::default()).expect("default config is valid");
            grid.resize(Size::new(848.0, 432.0));
            grid.pointer_down(
                Point::new(100.0, 50.0),
                sheetgrid::PointerButton::Primary,
                sheetgrid::Modifiers::NONE,
            );
            grid.pointer_move(Point::new(100.0, 432.0));
            while grid.autoscroll_tick() {}
            black_box(grid.selection().len())
        });
    });
}

criterion_group!(
    benches,
    bench_scroll,
    bench_select_range,
    bench_project,
    bench_autoscroll
);
criterion_main!(benches);
