//! Layout benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plotframe_core::{Margins, CM, GOLDEN_RATIO};
use plotframe_layout::{GridLayout, SizePolicy, Widget};

fn panel() -> GridLayout {
    GridLayout::new(1, 2)
        .unwrap()
        .with_cell(0, 0, Widget::flexible())
        .unwrap()
        .with_cell(0, 1, Widget::flexible())
        .unwrap()
        .with_col_policy(1, SizePolicy::Fixed(CM))
        .unwrap()
        .with_aspect(GOLDEN_RATIO, 0, 0)
        .unwrap()
}

fn solve_frame(c: &mut Criterion) {
    let mut frame = GridLayout::frame(Margins::default(), Widget::from(panel()));
    c.bench_function("solve_frame", |b| {
        b.iter(|| frame.solve(black_box(595.0), black_box(842.0)))
    });
}

fn solve_panel_matrix(c: &mut Criterion) {
    let mut grid = GridLayout::new(4, 4).unwrap();
    for row in 0..4 {
        for col in 0..4 {
            grid.set_cell(row, col, panel()).unwrap();
        }
    }
    let mut frame = GridLayout::frame(Margins::default(), Widget::from(grid));
    c.bench_function("solve_4x4_panels", |b| {
        b.iter(|| frame.solve(black_box(842.0), black_box(595.0)))
    });
}

criterion_group!(benches, solve_frame, solve_panel_matrix);
criterion_main!(benches);
