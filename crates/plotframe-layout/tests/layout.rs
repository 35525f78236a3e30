//! Grid layout behaviour across the public API.

use plotframe_core::{Bounds, LayoutError, Margins};
use plotframe_layout::{GridLayout, SizePolicy, Widget};
use proptest::prelude::*;

fn grid_of(cols: &[SizePolicy], rows: &[SizePolicy]) -> GridLayout {
    let mut grid = GridLayout::new(rows.len(), cols.len()).unwrap();
    for (row, &policy) in rows.iter().enumerate() {
        grid.set_row_policy(row, policy).unwrap();
    }
    for (col, &policy) in cols.iter().enumerate() {
        grid.set_col_policy(col, policy).unwrap();
    }
    for row in 0..rows.len() {
        for col in 0..cols.len() {
            grid.set_cell(row, col, Widget::flexible()).unwrap();
        }
    }
    grid
}

fn track_policy() -> impl Strategy<Value = SizePolicy> {
    prop_oneof![
        (0.0..50.0f64).prop_map(SizePolicy::Fixed),
        (0.1..5.0f64).prop_map(SizePolicy::Flexible),
    ]
}

fn track_policy_with_aspect() -> impl Strategy<Value = SizePolicy> {
    prop_oneof![
        3 => track_policy(),
        1 => (0.05..0.5f64).prop_map(SizePolicy::Aspect),
    ]
}

fn inside(inner: Bounds, outer: Bounds) -> bool {
    let tol = 1e-6;
    inner.x >= outer.x - tol
        && inner.y >= outer.y - tol
        && inner.right() <= outer.right() + tol
        && inner.top() <= outer.top() + tol
}

proptest! {
    #[test]
    fn tracks_and_gaps_fill_the_grid(
        cols in prop::collection::vec(track_policy_with_aspect(), 1..6),
        rows in prop::collection::vec(track_policy_with_aspect(), 1..6),
        width in 300.0..1000.0f64,
        height in 300.0..1000.0f64,
    ) {
        let mut grid = grid_of(&cols, &rows);
        match grid.solve(width, height) {
            Ok(()) => {}
            // aspect tracks may over-claim or lock both anchors
            Err(LayoutError::LayoutInfeasible { .. } | LayoutError::AspectConflict { .. }) => {
                prop_assert!(cols.iter().chain(&rows).any(|p| p.is_aspect()));
                return Ok(());
            }
            Err(err) => return Err(TestCaseError::fail(err.to_string())),
        }
        let tracks = grid.track_sizes().unwrap();

        prop_assert_eq!(tracks.total_width(), width);
        prop_assert_eq!(tracks.total_height(), height);
        prop_assert!(tracks.column_gap >= 0.0 && tracks.row_gap >= 0.0);
        prop_assert!(tracks.columns.iter().chain(&tracks.rows).all(|size| *size >= 0.0));

        let page = Bounds::from_size(width, height);
        for widget in grid.widgets() {
            prop_assert!(inside(widget.bounds().unwrap(), page));
        }
    }

    #[test]
    fn solving_twice_is_identical(
        cols in prop::collection::vec(track_policy(), 1..5),
        rows in prop::collection::vec(track_policy(), 1..5),
        ratio in 0.2..5.0f64,
    ) {
        let mut grid = grid_of(&cols, &rows).with_aspect(ratio, 0, 0).unwrap();
        let first = grid.solve(800.0, 600.0);
        let snapshot = grid.clone();
        let second = grid.solve(800.0, 600.0);
        prop_assert_eq!(first, second);
        prop_assert_eq!(grid, snapshot);
    }

    #[test]
    fn oversized_fixed_pair_is_infeasible(a in 1.0..100.0f64, b in 1.0..100.0f64) {
        let width = (a + b) * 0.9;
        let mut grid = grid_of(&[SizePolicy::Fixed(a), SizePolicy::Fixed(b)], &[SizePolicy::Flexible(1.0)]);
        let err = grid.solve(width, 10.0).unwrap_err();
        let is_width_infeasible = matches!(err, LayoutError::LayoutInfeasible { dimension: "width", .. });
        prop_assert!(is_width_infeasible);
    }

    #[test]
    fn aspect_widget_fits_its_cell(ratio in 0.1..10.0f64, width in 1.0..500.0f64, height in 1.0..500.0f64) {
        let mut widget = Widget::aspect(ratio);
        let bounds = widget.resolve(0.0, 0.0, width, height).unwrap();
        prop_assert!((bounds.aspect() - ratio).abs() < 1e-9 * ratio);
        prop_assert!(inside(bounds, Bounds::from_size(width, height)));
        let touches = (bounds.width - width).abs() < 1e-9 * width || (bounds.height - height).abs() < 1e-9 * height;
        prop_assert!(touches);
    }
}

#[test]
fn test_cell_rectangles() {
    let mut grid = GridLayout::new(2, 2)
        .unwrap()
        .with_cell(0, 0, Widget::flexible().named("a"))
        .unwrap()
        .with_cell(0, 1, Widget::flexible().named("b"))
        .unwrap()
        .with_cell(1, 0, Widget::flexible().named("c"))
        .unwrap()
        .with_cell(1, 1, Widget::flexible().named("d"))
        .unwrap()
        .with_col_policy(0, SizePolicy::Fixed(20.0))
        .unwrap()
        .with_row_policy(1, SizePolicy::Fixed(10.0))
        .unwrap();
    grid.solve(100.0, 50.0).unwrap();

    let rendered: Vec<String> = grid
        .widgets()
        .map(|widget| {
            let b = widget.bounds().unwrap();
            format!(
                "{} {:.1} {:.1} {:.1} {:.1}",
                widget.name().unwrap_or("-"),
                b.x,
                b.y,
                b.width,
                b.height
            )
        })
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    a 0.0 10.0 20.0 40.0
    b 20.0 10.0 80.0 40.0
    c 0.0 0.0 20.0 10.0
    d 20.0 0.0 80.0 10.0
    ");
}

#[test]
fn test_nested_panels_stay_inside_parents() {
    let colorbar = GridLayout::new(1, 2)
        .unwrap()
        .with_cell(0, 0, Widget::aspect(1.0).named("map"))
        .unwrap()
        .with_cell(0, 1, Widget::fixed(15.0, 100.0).named("bar"))
        .unwrap();
    let mut page = GridLayout::frame(Margins::uniform(30.0), Widget::from(colorbar).named("figure"));
    page.solve(400.0, 300.0).unwrap();

    let figure = page.find("figure").unwrap().bounds().unwrap();
    let map = page.find("map").unwrap().bounds().unwrap();
    let bar = page.find("bar").unwrap().bounds().unwrap();
    assert!(inside(map, figure));
    assert!(inside(bar, figure));
    assert!((map.width - map.height).abs() < 1e-9);
    assert_eq!(page.bbox(), Some(Bounds::from_size(400.0, 300.0)));
}

#[test]
fn test_unsolved_layout_has_no_geometry() {
    let grid = GridLayout::frame(Margins::default(), Widget::flexible().named("plot"));
    assert!(grid.track_sizes().is_none());
    assert!(grid.bbox().is_none());
    assert_eq!(grid.find("plot").unwrap().bounds(), None);
}
