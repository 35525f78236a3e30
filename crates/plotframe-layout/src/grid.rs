//! Recursive grid layout.
//!
//! A grid is `rows x cols` cells, each holding a [`Widget`]. A widget may
//! carry a nested grid, which is solved inside the widget's box. Coordinates
//! are page points with the origin at the bottom-left; row 0 is the top row.

use plotframe_core::{Bounds, ConfigError, LayoutError, Margins, PageConfig};
use tracing::debug;

use crate::policy::{AspectPolicy, ContentAlignment, SizePolicy};
use crate::tracks::{solve_tracks, TrackSizes};
use crate::widget::Widget;

/// Grid layout of widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Widget>>,
    /// Explicit row policies; `None` derives the policy from the row's cells
    row_policies: Vec<Option<SizePolicy>>,
    /// Explicit column policies; `None` derives the policy from the column's cells
    col_policies: Vec<Option<SizePolicy>>,
    aspect: Option<AspectPolicy>,
    /// Placement of unassigned width
    justify_content: ContentAlignment,
    /// Placement of unassigned height
    align_content: ContentAlignment,
    tracks: Option<TrackSizes>,
}

impl GridLayout {
    /// Create an empty grid. Every cell must be assigned before solving.
    pub fn new(rows: usize, cols: usize) -> Result<Self, LayoutError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::InvalidValue {
                option: "grid size".to_string(),
                reason: format!("a grid needs at least one row and column, got {rows}x{cols}"),
            }
            .into());
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            row_policies: vec![None; rows],
            col_policies: vec![None; cols],
            aspect: None,
            justify_content: ContentAlignment::default(),
            align_content: ContentAlignment::default(),
            tracks: None,
        })
    }

    /// The standard page frame: fixed margins around a flexible centre.
    ///
    /// The eight margin cells are spacers named after their position
    /// (`top`, `top-left`, `left`, ...); the centre keeps its own name.
    pub fn frame(margins: Margins, center: Widget) -> Self {
        const NAMES: [[&str; 3]; 3] = [
            ["top-left", "top", "top-right"],
            ["left", "", "right"],
            ["bottom-left", "bottom", "bottom-right"],
        ];
        let mut cells = Vec::with_capacity(9);
        let mut center = Some(center);
        for (row, names) in NAMES.iter().enumerate() {
            for (col, name) in names.iter().enumerate() {
                if row == 1 && col == 1 {
                    cells.push(center.take());
                } else {
                    cells.push(Some(Widget::flexible().named(*name)));
                }
            }
        }
        Self {
            rows: 3,
            cols: 3,
            cells,
            row_policies: vec![
                Some(SizePolicy::Fixed(margins.top)),
                Some(SizePolicy::Flexible(1.0)),
                Some(SizePolicy::Fixed(margins.bottom)),
            ],
            col_policies: vec![
                Some(SizePolicy::Fixed(margins.left)),
                Some(SizePolicy::Flexible(1.0)),
                Some(SizePolicy::Fixed(margins.right)),
            ],
            aspect: None,
            justify_content: ContentAlignment::default(),
            align_content: ContentAlignment::default(),
            tracks: None,
        }
    }

    /// A frame using the page's margins.
    pub fn page_frame(page: &PageConfig, center: Widget) -> Self {
        Self::frame(page.margins, center)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, LayoutError> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(LayoutError::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Assign a widget to a cell, replacing any previous one.
    pub fn set_cell(&mut self, row: usize, col: usize, widget: impl Into<Widget>) -> Result<(), LayoutError> {
        let index = self.index(row, col)?;
        self.cells[index] = Some(widget.into());
        self.tracks = None;
        Ok(())
    }

    /// Builder form of [`set_cell`](Self::set_cell).
    pub fn with_cell(mut self, row: usize, col: usize, widget: impl Into<Widget>) -> Result<Self, LayoutError> {
        self.set_cell(row, col, widget)?;
        Ok(self)
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Option<&Widget>, LayoutError> {
        let index = self.index(row, col)?;
        Ok(self.cells[index].as_ref())
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<Option<&mut Widget>, LayoutError> {
        let index = self.index(row, col)?;
        Ok(self.cells[index].as_mut())
    }

    pub fn set_row_policy(&mut self, row: usize, policy: SizePolicy) -> Result<(), LayoutError> {
        self.index(row, 0)?;
        self.row_policies[row] = Some(policy);
        Ok(())
    }

    pub fn set_col_policy(&mut self, col: usize, policy: SizePolicy) -> Result<(), LayoutError> {
        self.index(0, col)?;
        self.col_policies[col] = Some(policy);
        Ok(())
    }

    pub fn with_row_policy(mut self, row: usize, policy: SizePolicy) -> Result<Self, LayoutError> {
        self.set_row_policy(row, policy)?;
        Ok(self)
    }

    pub fn with_col_policy(mut self, col: usize, policy: SizePolicy) -> Result<Self, LayoutError> {
        self.set_col_policy(col, policy)?;
        Ok(self)
    }

    /// Constrain the width / height of the anchor cell at (`row`, `col`).
    pub fn with_aspect(mut self, ratio: f64, row: usize, col: usize) -> Result<Self, LayoutError> {
        self.index(row, col)?;
        SizePolicy::Aspect(ratio).validate("grid aspect")?;
        self.aspect = Some(AspectPolicy::new(ratio, row, col));
        Ok(self)
    }

    pub fn aspect(&self) -> Option<AspectPolicy> {
        self.aspect
    }

    /// Placement of space that no track claims.
    pub fn with_content_alignment(mut self, justify: ContentAlignment, align: ContentAlignment) -> Self {
        self.justify_content = justify;
        self.align_content = align;
        self
    }

    /// Track sizes from the last successful solve.
    pub fn track_sizes(&self) -> Option<&TrackSizes> {
        self.tracks.as_ref()
    }

    /// Effective column policies.
    pub fn col_policies(&self) -> Result<Vec<SizePolicy>, LayoutError> {
        (0..self.cols)
            .map(|col| match self.col_policies[col] {
                Some(policy) => Ok(policy),
                None => {
                    let cells = (0..self.rows)
                        .map(|row| self.assigned(row, col).map(Widget::horizontal))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(derive_policy(&cells))
                }
            })
            .collect()
    }

    /// Effective row policies.
    pub fn row_policies(&self) -> Result<Vec<SizePolicy>, LayoutError> {
        (0..self.rows)
            .map(|row| match self.row_policies[row] {
                Some(policy) => Ok(policy),
                None => {
                    let cells = (0..self.cols)
                        .map(|col| self.assigned(row, col).map(Widget::vertical))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(derive_policy(&cells))
                }
            })
            .collect()
    }

    fn assigned(&self, row: usize, col: usize) -> Result<&Widget, LayoutError> {
        self.cells[row * self.cols + col]
            .as_ref()
            .ok_or(LayoutError::UnassignedCell { row, col })
    }

    /// Solve with the origin at (0, 0).
    pub fn solve(&mut self, width: f64, height: f64) -> Result<(), LayoutError> {
        self.solve_at(Bounds::from_size(width, height))
    }

    /// Solve against a whole page.
    pub fn solve_page(&mut self, page: &PageConfig) -> Result<(), LayoutError> {
        page.validate()?;
        self.solve_at(page.page_bounds())
    }

    /// Solve into the given rectangle, resolving every widget recursively.
    ///
    /// On error the grid keeps the geometry of its last successful solve.
    pub fn solve_at(&mut self, bounds: Bounds) -> Result<(), LayoutError> {
        let values = [bounds.x, bounds.y, bounds.width, bounds.height];
        if values.iter().any(|v| !v.is_finite()) || bounds.width < 0.0 || bounds.height < 0.0 {
            return Err(ConfigError::InvalidValue {
                option: "bounds".to_string(),
                reason: format!("layout bounds must be finite and non-negative, got {bounds:?}"),
            }
            .into());
        }
        for row in 0..self.rows {
            for col in 0..self.cols {
                self.assigned(row, col)?;
            }
        }
        let columns = self.col_policies()?;
        let rows = self.row_policies()?;
        for policy in &columns {
            policy.validate("column policy")?;
        }
        for policy in &rows {
            policy.validate("row policy")?;
        }

        let tracks = solve_tracks(&columns, &rows, bounds.width, bounds.height, self.aspect)?;
        debug!(
            rows = self.rows,
            cols = self.cols,
            width = bounds.width,
            height = bounds.height,
            column_gap = tracks.column_gap,
            row_gap = tracks.row_gap,
            "solved grid tracks"
        );

        let xs = offsets(
            bounds.x + self.justify_content.leading(tracks.column_gap),
            &tracks.columns,
        );
        let mut cells = self.cells.clone();
        let mut top = bounds.top() - self.align_content.leading(tracks.row_gap);
        for (row, &height) in tracks.rows.iter().enumerate() {
            let y = top - height;
            for (col, &width) in tracks.columns.iter().enumerate() {
                if let Some(widget) = cells[row * self.cols + col].as_mut() {
                    widget.resolve(xs[col], y, width, height)?;
                }
            }
            top = y;
        }
        self.cells = cells;
        self.tracks = Some(tracks);
        Ok(())
    }

    /// Union of all resolved leaf rectangles.
    pub fn bbox(&self) -> Option<Bounds> {
        self.widgets()
            .filter(|widget| widget.is_leaf())
            .filter_map(Widget::bounds)
            .reduce(|acc, bounds| acc.union(&bounds))
    }

    /// All widgets, depth-first in row-major cell order.
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        let mut widgets = Vec::new();
        self.collect_widgets(&mut widgets);
        widgets.into_iter()
    }

    fn collect_widgets<'a>(&'a self, out: &mut Vec<&'a Widget>) {
        for widget in self.cells.iter().flatten() {
            out.push(widget);
            if let Some(grid) = widget.grid() {
                grid.collect_widgets(out);
            }
        }
    }

    /// First widget with the given name, depth-first.
    pub fn find(&self, name: &str) -> Option<&Widget> {
        self.widgets().find(|widget| widget.name() == Some(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Widget> {
        for widget in self.cells.iter_mut().flatten() {
            if widget.name() == Some(name) {
                return Some(widget);
            }
            if let Some(found) = widget.grid_mut().and_then(|grid| grid.find_mut(name)) {
                return Some(found);
            }
        }
        None
    }
}

/// Policy of a track without an explicit one.
fn derive_policy(cells: &[SizePolicy]) -> SizePolicy {
    let fixed = cells
        .iter()
        .filter_map(|policy| match policy {
            SizePolicy::Fixed(size) => Some(*size),
            _ => None,
        })
        .reduce(f64::max);
    if let Some(size) = fixed {
        return SizePolicy::Fixed(size);
    }
    let weight = cells
        .iter()
        .map(|policy| match policy {
            SizePolicy::Flexible(weight) => *weight,
            _ => 1.0,
        })
        .fold(0.0, f64::max);
    SizePolicy::Flexible(if weight > 0.0 { weight } else { 1.0 })
}

fn offsets(start: f64, sizes: &[f64]) -> Vec<f64> {
    let mut positions = Vec::with_capacity(sizes.len());
    let mut current = start;
    for &size in sizes {
        positions.push(current);
        current += size;
    }
    positions
}
