//! Layout nodes.

use plotframe_core::{Bounds, LayoutError};

use crate::grid::GridLayout;
use crate::policy::SizePolicy;

/// A rectangle-claiming node: a plot panel, color bar, spacer or nested grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Widget {
    name: Option<String>,
    horizontal: SizePolicy,
    vertical: SizePolicy,
    content: Option<Box<GridLayout>>,
    bounds: Option<Bounds>,
}

impl Widget {
    /// Create a widget with explicit policies.
    pub fn new(horizontal: SizePolicy, vertical: SizePolicy) -> Self {
        Self {
            horizontal,
            vertical,
            ..Default::default()
        }
    }

    /// Takes whatever its cell offers.
    pub fn flexible() -> Self {
        Self::default()
    }

    /// Exact size in points.
    pub fn fixed(width: f64, height: f64) -> Self {
        Self::new(SizePolicy::Fixed(width), SizePolicy::Fixed(height))
    }

    /// Largest box of the given width / height ratio that fits its cell.
    pub fn aspect(ratio: f64) -> Self {
        Self::new(SizePolicy::Aspect(ratio), SizePolicy::Flexible(1.0))
    }

    /// A flexible widget whose box is laid out by a nested grid.
    pub fn with_grid(grid: GridLayout) -> Self {
        Self {
            content: Some(Box::new(grid)),
            ..Default::default()
        }
    }

    /// Set the name used by [`GridLayout::find`].
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_horizontal(mut self, policy: SizePolicy) -> Self {
        self.horizontal = policy;
        self
    }

    pub fn with_vertical(mut self, policy: SizePolicy) -> Self {
        self.vertical = policy;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn horizontal(&self) -> SizePolicy {
        self.horizontal
    }

    pub fn vertical(&self) -> SizePolicy {
        self.vertical
    }

    pub fn grid(&self) -> Option<&GridLayout> {
        self.content.as_deref()
    }

    pub fn grid_mut(&mut self) -> Option<&mut GridLayout> {
        self.content.as_deref_mut()
    }

    /// Resolved rectangle; `None` until the enclosing layout was solved.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Check if this widget has no nested grid.
    pub fn is_leaf(&self) -> bool {
        self.content.is_none()
    }

    /// Fit the widget into the cell at (`x`, `y`) of the given size.
    ///
    /// The resolved box is centred in the cell. Nested grid content is solved
    /// inside the box before returning.
    pub fn resolve(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<Bounds, LayoutError> {
        self.horizontal.validate("horizontal policy")?;
        self.vertical.validate("vertical policy")?;

        let (w, h) = self.box_size(width, height)?;
        let bounds = Bounds::new(x + (width - w) / 2.0, y + (height - h) / 2.0, w, h);
        tracing::trace!(name = self.name(), ?bounds, "resolved widget");

        if let Some(grid) = self.content.as_deref_mut() {
            grid.solve_at(bounds)?;
        }
        self.bounds = Some(bounds);
        Ok(bounds)
    }

    fn box_size(&self, width: f64, height: f64) -> Result<(f64, f64), LayoutError> {
        match (self.horizontal, self.vertical) {
            (SizePolicy::Aspect(rx), SizePolicy::Aspect(ry)) => {
                if (rx - ry).abs() > 1e-9 * rx.max(ry) {
                    return Err(LayoutError::AspectConflict {
                        reason: format!(
                            "{} locks width / height to {rx} and {ry} at once",
                            self.describe()
                        ),
                    });
                }
                let w = width.min(height * rx);
                Ok((w, w / rx))
            }
            (SizePolicy::Aspect(ratio), vertical) => {
                let h = claim(vertical, height, "height")?;
                let w = h * ratio;
                if w <= width + tolerance(width) {
                    Ok((w, h))
                } else if vertical.is_flexible() {
                    Ok((width, width / ratio))
                } else {
                    Err(infeasible("width", w, width))
                }
            }
            (horizontal, SizePolicy::Aspect(ratio)) => {
                let w = claim(horizontal, width, "width")?;
                let h = w / ratio;
                if h <= height + tolerance(height) {
                    Ok((w, h))
                } else if horizontal.is_flexible() {
                    Ok((height * ratio, height))
                } else {
                    Err(infeasible("height", h, height))
                }
            }
            (horizontal, vertical) => Ok((
                claim(horizontal, width, "width")?,
                claim(vertical, height, "height")?,
            )),
        }
    }

    fn describe(&self) -> String {
        match self.name() {
            Some(name) => format!("widget '{name}'"),
            None => "widget".to_string(),
        }
    }
}

impl From<GridLayout> for Widget {
    fn from(grid: GridLayout) -> Self {
        Widget::with_grid(grid)
    }
}

fn tolerance(available: f64) -> f64 {
    1e-9 * available.abs().max(1.0)
}

fn infeasible(dimension: &'static str, requested: f64, available: f64) -> LayoutError {
    LayoutError::LayoutInfeasible {
        dimension,
        requested,
        available,
    }
}

/// Size taken along one non-aspect axis.
fn claim(policy: SizePolicy, available: f64, dimension: &'static str) -> Result<f64, LayoutError> {
    match policy {
        SizePolicy::Fixed(size) if size > available + tolerance(available) => {
            Err(infeasible(dimension, size, available))
        }
        SizePolicy::Fixed(size) => Ok(size),
        SizePolicy::Flexible(_) | SizePolicy::Aspect(_) => Ok(available),
    }
}
