//! Track sizing for grid rows and columns.
//!
//! Fixed tracks take their size and flexible tracks share what is left by
//! weight. Aspect-locked columns are `ratio * b` wide and aspect-locked rows
//! are `a / ratio` high, where `a` is the anchor column's width and `b` the
//! anchor row's height. Both anchors are linear in the other:
//!
//! ```text
//! a = pa + qa * b
//! b = pb + qb * a
//! ```
//!
//! so the coupled case is a 2x2 linear system with an exact solution.

use plotframe_core::LayoutError;

use crate::policy::{AspectPolicy, SizePolicy};

/// Resolved track sizes of a grid, in points.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackSizes {
    /// Column widths, left to right
    pub columns: Vec<f64>,
    /// Row heights, top to bottom
    pub rows: Vec<f64>,
    /// Horizontal space assigned to no column
    pub column_gap: f64,
    /// Vertical space assigned to no row
    pub row_gap: f64,
}

impl TrackSizes {
    pub fn total_width(&self) -> f64 {
        track_sum(&self.columns) + self.column_gap
    }

    pub fn total_height(&self) -> f64 {
        track_sum(&self.rows) + self.row_gap
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    fn dimension(self) -> &'static str {
        match self {
            Direction::Horizontal => "width",
            Direction::Vertical => "height",
        }
    }

    /// Size of an aspect-locked track per unit of the other anchor.
    fn aspect_coefficient(self, ratio: f64) -> f64 {
        match self {
            Direction::Horizontal => ratio,
            Direction::Vertical => 1.0 / ratio,
        }
    }
}

/// Sums over the tracks of one axis.
struct Totals {
    direction: Direction,
    total: f64,
    fixed: f64,
    weight: f64,
    aspect: f64,
}

impl Totals {
    fn of(policies: &[SizePolicy], total: f64, direction: Direction) -> Self {
        let mut totals = Totals {
            direction,
            total,
            fixed: 0.0,
            weight: 0.0,
            aspect: 0.0,
        };
        for policy in policies {
            match *policy {
                SizePolicy::Fixed(size) => totals.fixed += size,
                SizePolicy::Flexible(weight) => totals.weight += weight,
                SizePolicy::Aspect(ratio) => totals.aspect += direction.aspect_coefficient(ratio),
            }
        }
        totals
    }

    fn tolerance(&self) -> f64 {
        1e-9 * self.total.abs().max(1.0)
    }

    fn infeasible(&self, requested: f64) -> LayoutError {
        LayoutError::LayoutInfeasible {
            dimension: self.direction.dimension(),
            requested,
            available: self.total,
        }
    }

    /// Anchor size as `p + q * other`.
    fn linear(&self, anchor: SizePolicy) -> (f64, f64) {
        match anchor {
            SizePolicy::Fixed(size) => (size, 0.0),
            SizePolicy::Flexible(weight) => (
                weight * (self.total - self.fixed) / self.weight,
                -weight * self.aspect / self.weight,
            ),
            SizePolicy::Aspect(ratio) => (0.0, self.direction.aspect_coefficient(ratio)),
        }
    }

    /// Sizes along this axis given the other axis's anchor size.
    fn sizes(
        &self,
        policies: &[SizePolicy],
        other: f64,
        flex_unit: Option<f64>,
    ) -> Result<(Vec<f64>, f64), LayoutError> {
        let tol = self.tolerance();
        let claimed = self.fixed + self.aspect * other;
        let unit = match flex_unit {
            Some(unit) => unit,
            None if self.weight > 0.0 => (self.total - claimed) / self.weight,
            None => 0.0,
        };
        if unit * self.weight < -tol {
            return Err(self.infeasible(claimed));
        }
        let unit = unit.max(0.0);

        let mut sizes: Vec<f64> = policies
            .iter()
            .map(|policy| match *policy {
                SizePolicy::Fixed(size) => size,
                SizePolicy::Flexible(weight) => weight * unit,
                SizePolicy::Aspect(ratio) => self.direction.aspect_coefficient(ratio) * other,
            })
            .collect();
        let used = track_sum(&sizes);
        if used > self.total + tol {
            return Err(self.infeasible(used));
        }
        let gap = settle(&mut sizes, policies, self.total);
        Ok((sizes, gap))
    }
}

fn track_sum(sizes: &[f64]) -> f64 {
    sizes.iter().sum()
}

/// Absorb rounding so that the tracks plus the returned gap sum to `total`
/// exactly. Overshoot is taken from the widest flexible track (or the widest
/// track when none is flexible).
fn settle(sizes: &mut [f64], policies: &[SizePolicy], total: f64) -> f64 {
    let widest = |flexible_only: bool| {
        sizes
            .iter()
            .zip(policies)
            .enumerate()
            .filter(|(_, (_, policy))| !flexible_only || policy.is_flexible())
            .max_by(|(_, (a, _)), (_, (b, _))| a.total_cmp(b))
            .map(|(index, _)| index)
    };
    if let Some(index) = widest(true).or_else(|| widest(false)) {
        for _ in 0..8 {
            let excess = track_sum(sizes) - total;
            if excess <= 0.0 {
                break;
            }
            let size = sizes[index];
            sizes[index] = (size - excess.max(ulp(size))).max(0.0);
        }
    }

    let used = track_sum(sizes);
    let mut gap = (total - used).max(0.0);
    for _ in 0..8 {
        let sum = used + gap;
        if sum < total {
            gap = next_up(gap);
        } else if sum > total && gap > 0.0 {
            gap = next_down(gap);
        } else {
            break;
        }
    }
    gap
}

// Neighbouring doubles of a non-negative finite value.
fn next_up(x: f64) -> f64 {
    if x == 0.0 {
        f64::from_bits(1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

fn next_down(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        f64::from_bits(x.to_bits() - 1)
    }
}

fn ulp(x: f64) -> f64 {
    next_up(x) - x
}

/// Default anchor: the first track that is not aspect-locked.
fn default_anchor(policies: &[SizePolicy]) -> usize {
    policies.iter().position(|p| !p.is_aspect()).unwrap_or(0)
}

fn close(x: f64, y: f64) -> bool {
    (x - y).abs() <= 1e-9 * x.abs().max(y.abs())
}

fn solve_linear(pa: f64, qa: f64, pb: f64, qb: f64) -> Result<(f64, f64), LayoutError> {
    let det = 1.0 - qa * qb;
    if det.abs() < 1e-12 {
        return Err(LayoutError::AspectConflict {
            reason: "aspect-locked tracks form a singular system".to_string(),
        });
    }
    let a = (pa + qa * pb) / det;
    Ok((a, pb + qb * a))
}

/// Compute column widths and row heights for a grid of the given size.
pub(crate) fn solve_tracks(
    columns: &[SizePolicy],
    rows: &[SizePolicy],
    width: f64,
    height: f64,
    aspect: Option<AspectPolicy>,
) -> Result<TrackSizes, LayoutError> {
    let horizontal = Totals::of(columns, width, Direction::Horizontal);
    let vertical = Totals::of(rows, height, Direction::Vertical);
    if horizontal.fixed > width + horizontal.tolerance() {
        return Err(horizontal.infeasible(horizontal.fixed));
    }
    if vertical.fixed > height + vertical.tolerance() {
        return Err(vertical.infeasible(vertical.fixed));
    }

    let coupled = aspect.is_some() || horizontal.aspect > 0.0 || vertical.aspect > 0.0;
    if !coupled {
        let (columns, column_gap) = horizontal.sizes(columns, 0.0, None)?;
        let (rows, row_gap) = vertical.sizes(rows, 0.0, None)?;
        return Ok(TrackSizes {
            columns,
            rows,
            column_gap,
            row_gap,
        });
    }

    let (anchor_row, anchor_col) = match aspect {
        Some(policy) => (policy.row, policy.col),
        None => (default_anchor(rows), default_anchor(columns)),
    };
    let (Some(&col_policy), Some(&row_policy)) = (columns.get(anchor_col), rows.get(anchor_row))
    else {
        return Err(LayoutError::CellOutOfBounds {
            row: anchor_row,
            col: anchor_col,
            rows: rows.len(),
            cols: columns.len(),
        });
    };
    if col_policy.is_aspect() && row_policy.is_aspect() {
        return Err(LayoutError::AspectConflict {
            reason: format!(
                "anchor row {anchor_row} and column {anchor_col} are both aspect-locked"
            ),
        });
    }
    let (pa, qa) = horizontal.linear(col_policy);
    let (pb, qb) = vertical.linear(row_policy);

    let Some(policy) = aspect else {
        let (a, b) = solve_linear(pa, qa, pb, qb)?;
        let (columns, column_gap) = horizontal.sizes(columns, b, None)?;
        let (rows, row_gap) = vertical.sizes(rows, a, None)?;
        return Ok(TrackSizes {
            columns,
            rows,
            column_gap,
            row_gap,
        });
    };

    let rho = policy.ratio;
    let conflict = |actual: f64| LayoutError::AspectConflict {
        reason: format!(
            "cell ({anchor_row}, {anchor_col}) is locked to aspect {actual} but the grid requires {rho}"
        ),
    };
    let (a, b) = match (col_policy, row_policy) {
        (SizePolicy::Aspect(ratio), _) | (_, SizePolicy::Aspect(ratio)) => {
            if !close(ratio, rho) {
                return Err(conflict(ratio));
            }
            solve_linear(pa, qa, pb, qb)?
        }
        (SizePolicy::Fixed(a), SizePolicy::Fixed(b)) => {
            if !close(a / b, rho) {
                return Err(conflict(a / b));
            }
            (a, b)
        }
        (SizePolicy::Fixed(a), SizePolicy::Flexible(_)) => (a, a / rho),
        (SizePolicy::Flexible(_), SizePolicy::Fixed(b)) => (rho * b, b),
        (SizePolicy::Flexible(_), SizePolicy::Flexible(_)) => {
            // both anchors may shrink; take the largest box that fits either axis
            let b = (pa / (rho - qa)).min(pb / (1.0 - qb * rho));
            (rho * b, b)
        }
    };

    let unit = |policy: SizePolicy, size: f64| match policy {
        SizePolicy::Flexible(weight) => Some(size / weight),
        _ => None,
    };
    let (columns, column_gap) = horizontal.sizes(columns, b, unit(col_policy, a))?;
    let (rows, row_gap) = vertical.sizes(rows, a, unit(row_policy, b))?;
    Ok(TrackSizes {
        columns,
        rows,
        column_gap,
        row_gap,
    })
}
