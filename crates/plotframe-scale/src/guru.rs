//! Shared autoscaling over several datasets.
//!
//! The guru pools every dataset's samples per axis, so all panels fed from
//! the same guru share one consistent set of ranges and increments.

use std::fmt;

use indexmap::IndexMap;
use plotframe_core::{ConfigError, ScaleError};
use smallvec::SmallVec;
use tracing::debug;

use crate::axis::{Axis, AxisMode};
use crate::interval::{finite_bounds, nice_range, percentile_bounds, tick_exponent, AxisRange};

/// Name of a data axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AxisName {
    X,
    Y,
    Z,
}

impl AxisName {
    pub fn as_str(self) -> &'static str {
        match self {
            AxisName::X => "x",
            AxisName::Y => "y",
            AxisName::Z => "z",
        }
    }
}

impl fmt::Display for AxisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns of one dataset, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct Dataset<'a> {
    x: &'a [f64],
    y: &'a [f64],
    z: Option<&'a [f64]>,
}

impl<'a> Dataset<'a> {
    /// A 2-D dataset.
    pub fn xy(x: &'a [f64], y: &'a [f64]) -> Result<Self, ScaleError> {
        check_len("y", x.len(), y.len())?;
        Ok(Self { x, y, z: None })
    }

    /// A 3-D dataset.
    pub fn xyz(x: &'a [f64], y: &'a [f64], z: &'a [f64]) -> Result<Self, ScaleError> {
        check_len("y", x.len(), y.len())?;
        check_len("z", x.len(), z.len())?;
        Ok(Self { x, y, z: Some(z) })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The column for an axis, if present.
    pub fn column(&self, axis: AxisName) -> Option<&'a [f64]> {
        match axis {
            AxisName::X => Some(self.x),
            AxisName::Y => Some(self.y),
            AxisName::Z => self.z,
        }
    }
}

fn check_len(column: &'static str, expected: usize, found: usize) -> Result<(), ScaleError> {
    if expected == found {
        Ok(())
    } else {
        Err(ScaleError::ColumnLengthMismatch {
            column,
            expected,
            found,
        })
    }
}

/// The axis descriptors for one figure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axes {
    pub x: Axis,
    pub y: Axis,
    pub z: Option<Axis>,
}

impl Axes {
    pub fn xy(x: Axis, y: Axis) -> Self {
        Self { x, y, z: None }
    }

    pub fn xyz(x: Axis, y: Axis, z: Axis) -> Self {
        Self { x, y, z: Some(z) }
    }

    pub fn get(&self, name: AxisName) -> Option<&Axis> {
        match name {
            AxisName::X => Some(&self.x),
            AxisName::Y => Some(&self.y),
            AxisName::Z => self.z.as_ref(),
        }
    }

    /// Present axes in x, y, z order.
    pub fn iter(&self) -> impl Iterator<Item = (AxisName, &Axis)> {
        let mut axes: SmallVec<[(AxisName, &Axis); 3]> = SmallVec::new();
        axes.push((AxisName::X, &self.x));
        axes.push((AxisName::Y, &self.y));
        if let Some(z) = &self.z {
            axes.push((AxisName::Z, z));
        }
        axes.into_iter()
    }
}

/// Options that couple axes or change how raw ranges are measured.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields, default))]
pub struct GuruConfig {
    /// Measure each axis over the central percentage of its samples
    pub percent_interval: Option<f64>,
    /// Widen the raw x or y range so that y-span / x-span equals this
    pub aspect: Option<f64>,
}

impl GuruConfig {
    pub fn with_percent_interval(mut self, percent: f64) -> Self {
        self.percent_interval = Some(percent);
        self
    }

    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = Some(aspect);
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(percent) = self.percent_interval {
            if !(percent > 0.0 && percent <= 100.0) {
                return Err(ConfigError::InvalidValue {
                    option: "percent_interval".to_string(),
                    reason: format!("must lie in (0, 100], got {percent}"),
                });
            }
        }
        if let Some(aspect) = self.aspect {
            if !(aspect.is_finite() && aspect > 0.0) {
                return Err(ConfigError::InvalidValue {
                    option: "aspect".to_string(),
                    reason: format!("must be positive, got {aspect}"),
                });
            }
        }
        Ok(())
    }
}

/// Plot region: the x/y bounds handed to a projection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl fmt::Display for Region {
    /// Slash-separated `xmin/xmax/ymin/ymax`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.xmin, self.xmax, self.ymin, self.ymax)
    }
}

/// Resolved ranges for every axis of a figure.
///
/// Serialize-only: the x and y entries always exist, which only
/// [`compute`] guarantees.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScaleParams {
    axes: IndexMap<AxisName, AxisRange>,
    region: Region,
}

impl ScaleParams {
    pub fn get(&self, axis: AxisName) -> Option<&AxisRange> {
        self.axes.get(&axis)
    }

    pub fn x(&self) -> &AxisRange {
        &self.axes[&AxisName::X]
    }

    pub fn y(&self) -> &AxisRange {
        &self.axes[&AxisName::Y]
    }

    pub fn z(&self) -> Option<&AxisRange> {
        self.axes.get(&AxisName::Z)
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Color-mapping range; present when a z axis was scaled.
    pub fn palette(&self) -> Option<&AxisRange> {
        self.z()
    }

    /// Ranges in x, y, z order.
    pub fn iter(&self) -> impl Iterator<Item = (AxisName, &AxisRange)> {
        self.axes.iter().map(|(name, range)| (*name, range))
    }
}

/// Compute scale parameters with default options.
pub fn compute(datasets: &[Dataset<'_>], axes: &Axes) -> Result<ScaleParams, ScaleError> {
    compute_with(datasets, axes, &GuruConfig::default())
}

/// Compute scale parameters.
pub fn compute_with(
    datasets: &[Dataset<'_>],
    axes: &Axes,
    config: &GuruConfig,
) -> Result<ScaleParams, ScaleError> {
    config.validate()?;
    let raw = raw_ranges(datasets, axes, config)?;
    resolve(&raw, axes)
}

fn raw_ranges(
    datasets: &[Dataset<'_>],
    axes: &Axes,
    config: &GuruConfig,
) -> Result<IndexMap<AxisName, (f64, f64)>, ScaleError> {
    let mut raw = IndexMap::new();
    for (name, _) in axes.iter() {
        let columns = datasets.iter().filter_map(|d| d.column(name));
        let bounds = match config.percent_interval {
            Some(percent) => {
                let pooled: Vec<f64> = columns.flatten().copied().collect();
                percentile_bounds(&pooled, percent)
            }
            None => finite_bounds(columns.flatten().copied()),
        };
        let (lo, hi) = bounds.ok_or_else(|| ScaleError::EmptyRange {
            axis: name.to_string(),
        })?;
        debug!(axis = %name, lo, hi, "pooled axis samples");
        raw.insert(name, (lo, hi));
    }

    if let Some(aspect) = config.aspect {
        if axes.x.mode() == AxisMode::Log || axes.y.mode() == AxisMode::Log {
            return Err(ConfigError::InvalidValue {
                option: "aspect".to_string(),
                reason: "data aspect requires linear x and y axes".to_string(),
            }
            .into());
        }
        let (x, y) = apply_aspect(raw[&AxisName::X], raw[&AxisName::Y], aspect);
        raw.insert(AxisName::X, x);
        raw.insert(AxisName::Y, y);
    }
    Ok(raw)
}

/// Widen the narrower range about its centre so that y-span / x-span == aspect.
fn apply_aspect(x: (f64, f64), y: (f64, f64), aspect: f64) -> ((f64, f64), (f64, f64)) {
    let xspan = x.1 - x.0;
    let yspan = y.1 - y.0;
    if xspan == 0.0 && yspan == 0.0 {
        return (x, y);
    }
    if yspan < xspan * aspect {
        let half = xspan * aspect / 2.0;
        let center = y.0 + yspan / 2.0;
        (x, (center - half, center + half))
    } else {
        let half = yspan / aspect / 2.0;
        let center = x.0 + xspan / 2.0;
        ((center - half, center + half), y)
    }
}

fn resolve(raw: &IndexMap<AxisName, (f64, f64)>, axes: &Axes) -> Result<ScaleParams, ScaleError> {
    let mut ranges = IndexMap::new();
    for (name, axis) in axes.iter() {
        let (lo, hi) = raw[&name];
        let range = nice_range(lo, hi, axis.range_options()).map_err(|e| e.on_axis(name.as_str()))?;
        debug!(
            axis = %name,
            min = range.min,
            max = range.max,
            inc = range.inc,
            log = range.is_log,
            "resolved axis range"
        );
        ranges.insert(name, range);
    }
    let region = Region {
        xmin: ranges[&AxisName::X].min,
        xmax: ranges[&AxisName::X].max,
        ymin: ranges[&AxisName::Y].min,
        ymax: ranges[&AxisName::Y].max,
    };
    Ok(ScaleParams { axes: ranges, region })
}

/// Scale parameters computed once and queried many times.
#[derive(Debug, Clone)]
pub struct ScaleGuru {
    axes: Axes,
    data_ranges: IndexMap<AxisName, (f64, f64)>,
    params: ScaleParams,
}

impl ScaleGuru {
    /// Scale `datasets` with default options.
    pub fn new(datasets: &[Dataset<'_>], axes: Axes) -> Result<Self, ScaleError> {
        Self::with_config(datasets, axes, &GuruConfig::default())
    }

    pub fn with_config(
        datasets: &[Dataset<'_>],
        axes: Axes,
        config: &GuruConfig,
    ) -> Result<Self, ScaleError> {
        config.validate()?;
        let data_ranges = raw_ranges(datasets, &axes, config)?;
        let params = resolve(&data_ranges, &axes)?;
        Ok(Self {
            axes,
            data_ranges,
            params,
        })
    }

    pub fn params(&self) -> &ScaleParams {
        &self.params
    }

    pub fn region(&self) -> Region {
        self.params.region()
    }

    pub fn palette(&self) -> Option<&AxisRange> {
        self.params.palette()
    }

    pub fn axis_range(&self, axis: AxisName) -> Option<&AxisRange> {
        self.params.get(axis)
    }

    /// Raw data range an axis was scaled from.
    pub fn data_range(&self, axis: AxisName) -> Option<(f64, f64)> {
        self.data_ranges.get(&axis).copied()
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// Power-of-ten factor for an axis's tick labels.
    pub fn label_exponent(&self, axis: AxisName) -> Option<i32> {
        let descriptor = self.axes.get(axis)?;
        let range = self.params.get(axis)?;
        if range.is_log {
            return Some(0);
        }
        Some(tick_exponent(range.inc, descriptor.scaler()))
    }

    /// Axis title including the label exponent and unit.
    pub fn label(&self, axis: AxisName) -> Option<String> {
        let exponent = self.label_exponent(axis)?;
        Some(self.axes.get(axis)?.label_text(exponent))
    }
}
