//! Axis descriptors.

use std::fmt;
use std::str::FromStr;

use plotframe_core::{ConfigError, ScaleError};

use crate::interval::{RangeMode, RangeOptions, ScalerConfig};

/// Linear or logarithmic axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AxisMode {
    #[default]
    Linear,
    Log,
}

impl fmt::Display for AxisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisMode::Linear => f.write_str("linear"),
            AxisMode::Log => f.write_str("log"),
        }
    }
}

impl FromStr for AxisMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(AxisMode::Linear),
            "log" => Ok(AxisMode::Log),
            _ => Err(ConfigError::UnknownOption {
                name: s.to_string(),
                expected: vec!["linear", "log"],
            }),
        }
    }
}

/// Presentation intent for one axis.
///
/// Immutable once built; construct through [`Axis::builder`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Axis {
    label: Option<String>,
    unit: Option<String>,
    mode: AxisMode,
    options: RangeOptions,
}

impl Axis {
    /// Start building an axis.
    pub fn builder() -> AxisBuilder {
        AxisBuilder::default()
    }

    /// A linear axis with a label and default settings.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn mode(&self) -> AxisMode {
        self.mode
    }

    pub fn snap(&self) -> bool {
        self.options.snap
    }

    pub fn min(&self) -> Option<f64> {
        self.options.min
    }

    pub fn max(&self) -> Option<f64> {
        self.options.max
    }

    pub fn scaler(&self) -> &ScalerConfig {
        &self.options.scaler
    }

    /// The options handed to the interval utilities.
    pub fn range_options(&self) -> &RangeOptions {
        &self.options
    }

    /// Axis title with an optional power-of-ten factor and unit.
    ///
    /// `Distance` with unit `m` and exponent 3 renders as `Distance [10^3 m]`.
    pub fn label_text(&self, exponent: i32) -> String {
        let mut parts = Vec::new();
        if exponent != 0 {
            parts.push(format!("10^{exponent}"));
        }
        if let Some(unit) = self.unit() {
            parts.push(unit.to_string());
        }
        match (self.label(), parts.is_empty()) {
            (Some(label), true) => label.to_string(),
            (Some(label), false) => format!("{label} [{}]", parts.join(" ")),
            (None, true) => String::new(),
            (None, false) => format!("[{}]", parts.join(" ")),
        }
    }

    /// First given lower and upper override over several descriptors.
    pub fn merged_overrides<'a, I>(axes: I) -> (Option<f64>, Option<f64>)
    where
        I: IntoIterator<Item = &'a Axis>,
    {
        axes.into_iter().fold((None, None), |(min, max), axis| {
            (min.or(axis.min()), max.or(axis.max()))
        })
    }

    fn name_for_errors(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| ScaleError::UNNAMED_AXIS.to_string())
    }
}

/// Builder for [`Axis`].
#[derive(Debug, Clone, Default)]
pub struct AxisBuilder {
    label: Option<String>,
    unit: Option<String>,
    mode: AxisMode,
    snap: bool,
    min: Option<f64>,
    max: Option<f64>,
    scaler: ScalerConfig,
}

impl AxisBuilder {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn mode(mut self, mode: AxisMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for a logarithmic axis.
    pub fn log(self) -> Self {
        self.mode(AxisMode::Log)
    }

    /// Round the bounds to multiples of the increment.
    pub fn snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    /// Lower bound override.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Upper bound override.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Both bound overrides.
    pub fn limits(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    pub fn range_mode(mut self, mode: RangeMode) -> Self {
        self.scaler.range_mode = mode;
        self
    }

    pub fn approx_ticks(mut self, approx_ticks: f64) -> Self {
        self.scaler.approx_ticks = approx_ticks;
        self
    }

    /// Explicit increment.
    pub fn inc(mut self, inc: f64) -> Self {
        self.scaler.inc = Some(inc);
        self
    }

    pub fn space(mut self, space: f64) -> Self {
        self.scaler.space = space;
        self
    }

    pub fn scaler(mut self, scaler: ScalerConfig) -> Self {
        self.scaler = scaler;
        self
    }

    /// Validate and build the axis.
    pub fn build(self) -> Result<Axis, ScaleError> {
        let axis = Axis {
            label: self.label,
            unit: self.unit,
            mode: self.mode,
            options: RangeOptions {
                log: self.mode == AxisMode::Log,
                snap: self.snap,
                min: self.min,
                max: self.max,
                scaler: self.scaler,
            },
        };
        let name = axis.name_for_errors();

        for (option, value) in [("min", axis.min()), ("max", axis.max())] {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(ConfigError::InvalidValue {
                        option: option.to_string(),
                        reason: format!("override on {name} axis must be finite, got {value}"),
                    }
                    .into());
                }
            }
        }
        if let (Some(min), Some(max)) = (axis.min(), axis.max()) {
            if min > max {
                return Err(ScaleError::OverrideConflict { axis: name, min, max });
            }
        }
        if axis.mode == AxisMode::Log
            && [axis.min(), axis.max()].iter().flatten().any(|v| *v <= 0.0)
        {
            return Err(ScaleError::InvalidLogRange {
                axis: name,
                min: axis.min().unwrap_or(f64::NAN),
                max: axis.max().unwrap_or(f64::NAN),
            });
        }
        axis.options.scaler.validate()?;
        Ok(axis)
    }
}
