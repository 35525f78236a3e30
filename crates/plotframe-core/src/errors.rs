//! Error types for plotframe.

use thiserror::Error;

/// Top-level error type for plotframe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotframeError {
    #[error(transparent)]
    Scale(#[from] ScaleError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors in configuration values and option names.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Unknown option '{name}' (expected one of: {})", .expected.join(", "))]
    UnknownOption {
        name: String,
        expected: Vec<&'static str>,
    },

    #[error("Invalid value for '{option}': {reason}")]
    InvalidValue { option: String, reason: String },
}

/// Errors during axis range computation.
///
/// Variants carry the name of the axis they concern. The interval utilities
/// work without an axis and report under the name `range`; callers relabel
/// with [`ScaleError::on_axis`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    #[error("No finite samples on {axis} axis")]
    EmptyRange { axis: String },

    #[error("Log scale on {axis} axis requires positive bounds, got [{min}, {max}]")]
    InvalidLogRange { axis: String, min: f64, max: f64 },

    #[error("Conflicting overrides on {axis} axis: min {min} > max {max}")]
    OverrideConflict { axis: String, min: f64, max: f64 },

    #[error("Invalid span [{lo}, {hi}] on {axis} axis")]
    InvalidSpan { axis: String, lo: f64, hi: f64 },

    #[error("Column '{column}' has {found} samples, expected {expected}")]
    ColumnLengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ScaleError {
    /// Axis name used by errors that are raised outside any axis context.
    pub const UNNAMED_AXIS: &'static str = "range";

    /// Replace the axis name carried by this error.
    pub fn on_axis(self, name: impl Into<String>) -> Self {
        let name = name.into();
        match self {
            ScaleError::EmptyRange { .. } => ScaleError::EmptyRange { axis: name },
            ScaleError::InvalidLogRange { min, max, .. } => ScaleError::InvalidLogRange {
                axis: name,
                min,
                max,
            },
            ScaleError::OverrideConflict { min, max, .. } => ScaleError::OverrideConflict {
                axis: name,
                min,
                max,
            },
            ScaleError::InvalidSpan { lo, hi, .. } => ScaleError::InvalidSpan { axis: name, lo, hi },
            other => other,
        }
    }
}

/// Errors during layout solving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Layout infeasible: {dimension} needs {requested}pt but only {available}pt are available")]
    LayoutInfeasible {
        dimension: &'static str,
        requested: f64,
        available: f64,
    },

    #[error("Aspect conflict: {reason}")]
    AspectConflict { reason: String },

    #[error("Grid cell ({row}, {col}) has no widget assigned")]
    UnassignedCell { row: usize, col: usize },

    #[error("Grid cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
