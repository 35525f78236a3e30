//! Size policies for widgets and grid tracks.

use plotframe_core::ConfigError;

/// How a widget or track claims space along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SizePolicy {
    /// Exact size in points
    Fixed(f64),
    /// Share of the leftover space, proportional to the weight
    Flexible(f64),
    /// Locked to the other axis; the ratio is width / height
    Aspect(f64),
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self::Flexible(1.0)
    }
}

impl SizePolicy {
    pub fn is_fixed(&self) -> bool {
        matches!(self, SizePolicy::Fixed(_))
    }

    pub fn is_flexible(&self) -> bool {
        matches!(self, SizePolicy::Flexible(_))
    }

    pub fn is_aspect(&self) -> bool {
        matches!(self, SizePolicy::Aspect(_))
    }

    /// Check the policy's parameter.
    pub fn validate(&self, option: &str) -> Result<(), ConfigError> {
        let (ok, expected, value) = match *self {
            SizePolicy::Fixed(size) => (size.is_finite() && size >= 0.0, "non-negative size", size),
            SizePolicy::Flexible(weight) => (weight.is_finite() && weight > 0.0, "positive weight", weight),
            SizePolicy::Aspect(ratio) => (ratio.is_finite() && ratio > 0.0, "positive ratio", ratio),
        };
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                option: option.to_string(),
                reason: format!("expected a {expected}, got {value}"),
            })
        }
    }
}

/// Placement of unassigned space along a grid axis.
///
/// Start is the left edge for columns and the top edge for rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContentAlignment {
    /// Pack tracks at the start
    Start,
    /// Split the gap evenly
    #[default]
    Center,
    /// Pack tracks at the end
    End,
}

impl ContentAlignment {
    /// Portion of the gap placed before the first track.
    pub fn leading(self, gap: f64) -> f64 {
        match self {
            ContentAlignment::Start => 0.0,
            ContentAlignment::Center => gap / 2.0,
            ContentAlignment::End => gap,
        }
    }
}

/// Target width / height of one anchor cell of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AspectPolicy {
    pub ratio: f64,
    pub row: usize,
    pub col: usize,
}

impl AspectPolicy {
    pub fn new(ratio: f64, row: usize, col: usize) -> Self {
        Self { ratio, row, col }
    }
}
