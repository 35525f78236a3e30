//! Value types for page geometry.
//!
//! All geometry is expressed in PostScript points (1/72 inch) with the origin
//! at the bottom-left corner of the page.

/// One centimetre in points.
pub const CM: f64 = 72.0 / 2.54;

/// One inch in points.
pub const INCH: f64 = 72.0;

/// The golden ratio, used for default panel proportions.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// A physical length with unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn pt(value: f64) -> Self {
        Self { value, unit: LengthUnit::Pt }
    }

    pub fn mm(value: f64) -> Self {
        Self { value, unit: LengthUnit::Mm }
    }

    pub fn cm(value: f64) -> Self {
        Self { value, unit: LengthUnit::Cm }
    }

    pub fn inch(value: f64) -> Self {
        Self { value, unit: LengthUnit::In }
    }

    /// Convert to points.
    pub fn to_points(&self) -> f64 {
        match self.unit {
            LengthUnit::Pt => self.value,
            LengthUnit::Mm => self.value * CM / 10.0,
            LengthUnit::Cm => self.value * CM,
            LengthUnit::In => self.value * INCH,
        }
    }
}

/// Length units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LengthUnit {
    /// Points (1/72 inch)
    Pt,
    /// Millimeters
    Mm,
    /// Centimeters
    Cm,
    /// Inches
    In,
}

/// Axis-aligned rectangle in page points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Left edge
    pub x: f64,
    /// Bottom edge
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Bounds anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the top edge (y + height).
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Width over height; infinite for zero height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Compute union (bounding box) with another bounds.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.top().max(other.top());
        Bounds::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Shrink by the given margins.
    pub fn inset(&self, left: f64, right: f64, bottom: f64, top: f64) -> Bounds {
        Bounds::new(
            self.x + left,
            self.y + bottom,
            self.width - left - right,
            self.height - bottom - top,
        )
    }
}
