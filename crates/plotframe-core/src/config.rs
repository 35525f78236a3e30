//! Page configuration.
//!
//! The page size is explicit configuration threaded through layout
//! construction. There is no process-wide default page.

use std::str::FromStr;

use crate::errors::ConfigError;
use crate::types::{Bounds, Length, CM};

/// Named paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
}

impl PaperSize {
    pub const NAMES: [&'static str; 4] = ["a3", "a4", "a5", "letter"];

    /// Portrait width and height in points.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (29.7 * CM, 42.0 * CM),
            PaperSize::A4 => (21.0 * CM, 29.7 * CM),
            PaperSize::A5 => (14.8 * CM, 21.0 * CM),
            PaperSize::Letter => (612.0, 792.0),
        }
    }
}

impl FromStr for PaperSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a3" => Ok(PaperSize::A3),
            "a4" => Ok(PaperSize::A4),
            "a5" => Ok(PaperSize::A5),
            "letter" => Ok(PaperSize::Letter),
            _ => Err(ConfigError::UnknownOption {
                name: s.to_string(),
                expected: PaperSize::NAMES.to_vec(),
            }),
        }
    }
}

/// Margins on all sides, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(2.0 * CM)
    }
}

impl Margins {
    /// Create uniform margins.
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            right: value,
            bottom: value,
            top: value,
        }
    }

    /// Create symmetric margins.
    pub fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            left: horizontal,
            right: horizontal,
            bottom: vertical,
            top: vertical,
        }
    }

    /// Total horizontal margin.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical margin.
    pub fn vertical(&self) -> f64 {
        self.bottom + self.top
    }
}

/// Page geometry for one figure.
///
/// Defaults to A4 portrait with 2 cm margins.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields, default))]
pub struct PageConfig {
    /// Page width in points
    pub width: f64,
    /// Page height in points
    pub height: f64,
    pub margins: Margins,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::paper(PaperSize::A4)
    }
}

impl PageConfig {
    /// Portrait page of a named paper size with default margins.
    pub fn paper(size: PaperSize) -> Self {
        let (width, height) = size.dimensions();
        Self {
            width,
            height,
            margins: Margins::default(),
        }
    }

    /// Page of explicit physical size with default margins.
    pub fn new(width: Length, height: Length) -> Self {
        Self {
            width: width.to_points(),
            height: height.to_points(),
            margins: Margins::default(),
        }
    }

    /// Swap width and height.
    pub fn landscape(mut self) -> Self {
        if self.width < self.height {
            std::mem::swap(&mut self.width, &mut self.height);
        }
        self
    }

    /// Set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Page size in points.
    pub fn size_points(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// The whole page.
    pub fn page_bounds(&self) -> Bounds {
        Bounds::from_size(self.width, self.height)
    }

    /// The page area inside the margins.
    pub fn content_bounds(&self) -> Bounds {
        self.page_bounds().inset(
            self.margins.left,
            self.margins.right,
            self.margins.bottom,
            self.margins.top,
        )
    }

    /// Check that sizes are finite, positive, and the margins fit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (option, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    option: option.to_string(),
                    reason: format!("page {option} must be positive and finite, got {value}"),
                });
            }
        }
        let m = &self.margins;
        if [m.left, m.right, m.bottom, m.top]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ConfigError::InvalidValue {
                option: "margins".to_string(),
                reason: "margins must be non-negative and finite".to_string(),
            });
        }
        if m.horizontal() >= self.width || m.vertical() >= self.height {
            return Err(ConfigError::InvalidValue {
                option: "margins".to_string(),
                reason: format!(
                    "margins {}x{} leave no room on a {}x{} page",
                    m.horizontal(),
                    m.vertical(),
                    self.width,
                    self.height
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_a4() {
        let page = PageConfig::default();
        assert!((page.width - 595.275_590_551).abs() < 1e-6);
        assert!((page.height - 841.889_763_779).abs() < 1e-6);
        assert!(page.validate().is_ok());
    }

    #[test]
    fn test_content_bounds() {
        let page = PageConfig::new(Length::pt(200.0), Length::pt(100.0))
            .with_margins(Margins::symmetric(10.0, 5.0));
        assert_eq!(page.content_bounds(), Bounds::new(10.0, 5.0, 180.0, 90.0));
    }

    #[test]
    fn test_landscape() {
        let page = PageConfig::paper(PaperSize::Letter).landscape();
        assert_eq!(page.size_points(), (792.0, 612.0));
    }

    #[test]
    fn test_paper_from_str() {
        assert_eq!("A4".parse::<PaperSize>().unwrap(), PaperSize::A4);
        let err = "a4+".parse::<PaperSize>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { ref name, .. } if name == "a4+"));
    }

    #[test]
    fn test_validate_rejects_oversized_margins() {
        let page = PageConfig::new(Length::pt(30.0), Length::pt(30.0))
            .with_margins(Margins::uniform(20.0));
        assert!(matches!(
            page.validate(),
            Err(ConfigError::InvalidValue { ref option, .. }) if option == "margins"
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let ok: PageConfig = serde_json::from_str(r#"{"width": 100.0, "height": 50.0}"#).unwrap();
        assert_eq!(ok.size_points(), (100.0, 50.0));
        assert_eq!(ok.margins, Margins::default());

        let err = serde_json::from_str::<PageConfig>(r#"{"width": 100.0, "paper_color": "white"}"#);
        assert!(err.is_err());
    }
}
