//! Nice-number range and increment computation.
//!
//! Given a data span `[lo, hi]` these functions produce a rounded range that
//! contains the data together with a round tick increment. Linear axes use
//! increments from the family 1, 2, 5 × 10^k; log axes use a whole number of
//! decades drawn from the same family.

use std::fmt;
use std::str::FromStr;

use plotframe_core::{ConfigError, ScaleError};

/// Upper bound on the number of ticks [`AxisRange::ticks`] enumerates.
const MAX_TICKS: usize = 10_000;

/// How the data span is widened before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeMode {
    /// Pick one of the other modes from the data.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "auto"))]
    Auto,
    /// Use the data minimum and maximum.
    #[cfg_attr(feature = "serde", serde(rename = "min-max"))]
    MinMax,
    /// Start the range at zero.
    #[cfg_attr(feature = "serde", serde(rename = "0-max"))]
    ZeroMax,
    /// End the range at zero.
    #[cfg_attr(feature = "serde", serde(rename = "min-0"))]
    MinZero,
    /// Symmetric about zero.
    #[cfg_attr(feature = "serde", serde(rename = "symmetric"))]
    Symmetric,
    /// Keep the data range as is: no padding, no snapping.
    #[cfg_attr(feature = "serde", serde(rename = "off"))]
    Off,
}

impl RangeMode {
    pub const NAMES: [&'static str; 6] = ["auto", "min-max", "0-max", "min-0", "symmetric", "off"];

    /// Choose a concrete mode for a data range.
    pub fn guess(lo: f64, hi: f64) -> RangeMode {
        let mut mode = RangeMode::MinMax;
        if lo >= 0.0 && lo < hi / 2.0 {
            mode = RangeMode::ZeroMax;
        }
        if hi <= 0.0 && hi > lo / 2.0 {
            mode = RangeMode::MinZero;
        }
        if lo < 0.0 && hi > 0.0 {
            let asymmetry = ((hi.abs() - lo.abs()) / (hi.abs() + lo.abs())).abs();
            mode = if asymmetry < 0.5 {
                RangeMode::Symmetric
            } else {
                RangeMode::MinMax
            };
        }
        mode
    }

    fn name(self) -> &'static str {
        match self {
            RangeMode::Auto => "auto",
            RangeMode::MinMax => "min-max",
            RangeMode::ZeroMax => "0-max",
            RangeMode::MinZero => "min-0",
            RangeMode::Symmetric => "symmetric",
            RangeMode::Off => "off",
        }
    }
}

impl fmt::Display for RangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RangeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(RangeMode::Auto),
            "min-max" => Ok(RangeMode::MinMax),
            "0-max" => Ok(RangeMode::ZeroMax),
            "min-0" => Ok(RangeMode::MinZero),
            "symmetric" => Ok(RangeMode::Symmetric),
            "off" => Ok(RangeMode::Off),
            _ => Err(ConfigError::UnknownOption {
                name: s.to_string(),
                expected: RangeMode::NAMES.to_vec(),
            }),
        }
    }
}

/// Tuning knobs for nice-range computation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields, default))]
pub struct ScalerConfig {
    /// Approximate number of ticks across the range
    pub approx_ticks: f64,
    /// How the data span is widened
    pub range_mode: RangeMode,
    /// Explicit increment (decades for log axes)
    pub inc: Option<f64>,
    /// Fraction of the span added on each side
    pub space: f64,
    /// Label exponents are multiples of this
    pub exp_factor: i32,
    /// Decimal exponents inside this interval get no label exponent
    pub no_exp_interval: (i32, i32),
    /// Relative tolerance for grid comparisons
    pub tolerance: f64,
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            approx_ticks: 7.0,
            range_mode: RangeMode::Auto,
            inc: None,
            space: 0.0,
            exp_factor: 3,
            no_exp_interval: (-3, 5),
            tolerance: 1e-9,
        }
    }
}

impl ScalerConfig {
    pub const OPTIONS: [&'static str; 6] = [
        "approx_ticks",
        "mode",
        "inc",
        "space",
        "exp_factor",
        "tolerance",
    ];

    /// Set the approximate tick count.
    pub fn with_approx_ticks(mut self, approx_ticks: f64) -> Self {
        self.approx_ticks = approx_ticks;
        self
    }

    /// Set the range mode.
    pub fn with_range_mode(mut self, mode: RangeMode) -> Self {
        self.range_mode = mode;
        self
    }

    /// Set an explicit increment.
    pub fn with_inc(mut self, inc: f64) -> Self {
        self.inc = Some(inc);
        self
    }

    /// Set the fractional padding.
    pub fn with_space(mut self, space: f64) -> Self {
        self.space = space;
        self
    }

    /// Set one option from its textual name and value.
    ///
    /// Unknown option names and unparsable values are rejected.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let number = || {
            value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                option: name.to_string(),
                reason: format!("expected a number, got '{value}'"),
            })
        };
        match name {
            "approx_ticks" => self.approx_ticks = number()?,
            "mode" => self.range_mode = value.trim().parse()?,
            "inc" => self.inc = Some(number()?),
            "space" => self.space = number()?,
            "exp_factor" => {
                self.exp_factor = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    option: name.to_string(),
                    reason: format!("expected an integer, got '{value}'"),
                })?
            }
            "tolerance" => self.tolerance = number()?,
            _ => {
                return Err(ConfigError::UnknownOption {
                    name: name.to_string(),
                    expected: Self::OPTIONS.to_vec(),
                })
            }
        }
        self.validate()
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |option: &str, reason: String| ConfigError::InvalidValue {
            option: option.to_string(),
            reason,
        };
        if !(self.approx_ticks.is_finite() && self.approx_ticks > 0.0) {
            return Err(invalid(
                "approx_ticks",
                format!("must be positive, got {}", self.approx_ticks),
            ));
        }
        if let Some(inc) = self.inc {
            if !(inc.is_finite() && inc > 0.0) {
                return Err(invalid("inc", format!("must be positive, got {inc}")));
            }
        }
        if !(self.space.is_finite() && self.space >= 0.0) {
            return Err(invalid("space", format!("must be non-negative, got {}", self.space)));
        }
        if self.exp_factor < 1 {
            return Err(invalid(
                "exp_factor",
                format!("must be at least 1, got {}", self.exp_factor),
            ));
        }
        if self.no_exp_interval.0 > self.no_exp_interval.1 {
            return Err(invalid("no_exp_interval", "lower end above upper end".to_string()));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(invalid(
                "tolerance",
                format!("must lie in (0, 1), got {}", self.tolerance),
            ));
        }
        Ok(())
    }
}

/// Everything needed to turn a data span into a nice range.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields, default))]
pub struct RangeOptions {
    /// Logarithmic axis
    pub log: bool,
    /// Round both bounds to multiples of the increment
    pub snap: bool,
    /// Lower bound override, used verbatim
    pub min: Option<f64>,
    /// Upper bound override, used verbatim
    pub max: Option<f64>,
    pub scaler: ScalerConfig,
}

/// A resolved axis range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    /// Tick increment; in decades for log axes
    pub inc: f64,
    pub is_log: bool,
}

impl AxisRange {
    /// Distance between the bounds.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check if a value lies within the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Tick positions on the increment grid inside the range.
    pub fn ticks(&self) -> Vec<f64> {
        let (lo, hi) = if self.is_log {
            (self.min.log10(), self.max.log10())
        } else {
            (self.min, self.max)
        };
        let slack = 1e-9;
        let first = (lo / self.inc - slack).ceil();
        let mut ticks = Vec::new();
        let mut k = first;
        while k * self.inc <= hi + slack * self.inc && ticks.len() < MAX_TICKS {
            let value = k * self.inc;
            ticks.push(if self.is_log { 10f64.powf(value) } else { value });
            k += 1.0;
        }
        ticks
    }
}

/// Round a value to the nearest of 1, 2, 5 × 10^k (nearest on a log scale).
///
/// Zero and non-finite inputs come back unchanged; the sign is preserved.
pub fn nice_value(x: f64) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let magnitude = x.abs();
    let exp = magnitude.log10().floor();
    let base = 10f64.powf(exp);
    let normalized = magnitude / base;
    let nice = if normalized < std::f64::consts::SQRT_2 {
        1.0
    } else if normalized < 10f64.sqrt() {
        2.0
    } else if normalized < 50f64.sqrt() {
        5.0
    } else {
        10.0
    };
    (nice * base).copysign(x)
}

/// One unit of the value's decimal order of magnitude; 1 for zero.
pub fn magnitude_unit(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        1.0
    } else {
        10f64.powf(value.abs().log10().floor())
    }
}

/// Exponent to factor out of tick labels for an increment.
///
/// Returns 0 inside the `no_exp_interval`, otherwise the decimal exponent
/// rounded down to a multiple of `exp_factor`.
pub fn tick_exponent(value: f64, config: &ScalerConfig) -> i32 {
    let x = value.abs();
    if x == 0.0 || !x.is_finite() {
        return 0;
    }
    let (lo, hi) = config.no_exp_interval;
    if x >= 10f64.powi(lo) && x <= 10f64.powi(hi) {
        return 0;
    }
    let factor = config.exp_factor.max(1);
    let exp = x.log10().floor() as i32;
    exp.div_euclid(factor) * factor
}

/// Minimum and maximum of the finite values, if any.
pub fn finite_bounds<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Bounds of the central `percent` of the finite values.
///
/// Quantiles interpolate linearly between order statistics. `percent` must
/// lie in (0, 100].
pub fn percentile_bounds(values: &[f64], percent: f64) -> Option<(f64, f64)> {
    if !(percent > 0.0 && percent <= 100.0) {
        return None;
    }
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    finite.sort_by(f64::total_cmp);
    let tail = (100.0 - percent) / 2.0;
    Some((quantile(&finite, tail), quantile(&finite, 100.0 - tail)))
}

fn quantile(sorted: &[f64], percent: f64) -> f64 {
    let position = percent / 100.0 * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let frac = position - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * frac
}

/// Compute a nice range containing `[lo, hi]`.
///
/// Overrides in `options` replace the corresponding bound verbatim; the
/// other bound is still derived from the data. Degenerate spans are padded
/// symmetrically instead of failing.
pub fn nice_range(lo: f64, hi: f64, options: &RangeOptions) -> Result<AxisRange, ScaleError> {
    if !lo.is_finite() || !hi.is_finite() || hi < lo {
        return Err(ScaleError::InvalidSpan {
            axis: ScaleError::UNNAMED_AXIS.to_string(),
            lo,
            hi,
        });
    }
    if let (Some(min), Some(max)) = (options.min, options.max) {
        if min > max {
            return Err(ScaleError::OverrideConflict {
                axis: ScaleError::UNNAMED_AXIS.to_string(),
                min,
                max,
            });
        }
    }
    options.scaler.validate()?;

    if options.log {
        log_range(lo, hi, options)
    } else {
        Ok(linear_range(lo, hi, options))
    }
}

fn linear_range(lo: f64, hi: f64, options: &RangeOptions) -> AxisRange {
    let config = &options.scaler;
    let mode = match config.range_mode {
        RangeMode::Auto => RangeMode::guess(lo, hi),
        mode => mode,
    };

    let (mut mi, mut ma) = match mode {
        RangeMode::Auto | RangeMode::MinMax | RangeMode::Off => (lo, hi),
        RangeMode::ZeroMax => (lo.min(0.0), if hi > 0.0 { hi } else { 1.0 }),
        RangeMode::MinZero => (if lo < 0.0 { lo } else { -1.0 }, hi.max(0.0)),
        RangeMode::Symmetric => {
            let m = lo.abs().max(hi.abs());
            (-m, m)
        }
    };

    if mode != RangeMode::Off && config.space > 0.0 {
        let pad = config.space * (ma - mi);
        if mi != 0.0 || mode == RangeMode::MinMax {
            mi -= pad;
        }
        if ma != 0.0 || mode == RangeMode::MinMax {
            ma += pad;
        }
    }

    if is_degenerate(mi, ma) {
        let center = mi + (ma - mi) / 2.0;
        let pad = magnitude_unit(center);
        mi = center - pad;
        ma = center + pad;
    }

    let (mi, ma) = apply_overrides(mi, ma, options.min, options.max, magnitude_unit);

    let inc = config
        .inc
        .unwrap_or_else(|| increment_for(ma - mi, config, magnitude_unit(mi.abs().max(ma.abs()))));

    let snap = options.snap && mode != RangeMode::Off;
    let tol = config.tolerance;
    let min = if snap && options.min.is_none() {
        snap_down(mi, inc, tol)
    } else {
        mi
    };
    let max = if snap && options.max.is_none() {
        snap_up(ma, inc, tol)
    } else {
        ma
    };

    AxisRange {
        min,
        max,
        inc,
        is_log: false,
    }
}

fn log_range(lo: f64, hi: f64, options: &RangeOptions) -> Result<AxisRange, ScaleError> {
    let positive = |v: Option<f64>| v.map_or(true, |v| v > 0.0);
    if lo <= 0.0 || !positive(options.min) || !positive(options.max) {
        return Err(ScaleError::InvalidLogRange {
            axis: ScaleError::UNNAMED_AXIS.to_string(),
            min: options.min.unwrap_or(lo),
            max: options.max.unwrap_or(hi),
        });
    }
    let config = &options.scaler;

    let (mut lmi, mut lma) = (lo.log10(), hi.log10());
    if config.space > 0.0 {
        let pad = config.space * (lma - lmi);
        lmi -= pad;
        lma += pad;
    }
    if is_degenerate(lmi, lma) {
        let center = lmi + (lma - lmi) / 2.0;
        lmi = center - 1.0;
        lma = center + 1.0;
    }

    let (lmi, lma) = apply_overrides(
        lmi,
        lma,
        options.min.map(f64::log10),
        options.max.map(f64::log10),
        |_| 1.0,
    );

    let inc = config
        .inc
        .unwrap_or_else(|| increment_for(lma - lmi, config, 1.0).max(1.0));

    let tol = config.tolerance;
    let min = match options.min {
        Some(min) => min,
        None if options.snap => 10f64.powf(snap_down(lmi, inc, tol)),
        None => 10f64.powf(lmi),
    };
    let max = match options.max {
        Some(max) => max,
        None if options.snap => 10f64.powf(snap_up(lma, inc, tol)),
        None => 10f64.powf(lma),
    };

    // Keep the raw data bounds exact when nothing moved them.
    let (raw_min, raw_max) = (options.min.unwrap_or(lo), options.max.unwrap_or(hi));
    let untouched = config.space == 0.0 && !options.snap && lo != hi && raw_min < raw_max;
    let (min, max) = if untouched { (raw_min, raw_max) } else { (min, max) };

    Ok(AxisRange {
        min,
        max,
        inc,
        is_log: true,
    })
}

/// A span too small to carry an increment at the magnitude of its bounds.
fn is_degenerate(lo: f64, hi: f64) -> bool {
    let scale = lo.abs().max(hi.abs());
    hi - lo <= scale * f64::EPSILON * 16.0
}

/// Replace bounds with overrides, keeping the result ordered.
fn apply_overrides(
    lo: f64,
    hi: f64,
    min: Option<f64>,
    max: Option<f64>,
    unit: impl Fn(f64) -> f64,
) -> (f64, f64) {
    let mut lo = min.unwrap_or(lo);
    let mut hi = max.unwrap_or(hi);
    if lo >= hi {
        match (min, max) {
            (Some(_), None) => hi = lo + unit(lo),
            (None, Some(_)) => lo = hi - unit(hi),
            _ => {}
        }
    }
    (lo, hi)
}

fn increment_for(span: f64, config: &ScalerConfig, fallback: f64) -> f64 {
    let inc = nice_value(span / config.approx_ticks);
    if inc > 0.0 && inc.is_finite() {
        inc
    } else {
        fallback
    }
}

/// Largest multiple of `inc` not above `value` (within tolerance).
fn snap_down(value: f64, inc: f64, tol: f64) -> f64 {
    let q = value / inc;
    let nearest = q.round();
    let k = if (q - nearest).abs() <= tol { nearest } else { q.floor() };
    let snapped = k * inc;
    if snapped - value > tol * inc {
        (k - 1.0) * inc
    } else {
        snapped
    }
}

/// Smallest multiple of `inc` not below `value` (within tolerance).
fn snap_up(value: f64, inc: f64, tol: f64) -> f64 {
    let q = value / inc;
    let nearest = q.round();
    let k = if (q - nearest).abs() <= tol { nearest } else { q.ceil() };
    let snapped = k * inc;
    if value - snapped > tol * inc {
        (k + 1.0) * inc
    } else {
        snapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(snap: bool) -> RangeOptions {
        RangeOptions {
            snap,
            ..Default::default()
        }
    }

    fn is_multiple(value: f64, inc: f64) -> bool {
        let q = value / inc;
        (q - q.round()).abs() < 1e-9
    }

    #[test]
    fn test_nice_value_family() {
        assert_eq!(nice_value(1.2), 1.0);
        assert_eq!(nice_value(1.5), 2.0);
        assert_eq!(nice_value(3.0), 2.0);
        assert_eq!(nice_value(4.0), 5.0);
        assert_eq!(nice_value(8.0), 10.0);
        assert!((nice_value(0.0031) - 0.002).abs() < 1e-15);
        assert!((nice_value(-420.0) + 500.0).abs() < 1e-12);
        assert_eq!(nice_value(0.0), 0.0);
    }

    #[test]
    fn test_guess_mode() {
        assert_eq!(RangeMode::guess(0.0, 10.0), RangeMode::ZeroMax);
        assert_eq!(RangeMode::guess(8.0, 10.0), RangeMode::MinMax);
        assert_eq!(RangeMode::guess(-10.0, -1.0), RangeMode::MinZero);
        assert_eq!(RangeMode::guess(-10.0, -8.0), RangeMode::MinMax);
        assert_eq!(RangeMode::guess(-3.0, 4.0), RangeMode::Symmetric);
        assert_eq!(RangeMode::guess(-1.0, 10.0), RangeMode::MinMax);
    }

    #[test]
    fn test_range_mode_from_str() {
        assert_eq!("0-max".parse::<RangeMode>().unwrap(), RangeMode::ZeroMax);
        assert_eq!(RangeMode::Symmetric.to_string(), "symmetric");
        assert!(matches!(
            "tight".parse::<RangeMode>(),
            Err(ConfigError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_snapped_range_contains_data() {
        let range = nice_range(0.3, 9.7, &linear(true)).unwrap();
        assert_eq!(range.inc, 1.0);
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 10.0);
    }

    #[test]
    fn test_unsnapped_range_is_tight() {
        let range = nice_range(6.5, 9.7, &linear(false)).unwrap();
        assert_eq!((range.min, range.max), (6.5, 9.7));
        assert!((range.inc - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_negative_only_range() {
        let range = nice_range(-9.0, -7.5, &linear(true)).unwrap();
        assert!(range.min <= -9.0 && range.max >= -7.5);
        assert!(is_multiple(range.min, range.inc));
        assert!(is_multiple(range.max, range.inc));
        assert!(range.max <= 0.0);
    }

    #[test]
    fn test_range_straddling_zero_is_symmetric() {
        let range = nice_range(-3.0, 4.0, &linear(true)).unwrap();
        assert_eq!(range.min, -range.max);
        assert!(range.min <= -3.0 && range.max >= 4.0);
    }

    #[test]
    fn test_zero_max_mode_starts_at_zero() {
        let range = nice_range(1.0, 10.0, &linear(true)).unwrap();
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 10.0);
    }

    #[test]
    fn test_degenerate_span_is_padded() {
        let range = nice_range(5.0, 5.0, &linear(false)).unwrap();
        assert_eq!((range.min, range.max), (4.0, 6.0));
        assert!(range.inc > 0.0);

        let zero = nice_range(0.0, 0.0, &linear(false)).unwrap();
        assert_eq!((zero.min, zero.max), (-1.0, 1.0));
    }

    #[test]
    fn test_epsilon_span_is_padded() {
        let lo = 1.0;
        let hi = 1.0 + f64::EPSILON;
        let range = nice_range(lo, hi, &linear(true)).unwrap();
        assert!(range.inc > 1e-3);
        assert!(range.min <= lo && range.max >= hi);
        assert!(range.span() > 0.0);
    }

    #[test]
    fn test_tiny_values_keep_their_magnitude() {
        let range = nice_range(3e-12, 3e-12, &linear(false)).unwrap();
        assert!((range.min - 2e-12).abs() < 1e-24);
        assert!((range.max - 4e-12).abs() < 1e-24);
    }

    #[test]
    fn test_invalid_spans() {
        assert!(matches!(
            nice_range(2.0, 1.0, &linear(false)),
            Err(ScaleError::InvalidSpan { .. })
        ));
        assert!(matches!(
            nice_range(f64::NAN, 1.0, &linear(false)),
            Err(ScaleError::InvalidSpan { .. })
        ));
        assert!(matches!(
            nice_range(0.0, f64::INFINITY, &linear(false)),
            Err(ScaleError::InvalidSpan { .. })
        ));
    }

    #[test]
    fn test_overrides_are_verbatim() {
        let options = RangeOptions {
            snap: true,
            min: Some(2.5),
            max: Some(3.3),
            ..Default::default()
        };
        let range = nice_range(0.0, 100.0, &options).unwrap();
        assert_eq!((range.min, range.max), (2.5, 3.3));
    }

    #[test]
    fn test_single_override_keeps_other_bound_from_data() {
        let options = RangeOptions {
            snap: true,
            min: Some(-0.3),
            ..Default::default()
        };
        let range = nice_range(1.0, 9.2, &options).unwrap();
        assert_eq!(range.min, -0.3);
        assert_eq!(range.max, 10.0);
    }

    #[test]
    fn test_explicit_increment() {
        let options = RangeOptions {
            snap: true,
            scaler: ScalerConfig::default().with_inc(3.0),
            ..Default::default()
        };
        let range = nice_range(1.0, 10.0, &options).unwrap();
        assert_eq!(range.inc, 3.0);
        assert_eq!((range.min, range.max), (0.0, 12.0));
    }

    #[test]
    fn test_space_pads_both_sides() {
        let options = RangeOptions {
            scaler: ScalerConfig::default()
                .with_range_mode(RangeMode::MinMax)
                .with_space(0.1),
            ..Default::default()
        };
        let range = nice_range(10.0, 20.0, &options).unwrap();
        assert!((range.min - 9.0).abs() < 1e-12);
        assert!((range.max - 21.0).abs() < 1e-12);
    }

    #[test]
    fn test_off_mode_never_snaps() {
        let options = RangeOptions {
            snap: true,
            scaler: ScalerConfig::default().with_range_mode(RangeMode::Off),
            ..Default::default()
        };
        let range = nice_range(0.3, 9.7, &options).unwrap();
        assert_eq!((range.min, range.max), (0.3, 9.7));
    }

    #[test]
    fn test_log_range_snaps_to_decades() {
        let options = RangeOptions {
            log: true,
            snap: true,
            ..Default::default()
        };
        let range = nice_range(3.0, 4500.0, &options).unwrap();
        assert!(range.is_log);
        assert_eq!(range.inc, 1.0);
        assert!((range.min - 1.0).abs() < 1e-12);
        assert!((range.max - 10000.0).abs() < 1e-9);
        assert_eq!(range.ticks().len(), 5);
    }

    #[test]
    fn test_log_range_rejects_non_positive() {
        let options = RangeOptions {
            log: true,
            ..Default::default()
        };
        assert!(matches!(
            nice_range(0.0, 10.0, &options),
            Err(ScaleError::InvalidLogRange { .. })
        ));
        assert!(matches!(
            nice_range(-5.0, 10.0, &options),
            Err(ScaleError::InvalidLogRange { .. })
        ));
        // the same span is fine on a linear axis
        assert!(nice_range(-5.0, 10.0, &linear(false)).is_ok());
    }

    #[test]
    fn test_log_override_past_the_data_stays_ordered() {
        let above = RangeOptions {
            log: true,
            min: Some(1000.0),
            ..Default::default()
        };
        let range = nice_range(1.0, 10.0, &above).unwrap();
        assert_eq!(range.min, 1000.0);
        assert!(range.max > range.min);

        let below = RangeOptions {
            log: true,
            max: Some(0.5),
            ..Default::default()
        };
        let range = nice_range(1.0, 10.0, &below).unwrap();
        assert_eq!(range.max, 0.5);
        assert!(range.min > 0.0 && range.min < range.max);
    }

    #[test]
    fn test_snapped_degenerate_span_follows_the_increment() {
        let options = RangeOptions {
            scaler: ScalerConfig::default().with_range_mode(RangeMode::MinMax),
            ..linear(true)
        };
        let range = nice_range(0.331, 0.331, &options).unwrap();
        assert!((range.min - 0.22).abs() < 1e-12);
        assert!((range.max - 0.44).abs() < 1e-12);
        assert!(is_multiple(range.min, range.inc));
        assert!(is_multiple(range.max, range.inc));
        // snapping outward moves the bounds off the symmetric pad
        assert!(((0.331 - range.min) - (range.max - 0.331)).abs() > 1e-3);
    }

    #[test]
    fn test_log_degenerate_is_one_decade_each_way() {
        let options = RangeOptions {
            log: true,
            ..Default::default()
        };
        let range = nice_range(100.0, 100.0, &options).unwrap();
        assert!((range.min - 10.0).abs() < 1e-9);
        assert!((range.max - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_ticks() {
        let range = AxisRange {
            min: 0.0,
            max: 1.0,
            inc: 0.2,
            is_log: false,
        };
        let ticks = range.ticks();
        assert_eq!(ticks.len(), 6);
        assert!((ticks[3] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_tick_exponent() {
        let config = ScalerConfig::default();
        assert_eq!(tick_exponent(0.5, &config), 0);
        assert_eq!(tick_exponent(2.0e7, &config), 6);
        assert_eq!(tick_exponent(5.0e-5, &config), -6);
        assert_eq!(tick_exponent(0.0, &config), 0);
    }

    #[test]
    fn test_percentile_bounds() {
        let values: Vec<f64> = (0..=100).map(f64::from).chain([f64::NAN]).collect();
        assert_eq!(percentile_bounds(&values, 100.0), Some((0.0, 100.0)));
        let (lo, hi) = percentile_bounds(&values, 90.0).unwrap();
        assert!((lo - 5.0).abs() < 1e-9);
        assert!((hi - 95.0).abs() < 1e-9);
        assert_eq!(percentile_bounds(&[f64::NAN], 90.0), None);
        assert_eq!(percentile_bounds(&values, 0.0), None);
    }

    #[test]
    fn test_finite_bounds_skips_non_finite() {
        let values = [f64::NAN, 3.0, f64::INFINITY, -2.0, f64::NEG_INFINITY];
        assert_eq!(finite_bounds(values), Some((-2.0, 3.0)));
        assert_eq!(finite_bounds([f64::NAN]), None);
    }

    #[test]
    fn test_set_option_rejects_unknown() {
        let mut config = ScalerConfig::default();
        config.set_option("mode", "symmetric").unwrap();
        config.set_option("approx_ticks", "5").unwrap();
        assert_eq!(config.range_mode, RangeMode::Symmetric);
        assert_eq!(config.approx_ticks, 5.0);
        assert!(matches!(
            config.set_option("snapp", "true"),
            Err(ConfigError::UnknownOption { .. })
        ));
        assert!(matches!(
            config.set_option("space", "-1"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
