//! Autoscaling for plot axes.
//!
//! Turns raw data extents into "nice" axis ranges and tick increments, and
//! keeps several datasets that share a figure on one consistent scale.
//!
//! # Architecture
//!
//! 1. **Interval utilities**: nice numbers, range modes and snapping ([`nice_range`])
//! 2. **Axis descriptors**: immutable presentation intent built through [`AxisBuilder`]
//! 3. **Scale guru**: pools datasets per axis and resolves every range at once
//! 4. **Grid helpers**: flattening and outlining of masked sampled grids
//!
//! # Example
//!
//! ```
//! use plotframe_scale::{Axes, Axis, Dataset, ScaleGuru};
//!
//! let x = [0.0, 3.0, 9.5];
//! let y = [1.2, -0.4, 2.8];
//! let data = [Dataset::xy(&x, &y)?];
//! let axes = Axes::xy(
//!     Axis::builder().label("Time").unit("s").snap(true).build()?,
//!     Axis::builder().label("Amplitude").snap(true).build()?,
//! );
//! let guru = ScaleGuru::new(&data, axes)?;
//! assert_eq!(guru.region().xmin, 0.0);
//! assert_eq!(guru.region().xmax, 10.0);
//! # Ok::<(), plotframe_core::ScaleError>(())
//! ```

mod axis;
mod grid;
mod guru;
mod interval;
mod outline;

pub use axis::{Axis, AxisBuilder, AxisMode};
pub use grid::Grid2;
pub use guru::{compute, compute_with, AxisName, Axes, Dataset, GuruConfig, Region, ScaleGuru, ScaleParams};
pub use interval::{
    finite_bounds, magnitude_unit, nice_range, nice_value, percentile_bounds, tick_exponent,
    AxisRange, RangeMode, RangeOptions, ScalerConfig,
};
pub use outline::{finite_outline, finite_outline_indices, GridIndex};
