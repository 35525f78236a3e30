//! Layout of plot panels on a page.
//!
//! A page is divided by a [`GridLayout`] whose cells hold [`Widget`]s. Each
//! widget claims space along each axis through a [`SizePolicy`]:
//! fixed, flexible (weighted share of the leftover) or aspect-locked to the
//! other axis. Widgets may nest further grids, so panels, color bars and
//! spacers compose into arbitrary figure layouts.
//!
//! # Example
//!
//! ```
//! use plotframe_core::{Margins, CM, GOLDEN_RATIO};
//! use plotframe_layout::{GridLayout, SizePolicy, Widget};
//!
//! let panel = GridLayout::new(1, 2)?
//!     .with_cell(0, 0, Widget::flexible().named("plot"))?
//!     .with_cell(0, 1, Widget::flexible().named("colorbar"))?
//!     .with_col_policy(1, SizePolicy::Fixed(CM))?
//!     .with_aspect(GOLDEN_RATIO, 0, 0)?;
//! let mut page = GridLayout::frame(Margins::uniform(2.0 * CM), panel.into());
//! page.solve(595.0, 842.0)?;
//!
//! let plot = page.find("plot").and_then(|w| w.bounds()).unwrap();
//! assert!((plot.aspect() - GOLDEN_RATIO).abs() < 1e-9);
//! # Ok::<(), plotframe_core::LayoutError>(())
//! ```

mod grid;
mod policy;
mod tracks;
mod widget;

pub use grid::GridLayout;
pub use policy::{AspectPolicy, ContentAlignment, SizePolicy};
pub use tracks::TrackSizes;
pub use widget::Widget;
