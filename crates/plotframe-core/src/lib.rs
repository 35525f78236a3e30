//! Core types, page configuration and error types for plotframe.
//!
//! This crate provides the foundational types shared by the other plotframe crates:
//! - Physical lengths and unit conversion to page points
//! - Rectangles (`Bounds`) in page coordinates
//! - Page configuration threaded through layout construction
//! - Error types for scaling, layout and configuration

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
