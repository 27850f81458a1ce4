//! # SvgKit Geometry
//!
//! Draw geometry for SvgKit scenes.
//!
//! ## Features
//!
//! - **Outlines**: Ovals, round rects, line sequences and paths derived from
//!   shape elements
//! - **Measurement**: Curve and arc flattening, total length, point and
//!   tangent at a distance
//! - **Caching**: Lengths computed once per scene tree, keyed by element
//!   identity
//! - **Dashes**: Dasharray normalization and progressive-reveal patterns
//! - **Clipping**: Outlines of `<clipPath>` elements resolved through the
//!   defs registry

pub mod cache;
pub mod clip;
pub mod dash;
pub mod measure;
pub mod outline;

pub use cache::{ByAddress, DrawGeometry, GeometryCache};
pub use clip::{clip_outlines, ClipOutline};
pub use dash::{normalize_dasharray, stroke_draw_dash, StrokeDash};
pub use measure::{flatten, PathMeasure, PointOnPath};
pub use outline::Outline;
