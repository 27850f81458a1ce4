//! # SvgKit Scene
//!
//! Immutable scene model for SVG documents and the builder that produces it.
//!
//! ## Features
//!
//! - **Elements**: Closed set of shapes, containers and paint servers, with
//!   `Styled` and `Animated` wrappers
//! - **Styles**: Optional property overrides with explicit inheritance
//! - **Colors**: `none`, unspecified (tint), ARGB and paint-server references
//!   kept apart
//! - **Transforms**: Parsed function chains and composed matrices
//! - **Animations**: SMIL elements and CSS `@keyframes` translated into one
//!   descriptor type
//! - **Registry**: Id lookup for clip paths, masks and paint servers
//!
//! ## Example
//!
//! ```
//! use svgkit_scene::{SvgDocument, SvgElement};
//!
//! let doc = SvgDocument::parse(r#"<svg viewBox="0 0 24 24"><circle cx="12" cy="12" r="10"/></svg>"#).unwrap();
//! assert!(matches!(doc.root.children()[0], SvgElement::Circle(_)));
//! ```

pub mod animation;
pub mod color;
pub mod css_animation;
pub mod document;
pub mod element;
pub mod parser;
pub mod smil;
pub mod style;
pub mod transform;
pub mod values;
pub mod view_box;

use svgkit_path::PathParseError;
use thiserror::Error;

pub use animation::{
    AnimateTarget, AnimateTiming, AnimationDirection, AnimationFillMode, CalcMode, Dur,
    Iterations, KeySplines, MotionRotate, StepPosition, SvgAnimate,
};
pub use color::{argb, channels, SvgColor};
pub use document::{DefsRegistry, SvgDocument};
pub use element::{
    GradientStop, SpreadMethod, SvgCircle, SvgClipPath, SvgElement, SvgEllipse, SvgGroup,
    SvgLine, SvgLinearGradient, SvgPath, SvgPattern, SvgPoly, SvgRadialGradient, SvgRect,
    SvgSymbol, SvgText, SvgUse, TextAnchor, Units,
};
pub use parser::ParseOptions;
pub use style::{FillRule, LineCap, LineJoin, PaintOrder, ResolvedStyle, SvgStyle, VectorEffect};
pub use transform::{parse_transform, SvgTransform, Transform2D, TransformType};
pub use values::Point;
pub use view_box::{Align, PreserveAspectRatio, ViewBox};

/// Scene errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SvgError {
    #[error("No <svg> root element found")]
    NoRootElement,

    #[error("Invalid path data: {0}")]
    InvalidPath(#[from] PathParseError),
}
