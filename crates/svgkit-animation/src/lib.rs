//! # SvgKit Animation
//!
//! Interpolation and easing engine for SvgKit scenes.
//!
//! ## Features
//!
//! - **Easing**: Linear, discrete, paced, cubic-bezier splines and steps
//! - **Timeline**: Delay, iterations, direction and fill modes as a small
//!   state machine
//! - **Interpolation**: Numbers, dash arrays, colors, path morphing, point
//!   lists, transforms, motion paths and stroke reveal
//! - **Clock**: Document-wide total duration, master progress and wall-clock
//!   sampling
//! - **Frames**: Per-document evaluator backed by a geometry cache
//!
//! ## Architecture
//!
//! ```text
//! FrameEvaluator
//!    ├── AnimationClock      (document time)
//!    ├── GeometryCache       (lengths, motion paths)
//!    └── (element, animation) entries
//!           ├── sample_at    (phase, iteration, eased progress)
//!           └── interpolate  (AnimatedValue)
//! ```
//!
//! ## Example
//!
//! ```
//! use svgkit_animation::{evaluate, AnimatedValue};
//! use svgkit_scene::SvgDocument;
//!
//! let doc = SvgDocument::parse(
//!     r#"<svg><circle r="10"><animate attributeName="opacity" from="0" to="1" dur="1s"/></circle></svg>"#,
//! ).unwrap();
//! let animation = &doc.root.children()[0].animations()[0];
//! assert_eq!(evaluate(animation, 0.5, 1000), AnimatedValue::Number(0.5));
//! ```

pub mod clock;
pub mod easing;
pub mod evaluate;
pub mod interpolate;
pub mod timeline;

pub use clock::AnimationClock;
pub use easing::apply_easing;
pub use evaluate::{evaluate, evaluate_with, Frame, FrameEvaluator, FrameValue};
pub use interpolate::{
    interpolate, lerp, lerp_color, lerp_list, lerp_points, morph_path, AnimatedValue, EvalContext,
};
pub use timeline::{apply_direction, local_progress, sample_at, sample_progress, FrameSample, Phase};
