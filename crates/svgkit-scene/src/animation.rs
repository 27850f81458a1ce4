//! Animation descriptors.
//!
//! An [`SvgAnimate`] is created once while parsing and never changes. The
//! interpolation engine reads it every frame.

use crate::transform::TransformType;
use crate::values::Point;
use serde::{Deserialize, Serialize};
use svgkit_path::PathCommand;

// ==================== Timing ====================

/// Simple duration of one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dur {
    /// The animation never advances past its start.
    #[default]
    Indefinite,
    Ms(u64),
}

impl Dur {
    pub fn ms(self) -> Option<u64> {
        match self {
            Dur::Indefinite => None,
            Dur::Ms(ms) => Some(ms),
        }
    }
}

/// Cubic-bezier easing control points. The curve runs from (0,0) to (1,1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeySplines {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl KeySplines {
    pub const EASE: KeySplines = KeySplines::new(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: KeySplines = KeySplines::new(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: KeySplines = KeySplines::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: KeySplines = KeySplines::new(0.42, 0.0, 0.58, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build from four numbers; x coordinates must lie in [0, 1].
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match values {
            [x1, y1, x2, y2] if (0.0..=1.0).contains(x1) && (0.0..=1.0).contains(x2) => {
                Some(Self::new(*x1, *y1, *x2, *y2))
            }
            _ => None,
        }
    }

    /// Named CSS easing keyword.
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "ease" => Some(Self::EASE),
            "ease-in" => Some(Self::EASE_IN),
            "ease-out" => Some(Self::EASE_OUT),
            "ease-in-out" => Some(Self::EASE_IN_OUT),
            _ => None,
        }
    }
}

/// Where the jumps of a stepped easing fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepPosition {
    /// Jump at the start of each interval.
    Start,
    /// Jump at the end of each interval.
    #[default]
    End,
    /// No jump at either end.
    JumpNone,
    /// Jump at both ends.
    JumpBoth,
}

/// How progress maps to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CalcMode {
    #[default]
    Linear,
    Discrete,
    Paced,
    /// Carries the key splines, so splines exist exactly when this mode is set.
    Spline(KeySplines),
    Steps { count: u32, position: StepPosition },
}

impl CalcMode {
    pub fn key_splines(&self) -> Option<KeySplines> {
        match self {
            CalcMode::Spline(s) => Some(*s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Iterations {
    Count(u32),
    Infinite,
}

impl Default for Iterations {
    fn default() -> Self {
        Iterations::Count(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationDirection {
    #[default]
    Normal,
    Reverse,
    Alternate,
    AlternateReverse,
}

impl AnimationDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(AnimationDirection::Normal),
            "reverse" => Some(AnimationDirection::Reverse),
            "alternate" => Some(AnimationDirection::Alternate),
            "alternate-reverse" => Some(AnimationDirection::AlternateReverse),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationFillMode {
    #[default]
    None,
    Forwards,
    Backwards,
    Both,
}

impl AnimationFillMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(AnimationFillMode::None),
            "forwards" => Some(AnimationFillMode::Forwards),
            "backwards" => Some(AnimationFillMode::Backwards),
            "both" => Some(AnimationFillMode::Both),
            _ => None,
        }
    }

    /// Holds the start value before the delay ends.
    pub fn fills_backwards(self) -> bool {
        matches!(self, AnimationFillMode::Backwards | AnimationFillMode::Both)
    }

    /// Holds the end value after the last iteration.
    pub fn fills_forwards(self) -> bool {
        matches!(self, AnimationFillMode::Forwards | AnimationFillMode::Both)
    }
}

/// Timing fields shared by every animation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimateTiming {
    pub dur: Dur,
    pub delay_ms: u64,
    pub calc_mode: CalcMode,
    pub iterations: Iterations,
    pub direction: AnimationDirection,
    pub fill_mode: AnimationFillMode,
}

impl AnimateTiming {
    /// Time from the start of the document to the end of the last iteration.
    ///
    /// Infinite animations count one iteration; an indefinite duration
    /// counts only the delay.
    pub fn active_end_ms(&self) -> u64 {
        let dur = self.dur.ms().unwrap_or(0);
        let iterations = match self.iterations {
            Iterations::Count(n) => u64::from(n),
            Iterations::Infinite => 1,
        };
        self.delay_ms.saturating_add(dur.saturating_mul(iterations))
    }
}

// ==================== Targets ====================

/// Orientation along a motion path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionRotate {
    /// Fixed angle in degrees.
    Angle(f32),
    /// Follow the path tangent.
    Auto,
    /// Follow the path tangent, turned 180°.
    AutoReverse,
}

impl Default for MotionRotate {
    fn default() -> Self {
        MotionRotate::Angle(0.0)
    }
}

/// Animated property with its start and end values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnimateTarget {
    Opacity { from: f32, to: f32 },
    FillOpacity { from: f32, to: f32 },
    StrokeOpacity { from: f32, to: f32 },
    StrokeWidth { from: f32, to: f32 },
    StrokeDashoffset { from: f32, to: f32 },
    StrokeDasharray { from: Vec<f32>, to: Vec<f32> },
    /// Progressive stroke reveal; `reverse` retracts instead of drawing.
    StrokeDraw { reverse: bool },
    Fill { from: u32, to: u32 },
    Stroke { from: u32, to: u32 },
    Cx { from: f32, to: f32 },
    Cy { from: f32, to: f32 },
    R { from: f32, to: f32 },
    Rx { from: f32, to: f32 },
    Ry { from: f32, to: f32 },
    X { from: f32, to: f32 },
    Y { from: f32, to: f32 },
    Width { from: f32, to: f32 },
    Height { from: f32, to: f32 },
    X1 { from: f32, to: f32 },
    Y1 { from: f32, to: f32 },
    X2 { from: f32, to: f32 },
    Y2 { from: f32, to: f32 },
    /// Path morph.
    D { from: Vec<PathCommand>, to: Vec<PathCommand> },
    /// Polygon/polyline morph.
    Points { from: Vec<Point>, to: Vec<Point> },
    Transform { kind: TransformType, from: Vec<f32>, to: Vec<f32> },
    Motion { path: Vec<PathCommand>, rotate: MotionRotate },
}

impl AnimateTarget {
    /// Numeric target for an attribute or CSS property name.
    pub fn scalar(attribute: &str, from: f32, to: f32) -> Option<Self> {
        let target = match attribute {
            "opacity" => AnimateTarget::Opacity { from, to },
            "fill-opacity" => AnimateTarget::FillOpacity { from, to },
            "stroke-opacity" => AnimateTarget::StrokeOpacity { from, to },
            "stroke-width" => AnimateTarget::StrokeWidth { from, to },
            "stroke-dashoffset" => AnimateTarget::StrokeDashoffset { from, to },
            "cx" => AnimateTarget::Cx { from, to },
            "cy" => AnimateTarget::Cy { from, to },
            "r" => AnimateTarget::R { from, to },
            "rx" => AnimateTarget::Rx { from, to },
            "ry" => AnimateTarget::Ry { from, to },
            "x" => AnimateTarget::X { from, to },
            "y" => AnimateTarget::Y { from, to },
            "width" => AnimateTarget::Width { from, to },
            "height" => AnimateTarget::Height { from, to },
            "x1" => AnimateTarget::X1 { from, to },
            "y1" => AnimateTarget::Y1 { from, to },
            "x2" => AnimateTarget::X2 { from, to },
            "y2" => AnimateTarget::Y2 { from, to },
            _ => return None,
        };
        Some(target)
    }

    /// `(from, to)` of a numeric target.
    pub fn scalar_range(&self) -> Option<(f32, f32)> {
        match *self {
            AnimateTarget::Opacity { from, to }
            | AnimateTarget::FillOpacity { from, to }
            | AnimateTarget::StrokeOpacity { from, to }
            | AnimateTarget::StrokeWidth { from, to }
            | AnimateTarget::StrokeDashoffset { from, to }
            | AnimateTarget::Cx { from, to }
            | AnimateTarget::Cy { from, to }
            | AnimateTarget::R { from, to }
            | AnimateTarget::Rx { from, to }
            | AnimateTarget::Ry { from, to }
            | AnimateTarget::X { from, to }
            | AnimateTarget::Y { from, to }
            | AnimateTarget::Width { from, to }
            | AnimateTarget::Height { from, to }
            | AnimateTarget::X1 { from, to }
            | AnimateTarget::Y1 { from, to }
            | AnimateTarget::X2 { from, to }
            | AnimateTarget::Y2 { from, to } => Some((from, to)),
            _ => None,
        }
    }

    /// Name of the animated attribute.
    pub fn attribute(&self) -> &'static str {
        match self {
            AnimateTarget::Opacity { .. } => "opacity",
            AnimateTarget::FillOpacity { .. } => "fill-opacity",
            AnimateTarget::StrokeOpacity { .. } => "stroke-opacity",
            AnimateTarget::StrokeWidth { .. } => "stroke-width",
            AnimateTarget::StrokeDashoffset { .. } | AnimateTarget::StrokeDraw { .. } => {
                "stroke-dashoffset"
            }
            AnimateTarget::StrokeDasharray { .. } => "stroke-dasharray",
            AnimateTarget::Fill { .. } => "fill",
            AnimateTarget::Stroke { .. } => "stroke",
            AnimateTarget::Cx { .. } => "cx",
            AnimateTarget::Cy { .. } => "cy",
            AnimateTarget::R { .. } => "r",
            AnimateTarget::Rx { .. } => "rx",
            AnimateTarget::Ry { .. } => "ry",
            AnimateTarget::X { .. } => "x",
            AnimateTarget::Y { .. } => "y",
            AnimateTarget::Width { .. } => "width",
            AnimateTarget::Height { .. } => "height",
            AnimateTarget::X1 { .. } => "x1",
            AnimateTarget::Y1 { .. } => "y1",
            AnimateTarget::X2 { .. } => "x2",
            AnimateTarget::Y2 { .. } => "y2",
            AnimateTarget::D { .. } => "d",
            AnimateTarget::Points { .. } => "points",
            AnimateTarget::Transform { .. } => "transform",
            AnimateTarget::Motion { .. } => "motion",
        }
    }
}

/// One animation attached to an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgAnimate {
    pub target: AnimateTarget,
    pub timing: AnimateTiming,
}

impl SvgAnimate {
    pub fn new(target: AnimateTarget, timing: AnimateTiming) -> Self {
        Self { target, timing }
    }
}
