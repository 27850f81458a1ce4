//! Transforms.
//!
//! [`SvgTransform`] keeps the parsed function chain (what a code generator
//! needs); [`Transform2D`] is the composed affine matrix (what a renderer
//! needs).

use serde::{Deserialize, Serialize};
use svgkit_path::parse_numbers;
use tracing::debug;

// ==================== Matrix ====================

/// 2D affine transform matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, e, f]
    /// Represents: [a c e]
    ///             [b d f]
    ///             [0 0 1]
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Append a translation.
    pub fn translate(self, tx: f32, ty: f32) -> Self {
        self.multiply(&Transform2D::new(1.0, 0.0, 0.0, 1.0, tx, ty))
    }

    /// Append a scale.
    pub fn scale(self, sx: f32, sy: f32) -> Self {
        self.multiply(&Transform2D::new(sx, 0.0, 0.0, sy, 0.0, 0.0))
    }

    /// Append a rotation (degrees).
    pub fn rotate(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.multiply(&Transform2D::new(cos, sin, -sin, cos, 0.0, 0.0))
    }

    /// Append a horizontal skew (degrees).
    pub fn skew_x(self, degrees: f32) -> Self {
        self.multiply(&Transform2D::new(1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0))
    }

    /// Append a vertical skew (degrees).
    pub fn skew_y(self, degrees: f32) -> Self {
        self.multiply(&Transform2D::new(1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0))
    }

    /// `self × other`: `other` is applied to points first.
    pub fn multiply(&self, other: &Transform2D) -> Self {
        Transform2D {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Transform a point.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

// ==================== Transform functions ====================

/// A parsed `transform` attribute. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SvgTransform {
    Translate { x: f32, y: f32 },
    Scale { x: f32, y: f32 },
    /// Rotation about `(cx, cy)`.
    Rotate { angle: f32, cx: f32, cy: f32 },
    SkewX(f32),
    SkewY(f32),
    Matrix([f32; 6]),
    /// Functions in text order; the first is outermost.
    Combined(Vec<SvgTransform>),
}

impl SvgTransform {
    /// Compose into an affine matrix.
    pub fn to_matrix(&self) -> Transform2D {
        let id = Transform2D::identity();
        match self {
            SvgTransform::Translate { x, y } => id.translate(*x, *y),
            SvgTransform::Scale { x, y } => id.scale(*x, *y),
            SvgTransform::Rotate { angle, cx, cy } => id
                .translate(*cx, *cy)
                .rotate(*angle)
                .translate(-cx, -cy),
            SvgTransform::SkewX(a) => id.skew_x(*a),
            SvgTransform::SkewY(a) => id.skew_y(*a),
            SvgTransform::Matrix([a, b, c, d, e, f]) => Transform2D::new(*a, *b, *c, *d, *e, *f),
            SvgTransform::Combined(list) => list
                .iter()
                .fold(id, |acc, t| acc.multiply(&t.to_matrix())),
        }
    }
}

/// Transform types animatable by `animateTransform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformType {
    Translate,
    Scale,
    Rotate,
    SkewX,
    SkewY,
}

impl TransformType {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "translate" => Some(TransformType::Translate),
            "scale" => Some(TransformType::Scale),
            "rotate" => Some(TransformType::Rotate),
            "skewX" => Some(TransformType::SkewX),
            "skewY" => Some(TransformType::SkewY),
            _ => None,
        }
    }

    /// Complete argument list for animation values, filling missing
    /// arguments the way the attribute syntax does.
    pub fn arguments(self, values: &[f32]) -> Vec<f32> {
        let arg = |i: usize, default: f32| values.get(i).copied().unwrap_or(default);
        match self {
            TransformType::Translate => vec![arg(0, 0.0), arg(1, 0.0)],
            TransformType::Scale => {
                let x = arg(0, 1.0);
                vec![x, arg(1, x)]
            }
            TransformType::Rotate => vec![arg(0, 0.0), arg(1, 0.0), arg(2, 0.0)],
            TransformType::SkewX | TransformType::SkewY => vec![arg(0, 0.0)],
        }
    }

    /// Build a transform from animation values, with the defaults of
    /// [`TransformType::arguments`].
    pub fn with_values(self, values: &[f32]) -> SvgTransform {
        let args = self.arguments(values);
        let arg = |i: usize| args.get(i).copied().unwrap_or(0.0);
        match self {
            TransformType::Translate => SvgTransform::Translate { x: arg(0), y: arg(1) },
            TransformType::Scale => SvgTransform::Scale { x: arg(0), y: arg(1) },
            TransformType::Rotate => SvgTransform::Rotate {
                angle: arg(0),
                cx: arg(1),
                cy: arg(2),
            },
            TransformType::SkewX => SvgTransform::SkewX(arg(0)),
            TransformType::SkewY => SvgTransform::SkewY(arg(0)),
        }
    }
}

/// Build one function, `None` when the argument count does not fit.
fn transform_function(name: &str, args: &[f32]) -> Option<SvgTransform> {
    let t = match (name, args) {
        ("translate", [x]) => SvgTransform::Translate { x: *x, y: 0.0 },
        ("translate", [x, y]) => SvgTransform::Translate { x: *x, y: *y },
        ("scale", [s]) => SvgTransform::Scale { x: *s, y: *s },
        ("scale", [x, y]) => SvgTransform::Scale { x: *x, y: *y },
        ("rotate", [a]) => SvgTransform::Rotate {
            angle: *a,
            cx: 0.0,
            cy: 0.0,
        },
        ("rotate", [a, cx, cy]) => SvgTransform::Rotate {
            angle: *a,
            cx: *cx,
            cy: *cy,
        },
        ("skewX", [a]) => SvgTransform::SkewX(*a),
        ("skewY", [a]) => SvgTransform::SkewY(*a),
        ("matrix", [a, b, c, d, e, f]) => SvgTransform::Matrix([*a, *b, *c, *d, *e, *f]),
        _ => return None,
    };
    Some(t)
}

/// Parse a `transform` attribute.
///
/// Unknown functions and functions with the wrong number of arguments are
/// skipped. One function gives that function, several give
/// [`SvgTransform::Combined`], none gives `None`.
pub fn parse_transform(value: &str) -> Option<SvgTransform> {
    let mut list = Vec::new();
    let mut rest = value;
    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')').map(|i| open + i) else {
            debug!(transform = value, "Unclosed transform function");
            break;
        };
        let name = rest[..open].trim_matches(|c: char| c == ',' || c.is_whitespace());
        let args = parse_numbers(&rest[open + 1..close]);
        match transform_function(name, &args) {
            Some(t) => list.push(t),
            None => debug!(function = name, args = args.len(), "Transform function skipped"),
        }
        rest = &rest[close + 1..];
    }

    match list.len() {
        0 => None,
        1 => list.pop(),
        _ => Some(SvgTransform::Combined(list)),
    }
}
