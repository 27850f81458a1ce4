//! The element tree.
//!
//! A closed set of element kinds plus two wrappers. Wrapping order is fixed:
//! `Animated(Styled(element))`, either wrapper may be absent.

use crate::animation::SvgAnimate;
use crate::color::SvgColor;
use crate::style::SvgStyle;
use crate::transform::SvgTransform;
use crate::values::Point;
use crate::view_box::ViewBox;
use crate::SvgError;
use serde::{Deserialize, Serialize};
use svgkit_path::{parse_path_strict, PathCommand};

// ==================== Shapes ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgPath {
    pub id: Option<String>,
    pub commands: Vec<PathCommand>,
}

impl SvgPath {
    /// Build from hand-written path data, reporting malformed input.
    pub fn parse_strict(d: &str) -> Result<Self, SvgError> {
        Ok(SvgPath {
            id: None,
            commands: parse_path_strict(d)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgCircle {
    pub id: Option<String>,
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgEllipse {
    pub id: Option<String>,
    pub cx: f32,
    pub cy: f32,
    pub rx: f32,
    pub ry: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgRect {
    pub id: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Corner radii, already clamped to half the size.
    pub rx: f32,
    pub ry: f32,
}

impl SvgRect {
    pub fn has_radius(&self) -> bool {
        self.rx > 0.0 && self.ry > 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgLine {
    pub id: Option<String>,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Polyline or polygon vertices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgPoly {
    pub id: Option<String>,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgText {
    pub id: Option<String>,
    pub x: f32,
    pub y: f32,
    pub content: String,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<String>,
    pub text_anchor: Option<TextAnchor>,
}

// ==================== Structure ====================

/// Container with children: `<g>`, `<defs>`, `<clipPath>`, `<mask>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgGroup {
    pub id: Option<String>,
    pub children: Vec<SvgElement>,
}

/// Coordinate system of clip paths, patterns and gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    #[default]
    UserSpaceOnUse,
    ObjectBoundingBox,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgClipPath {
    pub id: Option<String>,
    pub units: Units,
    pub children: Vec<SvgElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgSymbol {
    pub id: Option<String>,
    pub view_box: Option<ViewBox>,
    pub children: Vec<SvgElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgUse {
    pub id: Option<String>,
    /// Id of the referenced element.
    pub href: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgPattern {
    pub id: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub units: Units,
    pub view_box: Option<ViewBox>,
    pub children: Vec<SvgElement>,
}

// ==================== Paint servers ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpreadMethod {
    #[default]
    Pad,
    Reflect,
    Repeat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Offset in [0, 1].
    pub offset: f32,
    pub color: SvgColor,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgLinearGradient {
    pub id: Option<String>,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub units: Units,
    pub spread: SpreadMethod,
    pub transform: Option<SvgTransform>,
    /// Template gradient id (`href`).
    pub href: Option<String>,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgRadialGradient {
    pub id: Option<String>,
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    /// Focal point; the centre when absent.
    pub fx: Option<f32>,
    pub fy: Option<f32>,
    pub units: Units,
    pub spread: SpreadMethod,
    pub transform: Option<SvgTransform>,
    pub href: Option<String>,
    pub stops: Vec<GradientStop>,
}

// ==================== Element ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SvgElement {
    Path(SvgPath),
    Circle(SvgCircle),
    Ellipse(SvgEllipse),
    Rect(SvgRect),
    Line(SvgLine),
    Polyline(SvgPoly),
    Polygon(SvgPoly),
    Text(SvgText),
    Group(SvgGroup),
    Defs(SvgGroup),
    ClipPath(SvgClipPath),
    Mask(SvgGroup),
    Symbol(SvgSymbol),
    Use(SvgUse),
    Pattern(SvgPattern),
    LinearGradient(SvgLinearGradient),
    RadialGradient(SvgRadialGradient),
    Styled(Box<SvgElement>, SvgStyle),
    Animated(Box<SvgElement>, Vec<SvgAnimate>),
}

impl SvgElement {
    /// Wrap in a style, unless the style declares nothing.
    pub fn styled(self, style: SvgStyle) -> Self {
        if style.is_empty() {
            self
        } else {
            SvgElement::Styled(Box::new(self), style)
        }
    }

    /// Wrap in animations, unless there are none.
    pub fn animated(self, animations: Vec<SvgAnimate>) -> Self {
        if animations.is_empty() {
            self
        } else {
            SvgElement::Animated(Box::new(self), animations)
        }
    }

    /// The element without its wrappers.
    pub fn inner(&self) -> &SvgElement {
        match self {
            SvgElement::Styled(inner, _) | SvgElement::Animated(inner, _) => inner.inner(),
            other => other,
        }
    }

    /// Declared style, looking through an animation wrapper.
    pub fn style(&self) -> Option<&SvgStyle> {
        match self {
            SvgElement::Styled(_, style) => Some(style),
            SvgElement::Animated(inner, _) => inner.style(),
            _ => None,
        }
    }

    /// Attached animations.
    pub fn animations(&self) -> &[SvgAnimate] {
        match self {
            SvgElement::Animated(_, animations) => animations,
            _ => &[],
        }
    }

    pub fn id(&self) -> Option<&str> {
        let id = match self.inner() {
            SvgElement::Path(e) => &e.id,
            SvgElement::Circle(e) => &e.id,
            SvgElement::Ellipse(e) => &e.id,
            SvgElement::Rect(e) => &e.id,
            SvgElement::Line(e) => &e.id,
            SvgElement::Polyline(e) | SvgElement::Polygon(e) => &e.id,
            SvgElement::Text(e) => &e.id,
            SvgElement::Group(e) | SvgElement::Defs(e) | SvgElement::Mask(e) => &e.id,
            SvgElement::ClipPath(e) => &e.id,
            SvgElement::Symbol(e) => &e.id,
            SvgElement::Use(e) => &e.id,
            SvgElement::Pattern(e) => &e.id,
            SvgElement::LinearGradient(e) => &e.id,
            SvgElement::RadialGradient(e) => &e.id,
            SvgElement::Styled(..) | SvgElement::Animated(..) => return None,
        };
        id.as_deref()
    }

    /// Child elements of a container, empty for everything else.
    pub fn children(&self) -> &[SvgElement] {
        match self.inner() {
            SvgElement::Group(g) | SvgElement::Defs(g) | SvgElement::Mask(g) => &g.children,
            SvgElement::ClipPath(c) => &c.children,
            SvgElement::Symbol(s) => &s.children,
            SvgElement::Pattern(p) => &p.children,
            _ => &[],
        }
    }

    /// SVG tag name of the element.
    pub fn tag_name(&self) -> &'static str {
        match self.inner() {
            SvgElement::Path(_) => "path",
            SvgElement::Circle(_) => "circle",
            SvgElement::Ellipse(_) => "ellipse",
            SvgElement::Rect(_) => "rect",
            SvgElement::Line(_) => "line",
            SvgElement::Polyline(_) => "polyline",
            SvgElement::Polygon(_) => "polygon",
            SvgElement::Text(_) => "text",
            SvgElement::Group(_) => "g",
            SvgElement::Defs(_) => "defs",
            SvgElement::ClipPath(_) => "clipPath",
            SvgElement::Mask(_) => "mask",
            SvgElement::Symbol(_) => "symbol",
            SvgElement::Use(_) => "use",
            SvgElement::Pattern(_) => "pattern",
            SvgElement::LinearGradient(_) => "linearGradient",
            SvgElement::RadialGradient(_) => "radialGradient",
            SvgElement::Styled(..) | SvgElement::Animated(..) => "",
        }
    }

    /// Visit this element and its descendants in document order.
    ///
    /// Each element is visited once, through its outermost wrapper.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SvgElement)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}
