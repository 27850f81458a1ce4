//! Styling properties.

use crate::color::SvgColor;
use crate::transform::{parse_transform, SvgTransform};
use crate::values::{parse_dasharray, parse_length, parse_number, parse_opacity, parse_url_ref};
use serde::{Deserialize, Serialize};
use svgkit_css::{DeclaredValue, StyleDeclarations};

/// Line cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Line join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Fill rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Whether fill or stroke is painted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaintOrder {
    #[default]
    FillStroke,
    StrokeFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VectorEffect {
    #[default]
    None,
    NonScalingStroke,
}

/// Declared style of one element.
///
/// Every field is optional; `None` means the value comes from the parent or
/// the initial value, never an implicit default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgStyle {
    pub fill: Option<SvgColor>,
    pub fill_opacity: Option<f32>,
    pub fill_rule: Option<FillRule>,
    pub stroke: Option<SvgColor>,
    pub stroke_opacity: Option<f32>,
    pub stroke_width: Option<f32>,
    pub stroke_linecap: Option<LineCap>,
    pub stroke_linejoin: Option<LineJoin>,
    pub stroke_miterlimit: Option<f32>,
    /// An empty list is an explicit `none`.
    pub stroke_dasharray: Option<Vec<f32>>,
    pub stroke_dashoffset: Option<f32>,
    pub opacity: Option<f32>,
    pub paint_order: Option<PaintOrder>,
    pub vector_effect: Option<VectorEffect>,
    pub transform: Option<SvgTransform>,
    /// Id of the referenced `<clipPath>`.
    pub clip_path: Option<String>,
    /// Id of the referenced `<mask>`.
    pub mask: Option<String>,
    pub marker_start: Option<String>,
    pub marker_mid: Option<String>,
    pub marker_end: Option<String>,
}

fn parse_fill_rule(v: &str) -> Option<FillRule> {
    match v {
        "nonzero" => Some(FillRule::NonZero),
        "evenodd" => Some(FillRule::EvenOdd),
        _ => None,
    }
}

fn parse_linecap(v: &str) -> Option<LineCap> {
    match v {
        "butt" => Some(LineCap::Butt),
        "round" => Some(LineCap::Round),
        "square" => Some(LineCap::Square),
        _ => None,
    }
}

fn parse_linejoin(v: &str) -> Option<LineJoin> {
    match v {
        "miter" | "miter-clip" | "arcs" => Some(LineJoin::Miter),
        "round" => Some(LineJoin::Round),
        "bevel" => Some(LineJoin::Bevel),
        _ => None,
    }
}

/// `normal`, or a list whose first paint keyword decides the order.
fn parse_paint_order(v: &str) -> Option<PaintOrder> {
    if v == "normal" {
        return Some(PaintOrder::FillStroke);
    }
    v.split_whitespace().find_map(|token| match token {
        "fill" => Some(PaintOrder::FillStroke),
        "stroke" => Some(PaintOrder::StrokeFill),
        _ => None,
    })
}

fn parse_vector_effect(v: &str) -> Option<VectorEffect> {
    match v {
        "none" => Some(VectorEffect::None),
        "non-scaling-stroke" => Some(VectorEffect::NonScalingStroke),
        _ => None,
    }
}

fn parse_reference(v: &str) -> Option<String> {
    parse_url_ref(v).map(str::to_string)
}

fn parse_stroke_dasharray(v: &str) -> Option<Vec<f32>> {
    if v.eq_ignore_ascii_case("none") {
        return Some(Vec::new());
    }
    parse_dasharray(v)
}

/// Set `field` from a declaration. A value that does not parse leaves the
/// field unset; `inherit` copies the parent's declared value.
fn assign<T: Clone>(
    field: &mut Option<T>,
    decls: &StyleDeclarations,
    property: &str,
    parent: Option<&Option<T>>,
    parse: impl Fn(&str) -> Option<T>,
) {
    match decls.get(property) {
        Some(DeclaredValue::Value(v)) => *field = parse(v.trim()),
        Some(DeclaredValue::Inherit) => *field = parent.and_then(|p| p.clone()),
        None => {}
    }
}

impl SvgStyle {
    /// Build a style from cascaded declarations.
    ///
    /// `parent` is the parent element's declared style, used for explicit
    /// `inherit` on properties that do not inherit on their own (opacity,
    /// transform, clip-path, mask).
    pub fn from_declarations(decls: &StyleDeclarations, parent: Option<&SvgStyle>) -> Self {
        let mut s = SvgStyle::default();
        macro_rules! set {
            ($field:ident, $property:literal, $parse:expr) => {
                assign(
                    &mut s.$field,
                    decls,
                    $property,
                    parent.map(|p| &p.$field),
                    $parse,
                )
            };
        }

        set!(fill, "fill", |v| Some(SvgColor::parse(v)));
        set!(fill_opacity, "fill-opacity", parse_opacity);
        set!(fill_rule, "fill-rule", parse_fill_rule);
        set!(stroke, "stroke", |v| Some(SvgColor::parse(v)));
        set!(stroke_opacity, "stroke-opacity", parse_opacity);
        set!(stroke_width, "stroke-width", |v| parse_length(v).filter(|w| *w >= 0.0));
        set!(stroke_linecap, "stroke-linecap", parse_linecap);
        set!(stroke_linejoin, "stroke-linejoin", parse_linejoin);
        set!(stroke_miterlimit, "stroke-miterlimit", |v| {
            parse_number(v).filter(|m| *m >= 1.0)
        });
        set!(stroke_dasharray, "stroke-dasharray", parse_stroke_dasharray);
        set!(stroke_dashoffset, "stroke-dashoffset", parse_length);
        set!(opacity, "opacity", parse_opacity);
        set!(paint_order, "paint-order", parse_paint_order);
        set!(vector_effect, "vector-effect", parse_vector_effect);
        set!(transform, "transform", parse_transform);
        set!(clip_path, "clip-path", parse_reference);
        set!(mask, "mask", parse_reference);
        set!(marker_start, "marker-start", parse_reference);
        set!(marker_mid, "marker-mid", parse_reference);
        set!(marker_end, "marker-end", parse_reference);

        // `marker` sets all three unless a longhand is present.
        if let Some(marker) = decls.value("marker").and_then(parse_reference) {
            for field in [&mut s.marker_start, &mut s.marker_mid, &mut s.marker_end] {
                field.get_or_insert_with(|| marker.clone());
            }
        }
        s
    }

    /// Whether no property is declared.
    pub fn is_empty(&self) -> bool {
        *self == SvgStyle::default()
    }

    /// Fill absent inherited properties from the parent's style.
    ///
    /// Opacity, vector-effect, transform, clip-path and mask do not inherit.
    pub fn inherit_from(&mut self, parent: &SvgStyle) {
        macro_rules! inherit {
            ($($field:ident),*) => {
                $(
                    if self.$field.is_none() {
                        self.$field = parent.$field.clone();
                    }
                )*
            };
        }
        inherit!(
            fill,
            fill_opacity,
            fill_rule,
            stroke,
            stroke_opacity,
            stroke_width,
            stroke_linecap,
            stroke_linejoin,
            stroke_miterlimit,
            stroke_dasharray,
            stroke_dashoffset,
            paint_order,
            marker_start,
            marker_mid,
            marker_end
        );
    }

    /// Apply SVG initial values to everything still absent.
    pub fn resolved(&self) -> ResolvedStyle {
        ResolvedStyle {
            fill: self.fill.clone().unwrap_or(SvgColor::BLACK),
            fill_opacity: self.fill_opacity.unwrap_or(1.0),
            fill_rule: self.fill_rule.unwrap_or_default(),
            stroke: self.stroke.clone().unwrap_or(SvgColor::None),
            stroke_opacity: self.stroke_opacity.unwrap_or(1.0),
            stroke_width: self.stroke_width.unwrap_or(1.0),
            stroke_linecap: self.stroke_linecap.unwrap_or_default(),
            stroke_linejoin: self.stroke_linejoin.unwrap_or_default(),
            stroke_miterlimit: self.stroke_miterlimit.unwrap_or(4.0),
            stroke_dasharray: self.stroke_dasharray.clone().unwrap_or_default(),
            stroke_dashoffset: self.stroke_dashoffset.unwrap_or(0.0),
            opacity: self.opacity.unwrap_or(1.0),
            paint_order: self.paint_order.unwrap_or_default(),
            vector_effect: self.vector_effect.unwrap_or_default(),
        }
    }
}

/// Style with every paint property resolved to a concrete value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStyle {
    pub fill: SvgColor,
    pub fill_opacity: f32,
    pub fill_rule: FillRule,
    pub stroke: SvgColor,
    pub stroke_opacity: f32,
    pub stroke_width: f32,
    pub stroke_linecap: LineCap,
    pub stroke_linejoin: LineJoin,
    pub stroke_miterlimit: f32,
    /// Empty when the stroke is solid.
    pub stroke_dasharray: Vec<f32>,
    pub stroke_dashoffset: f32,
    pub opacity: f32,
    pub paint_order: PaintOrder,
    pub vector_effect: VectorEffect,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        SvgStyle::default().resolved()
    }
}
