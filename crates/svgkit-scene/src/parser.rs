//! Document builder.
//!
//! Turns the element walker's output into the scene tree. One
//! [`ParseContext`] is built per document and passed down explicitly; it
//! holds the merged `<style>` sheet and the `<path>` ids animations can
//! follow.

use crate::color::SvgColor;
use crate::css_animation::css_animations;
use crate::element::{
    GradientStop, SpreadMethod, SvgCircle, SvgClipPath, SvgElement, SvgEllipse, SvgGroup,
    SvgLine, SvgLinearGradient, SvgPath, SvgPattern, SvgPoly, SvgRadialGradient, SvgRect,
    SvgSymbol, SvgText, SvgUse, TextAnchor, Units,
};
use crate::smil::{smil_animations, MotionPaths};
use crate::style::SvgStyle;
use crate::transform::parse_transform;
use crate::values::{
    parse_fraction, parse_href, parse_length, parse_opacity, parse_points, split_list,
};
use crate::view_box::ViewBox;
use svgkit_css::{resolve_style, StyleDeclarations, Stylesheet};
use svgkit_path::parse_path;
use svgkit_xml::{text_content, Attributes, Element, TagKind, TagReader};
use tracing::{debug, trace};

/// Switches for the optional parts of document building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Apply `<style>` blocks and CSS animations.
    pub css: bool,
    /// Translate SMIL animation elements.
    pub smil: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            css: true,
            smil: true,
        }
    }
}

/// Per-document state shared by every element.
#[derive(Debug, Default)]
pub struct ParseContext {
    pub stylesheet: Stylesheet,
    pub motion_paths: MotionPaths,
    pub options: ParseOptions,
}

fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

impl ParseContext {
    /// Scan the whole document once for `<style>` blocks and path ids.
    pub fn new(src: &str, options: ParseOptions) -> Self {
        let mut ctx = ParseContext {
            options,
            ..Default::default()
        };
        let mut reader = TagReader::new(src);
        while let Some(tag) = reader.next() {
            match (local_name(tag.name), tag.kind) {
                ("style", TagKind::Open) if options.css => {
                    let Some(close) = reader
                        .by_ref()
                        .find(|t| t.kind == TagKind::Close && t.name == tag.name)
                    else {
                        debug!(offset = tag.start, "Unclosed <style> block");
                        break;
                    };
                    let css = text_content(&src[tag.end..close.start]);
                    ctx.stylesheet.append(Stylesheet::parse(&css));
                }
                ("path", TagKind::Open | TagKind::SelfClosing) if options.smil => {
                    let attrs = Attributes::parse(tag.attrs);
                    if let (Some(id), Some(d)) = (attrs.get("id"), attrs.get("d")) {
                        ctx.motion_paths.insert(id.to_string(), parse_path(d));
                    }
                }
                _ => {}
            }
        }
        trace!(
            rules = ctx.stylesheet.rule_count(),
            keyframes = ctx.stylesheet.keyframes.len(),
            paths = ctx.motion_paths.len(),
            "Document context"
        );
        ctx
    }
}

// ==================== Elements ====================

/// Elements that never become scene nodes.
const SKIPPED: &[&str] = &[
    "style",
    "title",
    "desc",
    "metadata",
    "animate",
    "animateColor",
    "animateTransform",
    "animateMotion",
    "set",
    "mpath",
    "stop",
];

/// Build the scene node for one element.
///
/// `parent` is the parent's style with inherited values filled in. Unknown
/// and non-graphic elements give `None`.
pub fn build_element(element: &Element<'_>, parent: &SvgStyle, ctx: &ParseContext) -> Option<SvgElement> {
    let tag = element.local_name();
    if SKIPPED.contains(&tag) {
        return None;
    }

    let decls = resolve_style(tag, &element.attributes, &ctx.stylesheet);
    let style = SvgStyle::from_declarations(&decls, Some(parent));
    let mut inherited = style.clone();
    inherited.inherit_from(parent);

    let attrs = &element.attributes;
    let id = attrs.get("id").map(str::to_string);
    let geometry = match tag {
        "path" => SvgElement::Path(SvgPath {
            id,
            commands: attrs.get("d").map(parse_path).unwrap_or_default(),
        }),
        "circle" => SvgElement::Circle(SvgCircle {
            id,
            cx: length(attrs, "cx"),
            cy: length(attrs, "cy"),
            r: length(attrs, "r"),
        }),
        "ellipse" => SvgElement::Ellipse(SvgEllipse {
            id,
            cx: length(attrs, "cx"),
            cy: length(attrs, "cy"),
            rx: length(attrs, "rx"),
            ry: length(attrs, "ry"),
        }),
        "rect" => SvgElement::Rect(rect(id, attrs)),
        "line" => SvgElement::Line(SvgLine {
            id,
            x1: length(attrs, "x1"),
            y1: length(attrs, "y1"),
            x2: length(attrs, "x2"),
            y2: length(attrs, "y2"),
        }),
        "polyline" | "polygon" => {
            let poly = SvgPoly {
                id,
                points: attrs.get("points").map(parse_points).unwrap_or_default(),
            };
            if tag == "polygon" {
                SvgElement::Polygon(poly)
            } else {
                SvgElement::Polyline(poly)
            }
        }
        "text" => SvgElement::Text(text(id, element, &decls)),
        "svg" | "g" | "a" | "switch" => SvgElement::Group(SvgGroup {
            id,
            children: build_children(element, &inherited, ctx),
        }),
        "defs" => SvgElement::Defs(SvgGroup {
            id,
            children: build_children(element, &inherited, ctx),
        }),
        "mask" => SvgElement::Mask(SvgGroup {
            id,
            children: build_children(element, &inherited, ctx),
        }),
        "clipPath" => SvgElement::ClipPath(SvgClipPath {
            id,
            units: units(attrs.get("clipPathUnits"), Units::UserSpaceOnUse),
            children: build_children(element, &inherited, ctx),
        }),
        "symbol" => SvgElement::Symbol(SvgSymbol {
            id,
            view_box: attrs.get("viewBox").and_then(ViewBox::parse),
            children: build_children(element, &inherited, ctx),
        }),
        "use" => SvgElement::Use(SvgUse {
            id,
            href: attrs
                .get_any(&["href", "xlink:href"])
                .and_then(parse_href)
                .map(str::to_string),
            x: length(attrs, "x"),
            y: length(attrs, "y"),
            width: attrs.get("width").and_then(parse_length),
            height: attrs.get("height").and_then(parse_length),
        }),
        "pattern" => SvgElement::Pattern(SvgPattern {
            id,
            x: length(attrs, "x"),
            y: length(attrs, "y"),
            width: length(attrs, "width"),
            height: length(attrs, "height"),
            units: units(attrs.get("patternUnits"), Units::ObjectBoundingBox),
            view_box: attrs.get("viewBox").and_then(ViewBox::parse),
            children: build_children(element, &inherited, ctx),
        }),
        "linearGradient" => SvgElement::LinearGradient(SvgLinearGradient {
            id,
            x1: coordinate(attrs, "x1", 0.0),
            y1: coordinate(attrs, "y1", 0.0),
            x2: coordinate(attrs, "x2", 1.0),
            y2: coordinate(attrs, "y2", 0.0),
            units: units(attrs.get("gradientUnits"), Units::ObjectBoundingBox),
            spread: spread(attrs.get("spreadMethod")),
            transform: attrs.get("gradientTransform").and_then(parse_transform),
            href: gradient_href(attrs),
            stops: stops(element, ctx),
        }),
        "radialGradient" => SvgElement::RadialGradient(SvgRadialGradient {
            id,
            cx: coordinate(attrs, "cx", 0.5),
            cy: coordinate(attrs, "cy", 0.5),
            r: coordinate(attrs, "r", 0.5),
            fx: attrs.get("fx").and_then(coordinate_value),
            fy: attrs.get("fy").and_then(coordinate_value),
            units: units(attrs.get("gradientUnits"), Units::ObjectBoundingBox),
            spread: spread(attrs.get("spreadMethod")),
            transform: attrs.get("gradientTransform").and_then(parse_transform),
            href: gradient_href(attrs),
            stops: stops(element, ctx),
        }),
        _ => {
            debug!(tag, "Unsupported element skipped");
            return None;
        }
    };

    let mut animations = Vec::new();
    if ctx.options.smil {
        animations.extend(smil_animations(element, &ctx.motion_paths));
    }
    if ctx.options.css {
        animations.extend(css_animations(&decls, &ctx.stylesheet));
    }
    Some(geometry.styled(style).animated(animations))
}

/// Scene nodes for the children of `element`, in document order.
pub fn build_children(element: &Element<'_>, parent: &SvgStyle, ctx: &ParseContext) -> Vec<SvgElement> {
    element
        .children()
        .filter_map(|child| build_element(&child, parent, ctx))
        .collect()
}

// ==================== Attributes ====================

fn length(attrs: &Attributes<'_>, name: &str) -> f32 {
    attrs.get(name).and_then(parse_length).unwrap_or(0.0)
}

/// Gradient coordinate: a percentage is a fraction, anything else a length.
fn coordinate_value(value: &str) -> Option<f32> {
    if value.trim_end().ends_with('%') {
        parse_fraction(value)
    } else {
        parse_length(value)
    }
}

fn coordinate(attrs: &Attributes<'_>, name: &str, default: f32) -> f32 {
    attrs.get(name).and_then(coordinate_value).unwrap_or(default)
}

fn units(value: Option<&str>, default: Units) -> Units {
    match value.map(str::trim) {
        Some("userSpaceOnUse") => Units::UserSpaceOnUse,
        Some("objectBoundingBox") => Units::ObjectBoundingBox,
        _ => default,
    }
}

fn spread(value: Option<&str>) -> SpreadMethod {
    match value.map(str::trim) {
        Some("reflect") => SpreadMethod::Reflect,
        Some("repeat") => SpreadMethod::Repeat,
        _ => SpreadMethod::Pad,
    }
}

fn gradient_href(attrs: &Attributes<'_>) -> Option<String> {
    attrs
        .get_any(&["href", "xlink:href"])
        .and_then(parse_href)
        .map(str::to_string)
}

/// Rect with corner radii: a missing radius copies the other one and both
/// are clamped to half the size.
fn rect(id: Option<String>, attrs: &Attributes<'_>) -> SvgRect {
    let width = length(attrs, "width").max(0.0);
    let height = length(attrs, "height").max(0.0);
    let radius = |name: &str| attrs.get(name).and_then(parse_length).filter(|r| *r >= 0.0);
    let (rx, ry) = match (radius("rx"), radius("ry")) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    SvgRect {
        id,
        x: length(attrs, "x"),
        y: length(attrs, "y"),
        width,
        height,
        rx: rx.min(width / 2.0),
        ry: ry.min(height / 2.0),
    }
}

fn text(id: Option<String>, element: &Element<'_>, decls: &StyleDeclarations) -> SvgText {
    let attrs = &element.attributes;
    SvgText {
        id,
        x: attrs.get("x").and_then(first_coordinate).unwrap_or(0.0),
        y: attrs.get("y").and_then(first_coordinate).unwrap_or(0.0),
        content: element.text().split_whitespace().collect::<Vec<_>>().join(" "),
        font_family: decls.value("font-family").map(|f| f.trim().to_string()),
        font_size: decls.value("font-size").and_then(parse_length),
        font_weight: decls.value("font-weight").map(|w| w.trim().to_string()),
        text_anchor: match decls.value("text-anchor").map(str::trim) {
            Some("start") => Some(TextAnchor::Start),
            Some("middle") => Some(TextAnchor::Middle),
            Some("end") => Some(TextAnchor::End),
            _ => None,
        },
    }
}

/// First entry of a coordinate list (`x="10 20 30"` on text).
fn first_coordinate(value: &str) -> Option<f32> {
    split_list(value).next().and_then(parse_length)
}

/// Gradient stops. Offsets are clamped to [0, 1] and never decrease.
fn stops(element: &Element<'_>, ctx: &ParseContext) -> Vec<GradientStop> {
    let mut last = 0.0f32;
    element
        .children()
        .filter(|c| c.local_name() == "stop")
        .map(|stop| {
            let decls = resolve_style("stop", &stop.attributes, &ctx.stylesheet);
            let offset = stop
                .attr("offset")
                .and_then(parse_fraction)
                .unwrap_or(0.0)
                .clamp(0.0, 1.0)
                .max(last);
            last = offset;
            GradientStop {
                offset,
                color: decls.value("stop-color").map_or(SvgColor::BLACK, SvgColor::parse),
                opacity: decls.value("stop-opacity").and_then(parse_opacity).unwrap_or(1.0),
            }
        })
        .collect()
}

/// Width or height of the root viewport; percentages count as unset.
pub(crate) fn viewport_length(value: Option<&str>) -> Option<f32> {
    let value = value?.trim();
    if value.ends_with('%') {
        return None;
    }
    parse_length(value).filter(|v| *v > 0.0)
}
