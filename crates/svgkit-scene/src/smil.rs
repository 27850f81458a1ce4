//! SMIL animation translator.
//!
//! Reads the `<animate>`, `<animateColor>`, `<animateTransform>`,
//! `<animateMotion>` and `<set>` children of one element and turns each into
//! an [`SvgAnimate`]. Anything that cannot be translated is skipped.

use crate::animation::{
    AnimateTarget, AnimateTiming, AnimationFillMode, CalcMode, Dur, Iterations, KeySplines,
    MotionRotate, SvgAnimate,
};
use crate::color::SvgColor;
use crate::transform::TransformType;
use crate::values::{
    parse_dasharray, parse_duration_ms, parse_href, parse_length, parse_number, parse_opacity,
    parse_points,
};
use std::collections::HashMap;
use svgkit_path::{parse_numbers, parse_path, PathCommand};
use svgkit_xml::{Attributes, Element};
use tracing::debug;

/// Path data of every `<path id="..">` in a document, for `<mpath>`.
pub type MotionPaths = HashMap<String, Vec<PathCommand>>;

/// Start and end values of one animation, before conversion to a target.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Range<'v> {
    /// Raw attribute text for both ends.
    Text(&'v str, &'v str),
    /// Numeric ends derived from `values` or `by`.
    Numbers(f32, f32),
}

/// Translate the animation children of `element`.
pub fn smil_animations(element: &Element<'_>, motion_paths: &MotionPaths) -> Vec<SvgAnimate> {
    let mut out = Vec::new();
    for child in element.children() {
        let animation = match child.local_name() {
            "animate" | "animateColor" => animate(&child.attributes, &element.attributes),
            "set" => set(&child.attributes),
            "animateTransform" => animate_transform(&child.attributes),
            "animateMotion" => animate_motion(&child, motion_paths),
            _ => continue,
        };
        match animation {
            Some(a) => out.push(a),
            None => debug!(
                element = element.local_name(),
                animation = child.local_name(),
                attribute = child.attr("attributeName").unwrap_or(""),
                "SMIL animation skipped"
            ),
        }
    }
    out
}

// ==================== Timing ====================

fn timing(attrs: &Attributes<'_>) -> AnimateTiming {
    let dur = attrs
        .get("dur")
        .and_then(parse_duration_ms)
        .map_or(Dur::Indefinite, Dur::Ms);

    // Only the first offset of a begin list is honoured; event values start at 0.
    let delay_ms = attrs
        .get("begin")
        .and_then(|b| b.split(';').next())
        .and_then(parse_duration_ms)
        .unwrap_or(0);

    let calc_mode = match attrs.get("calcMode").map(str::trim) {
        Some("discrete") => CalcMode::Discrete,
        Some("paced") => CalcMode::Paced,
        Some("spline") => attrs
            .get("keySplines")
            .and_then(|s| s.split(';').next())
            .and_then(|s| KeySplines::from_slice(&parse_numbers(s)))
            .map_or(CalcMode::Linear, CalcMode::Spline),
        _ => CalcMode::Linear,
    };

    let iterations = if attrs.get("repeatDur").map(str::trim) == Some("indefinite") {
        Iterations::Infinite
    } else {
        match attrs.get("repeatCount").map(str::trim) {
            Some("indefinite") => Iterations::Infinite,
            Some(count) => parse_number(count)
                .filter(|n| *n > 0.0)
                .map_or(Iterations::Count(1), |n| Iterations::Count(n.ceil() as u32)),
            None => Iterations::Count(1),
        }
    };

    let fill_mode = match attrs.get("fill").map(str::trim) {
        Some("freeze") => AnimationFillMode::Forwards,
        _ => AnimationFillMode::None,
    };

    AnimateTiming {
        dur,
        delay_ms,
        calc_mode,
        iterations,
        fill_mode,
        ..Default::default()
    }
}

// ==================== Values ====================

fn values_list<'v>(attrs: &'v Attributes<'_>) -> Vec<&'v str> {
    attrs
        .get("values")
        .map(|v| v.split(';').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

/// Resolve the two ends of an animation.
///
/// `from`/`to` win over `values`. A `values` list of plain numbers gives its
/// minimum and maximum; any other list gives its first and last entries.
/// `to` alone animates from `base`, the current attribute value.
fn range<'v>(attrs: &'v Attributes<'_>, base: Option<&'v str>) -> Option<Range<'v>> {
    let from = attrs.get("from");
    let to = attrs.get("to");
    let by = attrs.get("by").and_then(parse_number);

    if let (Some(from), Some(to)) = (from, to) {
        return Some(Range::Text(from, to));
    }

    let values = values_list(attrs);
    if let (Some(first), Some(last)) = (values.first().copied(), values.last().copied()) {
        let numbers: Option<Vec<f32>> = values.iter().map(|v| parse_number(v)).collect();
        return match numbers {
            Some(n) if n.len() >= 2 => {
                let min = n.iter().copied().fold(f32::INFINITY, f32::min);
                let max = n.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                Some(Range::Numbers(min, max))
            }
            _ => Some(Range::Text(first, last)),
        };
    }

    match (from, to, by) {
        (Some(from), None, Some(by)) => {
            let start = parse_number(from)?;
            Some(Range::Numbers(start, start + by))
        }
        (None, Some(to), _) => Some(Range::Text(base.unwrap_or(to), to)),
        (None, None, Some(by)) => {
            let start = base.and_then(parse_number).unwrap_or(0.0);
            Some(Range::Numbers(start, start + by))
        }
        _ => None,
    }
}

fn scalar_value(attribute: &str, text: &str) -> Option<f32> {
    match attribute {
        "opacity" | "fill-opacity" | "stroke-opacity" => parse_opacity(text),
        _ => parse_length(text),
    }
}

fn color_value(text: &str) -> Option<u32> {
    match SvgColor::parse(text) {
        SvgColor::Argb(c) => Some(c),
        SvgColor::None => SvgColor::TRANSPARENT.argb(),
        _ => None,
    }
}

/// Build the target for an attribute animation.
fn target(attribute: &str, range: Range<'_>) -> Option<AnimateTarget> {
    let scalars = |from: &str, to: &str| {
        Some((scalar_value(attribute, from)?, scalar_value(attribute, to)?))
    };

    match (attribute, range) {
        // Dashoffset animations drive a stroke reveal; a growing offset retracts.
        ("stroke-dashoffset", range) => {
            let (from, to) = match range {
                Range::Numbers(from, to) => (from, to),
                Range::Text(from, to) => scalars(from, to)?,
            };
            Some(AnimateTarget::StrokeDraw { reverse: from < to })
        }
        ("fill", Range::Text(from, to)) => Some(AnimateTarget::Fill {
            from: color_value(from)?,
            to: color_value(to)?,
        }),
        ("stroke", Range::Text(from, to)) => Some(AnimateTarget::Stroke {
            from: color_value(from)?,
            to: color_value(to)?,
        }),
        ("stroke-dasharray", Range::Text(from, to)) => Some(AnimateTarget::StrokeDasharray {
            from: parse_dasharray(from).unwrap_or_default(),
            to: parse_dasharray(to).unwrap_or_default(),
        }),
        ("d", Range::Text(from, to)) => Some(AnimateTarget::D {
            from: parse_path(from),
            to: parse_path(to),
        }),
        ("points", Range::Text(from, to)) => Some(AnimateTarget::Points {
            from: parse_points(from),
            to: parse_points(to),
        }),
        (_, Range::Numbers(from, to)) => AnimateTarget::scalar(attribute, from, to),
        (_, Range::Text(from, to)) => {
            let (from, to) = scalars(from, to)?;
            AnimateTarget::scalar(attribute, from, to)
        }
    }
}

// ==================== Elements ====================

fn animate(attrs: &Attributes<'_>, parent: &Attributes<'_>) -> Option<SvgAnimate> {
    let attribute = attrs.get("attributeName")?.trim();
    let range = range(attrs, parent.get(attribute))?;
    Some(SvgAnimate::new(target(attribute, range)?, timing(attrs)))
}

/// `<set>` holds its `to` value for the active duration.
fn set(attrs: &Attributes<'_>) -> Option<SvgAnimate> {
    let attribute = attrs.get("attributeName")?.trim();
    let to = attrs.get("to")?;
    let target = target(attribute, Range::Text(to, to))?;
    let timing = AnimateTiming {
        calc_mode: CalcMode::Discrete,
        ..timing(attrs)
    };
    Some(SvgAnimate::new(target, timing))
}

fn animate_transform(attrs: &Attributes<'_>) -> Option<SvgAnimate> {
    let kind = attrs
        .get("type")
        .map_or(Some(TransformType::Translate), TransformType::parse)?;
    let (from, to) = match range(attrs, None)? {
        Range::Text(from, to) => (parse_numbers(from), parse_numbers(to)),
        Range::Numbers(from, to) => (vec![from], vec![to]),
    };
    if from.is_empty() || to.is_empty() {
        return None;
    }
    let target = AnimateTarget::Transform { kind, from, to };
    Some(SvgAnimate::new(target, timing(attrs)))
}

fn motion_rotate(value: Option<&str>) -> MotionRotate {
    match value.map(str::trim) {
        Some("auto") => MotionRotate::Auto,
        Some("auto-reverse") => MotionRotate::AutoReverse,
        Some(angle) => parse_number(angle).map_or_else(MotionRotate::default, MotionRotate::Angle),
        None => MotionRotate::default(),
    }
}

/// Motion path from point lists: a move to the first point, lines after.
fn points_path(points: &[(f32, f32)]) -> Vec<PathCommand> {
    points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            if i == 0 {
                PathCommand::MoveTo(x, y)
            } else {
                PathCommand::LineTo(x, y)
            }
        })
        .collect()
}

fn animate_motion(element: &Element<'_>, motion_paths: &MotionPaths) -> Option<SvgAnimate> {
    let attrs = &element.attributes;
    let mpath = || {
        element
            .children()
            .find(|c| c.local_name() == "mpath")
            .and_then(|m| {
                m.attributes
                    .get_any(&["href", "xlink:href"])
                    .and_then(parse_href)
                    .map(str::to_string)
            })
    };

    let path = if let Some(d) = attrs.get("path") {
        parse_path(d)
    } else if let Some(id) = mpath() {
        match motion_paths.get(&id) {
            Some(path) => path.clone(),
            None => {
                debug!(id = %id, "Unknown mpath reference");
                return None;
            }
        }
    } else {
        let values = values_list(attrs);
        let points: Vec<(f32, f32)> = match (attrs.get("from"), attrs.get("to")) {
            (Some(from), Some(to)) => parse_points(from).into_iter().chain(parse_points(to)).collect(),
            _ => values.iter().flat_map(|v| parse_points(v)).collect(),
        };
        points_path(&points)
    };
    if path.is_empty() {
        return None;
    }

    let target = AnimateTarget::Motion {
        path,
        rotate: motion_rotate(attrs.get("rotate")),
    };
    let mut timing = timing(attrs);
    if attrs.get("calcMode").is_none() {
        timing.calc_mode = CalcMode::Paced;
    }
    Some(SvgAnimate::new(target, timing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgkit_xml::find_element;

    fn animations(src: &str) -> Vec<SvgAnimate> {
        let element = find_element(src, "circle")
            .or_else(|| find_element(src, "g"))
            .unwrap();
        smil_animations(&element, &MotionPaths::new())
    }

    fn single(src: &str) -> SvgAnimate {
        let mut list = animations(src);
        assert_eq!(list.len(), 1, "{src}");
        list.remove(0)
    }

    #[test]
    fn test_from_to_opacity() {
        let a = single(
            r#"<circle r="5"><animate attributeName="opacity" from="0" to="1" dur="1s"/></circle>"#,
        );
        assert_eq!(a.target, AnimateTarget::Opacity { from: 0.0, to: 1.0 });
        assert_eq!(a.timing.dur, Dur::Ms(1000));
        assert_eq!(a.timing.delay_ms, 0);
        assert_eq!(a.timing.iterations, Iterations::Count(1));
        assert_eq!(a.timing.calc_mode, CalcMode::Linear);
    }

    #[test]
    fn test_oscillating_values_use_extremes() {
        let a = single(
            r#"<circle><animate attributeName="opacity" values="1;0.5;1" dur="2s"/></circle>"#,
        );
        assert_eq!(a.target, AnimateTarget::Opacity { from: 0.5, to: 1.0 });
    }

    #[test]
    fn test_from_to_beats_values() {
        let a = single(
            r#"<circle><animate attributeName="r" from="1" to="2" values="0;9" dur="1s"/></circle>"#,
        );
        assert_eq!(a.target, AnimateTarget::R { from: 1.0, to: 2.0 });
    }

    #[test]
    fn test_single_value_list() {
        let a = single(r#"<circle><animate attributeName="cx" values="7" dur="1s"/></circle>"#);
        assert_eq!(a.target, AnimateTarget::Cx { from: 7.0, to: 7.0 });
    }

    #[test]
    fn test_to_only_uses_base_value() {
        let a = single(r#"<circle cx="3"><animate attributeName="cx" to="9" dur="1s"/></circle>"#);
        assert_eq!(a.target, AnimateTarget::Cx { from: 3.0, to: 9.0 });
        let b = single(r#"<circle cx="3"><animate attributeName="cx" by="2" dur="1s"/></circle>"#);
        assert_eq!(b.target, AnimateTarget::Cx { from: 3.0, to: 5.0 });
    }

    #[test]
    fn test_timing_attributes() {
        let a = single(
            r#"<circle><animate attributeName="r" from="0" to="1" dur="500ms" begin="0.2s"
                repeatCount="2.5" fill="freeze" calcMode="spline"
                keySplines="0.42 0 0.58 1; 0 0 1 1"/></circle>"#,
        );
        assert_eq!(a.timing.dur, Dur::Ms(500));
        assert_eq!(a.timing.delay_ms, 200);
        assert_eq!(a.timing.iterations, Iterations::Count(3));
        assert_eq!(a.timing.fill_mode, AnimationFillMode::Forwards);
        assert_eq!(a.timing.calc_mode, CalcMode::Spline(KeySplines::EASE_IN_OUT));
    }

    #[test]
    fn test_indefinite_values() {
        let a = single(
            r#"<circle><animate attributeName="r" from="0" to="1" repeatCount="indefinite"/></circle>"#,
        );
        assert_eq!(a.timing.dur, Dur::Indefinite);
        assert_eq!(a.timing.iterations, Iterations::Infinite);
    }

    #[test]
    fn test_dashoffset_becomes_stroke_draw() {
        let drawing = single(
            r#"<circle><animate attributeName="stroke-dashoffset" from="100" to="0" dur="1s"/></circle>"#,
        );
        assert_eq!(drawing.target, AnimateTarget::StrokeDraw { reverse: false });
        let retracting = single(
            r#"<circle><animate attributeName="stroke-dashoffset" from="0" to="100" dur="1s"/></circle>"#,
        );
        assert_eq!(retracting.target, AnimateTarget::StrokeDraw { reverse: true });
    }

    #[test]
    fn test_color_and_list_targets() {
        let list = animations(
            r##"<g>
                <animateColor attributeName="fill" from="#f00" to="blue" dur="1s"/>
                <animate attributeName="stroke-dasharray" values="5 3;10 1" dur="1s"/>
                <animate attributeName="d" from="M0 0L1 1" to="M0 0L2 2" dur="1s"/>
                <animate attributeName="points" from="0,0 1,1" to="2,2 3,3" dur="1s"/>
            </g>"##,
        );
        assert_eq!(list.len(), 4);
        assert_eq!(
            list[0].target,
            AnimateTarget::Fill {
                from: 0xFFFF_0000,
                to: 0xFF00_00FF
            }
        );
        assert_eq!(
            list[1].target,
            AnimateTarget::StrokeDasharray {
                from: vec![5.0, 3.0],
                to: vec![10.0, 1.0]
            }
        );
        assert!(matches!(&list[2].target, AnimateTarget::D { from, to } if from.len() == 2 && to.len() == 2));
        assert!(matches!(&list[3].target, AnimateTarget::Points { to, .. } if to[1] == (3.0, 3.0)));
    }

    #[test]
    fn test_animate_transform() {
        let a = single(
            r#"<g><animateTransform attributeName="transform" type="rotate"
                from="0 12 12" to="360 12 12" dur="2s" repeatCount="indefinite"/></g>"#,
        );
        assert_eq!(
            a.target,
            AnimateTarget::Transform {
                kind: TransformType::Rotate,
                from: vec![0.0, 12.0, 12.0],
                to: vec![360.0, 12.0, 12.0]
            }
        );
        let list = animations(r#"<g><animateTransform attributeName="transform" type="matrix" from="1" to="2"/></g>"#);
        assert!(list.is_empty());
    }

    #[test]
    fn test_set() {
        let a = single(r#"<circle><set attributeName="opacity" to="0.25" begin="1s"/></circle>"#);
        assert_eq!(a.target, AnimateTarget::Opacity { from: 0.25, to: 0.25 });
        assert_eq!(a.timing.calc_mode, CalcMode::Discrete);
        assert_eq!(a.timing.delay_ms, 1000);
    }

    #[test]
    fn test_animate_motion() {
        let a = single(
            r#"<circle><animateMotion path="M0 0 L10 0" dur="1s" rotate="auto"/></circle>"#,
        );
        assert!(matches!(a.target, AnimateTarget::Motion { rotate: MotionRotate::Auto, ref path } if path.len() == 2));
        assert_eq!(a.timing.calc_mode, CalcMode::Paced);

        let mut paths = MotionPaths::new();
        paths.insert("track".into(), parse_path("M0 0 H5"));
        let src = r##"<circle><animateMotion dur="1s" rotate="30"><mpath href="#track"/></animateMotion></circle>"##;
        let list = smil_animations(&find_element(src, "circle").unwrap(), &paths);
        assert!(matches!(list[0].target, AnimateTarget::Motion { rotate: MotionRotate::Angle(deg), .. } if deg == 30.0));

        let pts = single(r#"<circle><animateMotion values="0,0; 5,5; 10,0" dur="1s"/></circle>"#);
        assert!(matches!(pts.target, AnimateTarget::Motion { ref path, .. } if path.len() == 3));
    }

    #[test]
    fn test_unsupported_skipped() {
        let list = animations(
            r#"<circle>
                <animate attributeName="font-size" from="1" to="2" dur="1s"/>
                <animate from="1" to="2" dur="1s"/>
                <animate attributeName="r" dur="1s"/>
                <animate attributeName="r" from="0" to="4" dur="1s"/>
            </circle>"#,
        );
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].target, AnimateTarget::R { from: 0.0, to: 4.0 });
    }
}
