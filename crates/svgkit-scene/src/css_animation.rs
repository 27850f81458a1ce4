//! CSS animation translator.
//!
//! Combines the cascaded `animation` shorthand and longhands of one element
//! with the referenced `@keyframes` sets. Each keyframe set contributes one
//! [`SvgAnimate`] per property, built from its first and last keyframes.

use crate::animation::{
    AnimateTarget, AnimateTiming, AnimationDirection, AnimationFillMode, CalcMode, Dur,
    Iterations, KeySplines, StepPosition, SvgAnimate,
};
use crate::color::SvgColor;
use crate::transform::TransformType;
use crate::values::{parse_dasharray, parse_duration_ms, parse_length, parse_number, parse_opacity};
use svgkit_css::{StyleDeclarations, Stylesheet};
use svgkit_path::{parse_path, PathCommand};
use tracing::debug;

/// One entry of the `animation` property list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationShorthand {
    pub name: Option<String>,
    pub duration_ms: Option<u64>,
    pub delay_ms: Option<u64>,
    pub timing: Option<CalcMode>,
    pub iterations: Option<Iterations>,
    pub direction: Option<AnimationDirection>,
    pub fill_mode: Option<AnimationFillMode>,
}

impl AnimationShorthand {
    /// Timing with CSS initial values for everything unset.
    pub fn timing(&self) -> AnimateTiming {
        AnimateTiming {
            dur: Dur::Ms(self.duration_ms.unwrap_or(0)),
            delay_ms: self.delay_ms.unwrap_or(0),
            calc_mode: self.timing.unwrap_or(CalcMode::Spline(KeySplines::EASE)),
            iterations: self.iterations.unwrap_or_default(),
            direction: self.direction.unwrap_or_default(),
            fill_mode: self.fill_mode.unwrap_or_default(),
        }
    }
}

// ==================== Timing functions ====================

/// Split on commas outside parentheses.
fn split_top_level(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(value[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(value[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

fn step_position(value: &str) -> Option<StepPosition> {
    match value.trim() {
        "start" | "jump-start" => Some(StepPosition::Start),
        "end" | "jump-end" => Some(StepPosition::End),
        "jump-none" => Some(StepPosition::JumpNone),
        "jump-both" => Some(StepPosition::JumpBoth),
        _ => None,
    }
}

/// Parse one timing function.
pub fn parse_timing_function(value: &str) -> Option<CalcMode> {
    let value = value.trim();
    if let Some(args) = function_args(value, "cubic-bezier") {
        let numbers = args
            .split(',')
            .map(parse_number)
            .collect::<Option<Vec<f32>>>()?;
        return KeySplines::from_slice(&numbers).map(CalcMode::Spline);
    }
    if let Some(args) = function_args(value, "steps") {
        let mut parts = args.split(',');
        let count = parts
            .next()
            .and_then(|c| c.trim().parse::<u32>().ok())
            .filter(|c| *c > 0)?;
        let position = match parts.next() {
            Some(p) => step_position(p)?,
            None => StepPosition::End,
        };
        return Some(CalcMode::Steps { count, position });
    }
    match value {
        "linear" => Some(CalcMode::Linear),
        "step-start" => Some(CalcMode::Steps {
            count: 1,
            position: StepPosition::Start,
        }),
        "step-end" => Some(CalcMode::Steps {
            count: 1,
            position: StepPosition::End,
        }),
        _ => KeySplines::named(value).map(CalcMode::Spline),
    }
}

/// Arguments of `name(...)`, when `value` is that function.
fn function_args<'v>(value: &'v str, name: &str) -> Option<&'v str> {
    value
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Start of a `name(` call that begins a token, so `footsteps-fade` is not
/// taken for `steps(...)`.
fn find_function(text: &str, name: &str) -> Option<usize> {
    text.match_indices(name).map(|(i, _)| i).find(|&i| {
        let starts_token = text[..i]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace() || c == ',');
        starts_token && text[i + name.len()..].trim_start().starts_with('(')
    })
}

fn parse_iterations(value: &str) -> Option<Iterations> {
    if value == "infinite" {
        return Some(Iterations::Infinite);
    }
    let n = parse_number(value).filter(|n| *n >= 0.0)?;
    Some(Iterations::Count(n.ceil() as u32))
}

/// A time token needs its unit; bare numbers are iteration counts.
fn parse_time(value: &str) -> Option<u64> {
    if value.ends_with('s') {
        parse_duration_ms(value)
    } else {
        None
    }
}

// ==================== Shorthand ====================

/// Parse one entry of the `animation` shorthand.
///
/// Timing functions are pulled out first since they contain spaces and
/// commas. The remaining tokens are typed by their form: the first time is
/// the duration and the second the delay.
pub fn parse_animation_shorthand(value: &str) -> AnimationShorthand {
    let mut shorthand = AnimationShorthand::default();
    let mut rest = value.to_string();

    for function in ["cubic-bezier", "steps"] {
        let Some(start) = find_function(&rest, function) else {
            continue;
        };
        let Some(end) = rest[start..].find(')').map(|i| start + i + 1) else {
            continue;
        };
        shorthand.timing = parse_timing_function(&rest[start..end]);
        rest.replace_range(start..end, " ");
    }

    for token in rest.split_whitespace() {
        if let Some(ms) = parse_time(token) {
            if shorthand.duration_ms.is_none() {
                shorthand.duration_ms = Some(ms);
            } else if shorthand.delay_ms.is_none() {
                shorthand.delay_ms = Some(ms);
            }
        } else if let Some(iterations) = parse_iterations(token).filter(|_| shorthand.iterations.is_none()) {
            shorthand.iterations = Some(iterations);
        } else if let Some(timing) = parse_timing_function(token).filter(|_| shorthand.timing.is_none()) {
            shorthand.timing = Some(timing);
        } else if let Some(direction) =
            AnimationDirection::parse(token).filter(|_| shorthand.direction.is_none())
        {
            shorthand.direction = Some(direction);
        } else if let Some(fill) = AnimationFillMode::parse(token).filter(|_| shorthand.fill_mode.is_none()) {
            shorthand.fill_mode = Some(fill);
        } else if matches!(token, "running" | "paused") {
            // play state
        } else if shorthand.name.is_none() {
            shorthand.name = Some(token.to_string());
        } else {
            debug!(token, "Unused animation shorthand token");
        }
    }
    shorthand
}

/// Every animation declared on an element, shorthand first, longhands over it.
pub fn animation_entries(decls: &StyleDeclarations) -> Vec<AnimationShorthand> {
    let mut shorthands: Vec<AnimationShorthand> = decls
        .value("animation")
        .map(|v| split_top_level(v).into_iter().map(parse_animation_shorthand).collect())
        .unwrap_or_default();

    if let Some(names) = decls.value("animation-name") {
        let names = split_top_level(names);
        shorthands.resize_with(names.len(), AnimationShorthand::default);
        for (shorthand, name) in shorthands.iter_mut().zip(names) {
            shorthand.name = Some(name.to_string());
        }
    }

    // Shorter longhand lists repeat to cover every animation.
    fn longhand<T: Copy>(
        decls: &StyleDeclarations,
        property: &str,
        shorthands: &mut [AnimationShorthand],
        parse: impl Fn(&str) -> Option<T>,
        mut apply: impl FnMut(&mut AnimationShorthand, T),
    ) {
        let Some(value) = decls.value(property) else {
            return;
        };
        let values: Vec<Option<T>> = split_top_level(value).into_iter().map(parse).collect();
        if values.is_empty() {
            return;
        }
        for (i, shorthand) in shorthands.iter_mut().enumerate() {
            if let Some(v) = values[i % values.len()] {
                apply(shorthand, v);
            }
        }
    }

    longhand(decls, "animation-duration", &mut shorthands, parse_time, |s, v| {
        s.duration_ms = Some(v)
    });
    longhand(decls, "animation-delay", &mut shorthands, parse_time, |s, v| {
        s.delay_ms = Some(v)
    });
    longhand(decls, "animation-timing-function", &mut shorthands, parse_timing_function, |s, v| {
        s.timing = Some(v)
    });
    longhand(decls, "animation-iteration-count", &mut shorthands, parse_iterations, |s, v| {
        s.iterations = Some(v)
    });
    longhand(decls, "animation-direction", &mut shorthands, AnimationDirection::parse, |s, v| {
        s.direction = Some(v)
    });
    longhand(decls, "animation-fill-mode", &mut shorthands, AnimationFillMode::parse, |s, v| {
        s.fill_mode = Some(v)
    });

    shorthands.retain(|s| s.name.as_deref().is_some_and(|n| n != "none"));
    shorthands
}

// ==================== Keyframes ====================

/// Translate the CSS animations of one element.
pub fn css_animations(decls: &StyleDeclarations, stylesheet: &Stylesheet) -> Vec<SvgAnimate> {
    let mut out = Vec::new();
    for shorthand in animation_entries(decls) {
        let Some(name) = shorthand.name.as_deref() else {
            continue;
        };
        let Some(set) = stylesheet.keyframes(name) else {
            debug!(name, "Unknown @keyframes");
            continue;
        };
        let timing = shorthand.timing();
        for property in set.properties() {
            let frames = set.property_frames(property);
            let (Some(&(_, from)), Some(&(_, to))) = (frames.first(), frames.last()) else {
                continue;
            };
            if frames.len() < 2 {
                debug!(name, property, "Keyframe property needs two keyframes");
                continue;
            }
            match keyframe_target(property, from, to) {
                Some(target) => out.push(SvgAnimate::new(target, timing)),
                None => debug!(name, property, from, to, "Keyframe property skipped"),
            }
        }
    }
    out
}

fn color_value(value: &str) -> Option<u32> {
    match SvgColor::parse(value) {
        SvgColor::Argb(c) => Some(c),
        SvgColor::None => SvgColor::TRANSPARENT.argb(),
        _ => None,
    }
}

/// `d: path("...")` value.
fn path_value(value: &str) -> Option<Vec<PathCommand>> {
    let inner = function_args(value.trim(), "path")?.trim();
    let data = inner.trim_matches(|c| c == '"' || c == '\'');
    let path = parse_path(data);
    (!path.is_empty()).then_some(path)
}

/// An angle in degrees from `deg`, `rad`, `turn` or a bare number.
fn angle(value: &str) -> Option<f32> {
    let value = value.trim();
    if let Some(n) = value.strip_suffix("deg") {
        parse_number(n)
    } else if let Some(n) = value.strip_suffix("rad") {
        parse_number(n).map(f32::to_degrees)
    } else if let Some(n) = value.strip_suffix("turn") {
        parse_number(n).map(|t| t * 360.0)
    } else {
        parse_number(value)
    }
}

/// A single CSS transform function as a type and its values.
fn transform_value(value: &str) -> Option<(TransformType, Vec<f32>)> {
    let value = value.trim();
    let open = value.find('(')?;
    let name = value[..open].trim();
    let args: Vec<&str> = value[open + 1..]
        .strip_suffix(')')?
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    let lengths = || args.iter().map(|a| parse_length(a)).collect::<Option<Vec<f32>>>();
    let numbers = || args.iter().map(|a| parse_number(a)).collect::<Option<Vec<f32>>>();
    let one = |v: Option<Vec<f32>>| v.filter(|v| v.len() == 1).map(|v| v[0]);

    let result = match name {
        "translate" => (TransformType::Translate, lengths()?),
        "translateX" => (TransformType::Translate, vec![one(lengths())?, 0.0]),
        "translateY" => (TransformType::Translate, vec![0.0, one(lengths())?]),
        "scale" => (TransformType::Scale, numbers()?),
        "scaleX" => (TransformType::Scale, vec![one(numbers())?, 1.0]),
        "scaleY" => (TransformType::Scale, vec![1.0, one(numbers())?]),
        "rotate" => (TransformType::Rotate, vec![angle(args.first()?)?]),
        "skewX" => (TransformType::SkewX, vec![angle(args.first()?)?]),
        "skewY" => (TransformType::SkewY, vec![angle(args.first()?)?]),
        _ => return None,
    };
    (!result.1.is_empty()).then_some(result)
}

/// Build the target of one keyframe property.
fn keyframe_target(property: &str, from: &str, to: &str) -> Option<AnimateTarget> {
    match property {
        "fill" => Some(AnimateTarget::Fill {
            from: color_value(from)?,
            to: color_value(to)?,
        }),
        "stroke" => Some(AnimateTarget::Stroke {
            from: color_value(from)?,
            to: color_value(to)?,
        }),
        "stroke-dasharray" => Some(AnimateTarget::StrokeDasharray {
            from: parse_dasharray(from).unwrap_or_default(),
            to: parse_dasharray(to).unwrap_or_default(),
        }),
        "transform" => {
            let (kind, from) = transform_value(from)?;
            let (to_kind, to) = transform_value(to)?;
            (kind == to_kind).then_some(AnimateTarget::Transform { kind, from, to })
        }
        "d" => Some(AnimateTarget::D {
            from: path_value(from)?,
            to: path_value(to)?,
        }),
        "opacity" | "fill-opacity" | "stroke-opacity" => {
            AnimateTarget::scalar(property, parse_opacity(from)?, parse_opacity(to)?)
        }
        _ => AnimateTarget::scalar(property, parse_length(from)?, parse_length(to)?),
    }
}
