//! Per-property interpolation.

use serde::{Deserialize, Serialize};
use svgkit_geometry::{stroke_draw_dash, PathMeasure, StrokeDash};
use svgkit_path::PathCommand;
use svgkit_scene::{argb, channels, AnimateTarget, MotionRotate, Point, SvgTransform};

/// Current value of one animated property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnimatedValue {
    /// Opacity, stroke width, dash offset and geometry attributes.
    Number(f32),
    Dasharray(Vec<f32>),
    /// Progressive stroke reveal. The dash pattern needs the path length and
    /// is absent when that is unknown.
    StrokeDraw {
        fraction: f32,
        dash: Option<StrokeDash>,
    },
    /// `0xAARRGGBB`.
    Color(u32),
    Path(Vec<PathCommand>),
    Points(Vec<Point>),
    Transform(SvgTransform),
    /// Position on a motion path and the rotation to apply, in degrees.
    Motion { x: f32, y: f32, angle: f32 },
}

/// Geometry an animation needs beyond its own descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalContext<'a> {
    /// Outline length of the animated element.
    pub path_length: Option<f32>,
    /// Measure of the motion path; measured on demand when absent.
    pub motion: Option<&'a PathMeasure>,
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Element-wise interpolation. The shorter list is padded by repeating its
/// last element.
pub fn lerp_list(from: &[f32], to: &[f32], t: f32) -> Vec<f32> {
    let len = from.len().max(to.len());
    (0..len)
        .map(|i| {
            let b = padded(to, i).or_else(|| padded(from, i)).unwrap_or(0.0);
            let a = padded(from, i).unwrap_or(b);
            lerp(a, b, t)
        })
        .collect()
}

/// Pairwise point interpolation with the same padding as [`lerp_list`].
pub fn lerp_points(from: &[Point], to: &[Point], t: f32) -> Vec<Point> {
    let len = from.len().max(to.len());
    (0..len)
        .filter_map(|i| {
            let b = padded(to, i).or_else(|| padded(from, i))?;
            let a = padded(from, i).unwrap_or(b);
            Some((lerp(a.0, b.0, t), lerp(a.1, b.1, t)))
        })
        .collect()
}

fn padded<T: Copy>(list: &[T], i: usize) -> Option<T> {
    list.get(i).or(list.last()).copied()
}

/// Interpolate each ARGB channel, rounding to the nearest value.
pub fn lerp_color(from: u32, to: u32, t: f32) -> u32 {
    let [fa, fr, fg, fb] = channels(from);
    let [ta, tr, tg, tb] = channels(to);
    let channel = |a: u8, b: u8| lerp(f32::from(a), f32::from(b), t).round().clamp(0.0, 255.0) as u8;
    argb(channel(fa, ta), channel(fr, tr), channel(fg, tg), channel(fb, tb))
}

/// Morph path data.
///
/// Paths with the same command sequence interpolate every argument, with
/// arc flags switching halfway. Any other pair switches from `from` to `to`
/// at 0.5.
pub fn morph_path(from: &[PathCommand], to: &[PathCommand], t: f32) -> Vec<PathCommand> {
    let compatible = from.len() == to.len() && from.iter().zip(to).all(|(a, b)| a.same_kind(b));
    if !compatible {
        return if t < 0.5 { from.to_vec() } else { to.to_vec() };
    }
    from.iter()
        .zip(to)
        .map(|(a, b)| morph_command(a, b, t))
        .collect()
}

fn morph_command(a: &PathCommand, b: &PathCommand, t: f32) -> PathCommand {
    use PathCommand::*;
    let l = |x: f32, y: f32| lerp(x, y, t);
    let flag = |x: bool, y: bool| if t < 0.5 { x } else { y };
    match (*a, *b) {
        (MoveTo(x0, y0), MoveTo(x1, y1)) => MoveTo(l(x0, x1), l(y0, y1)),
        (MoveToRel(x0, y0), MoveToRel(x1, y1)) => MoveToRel(l(x0, x1), l(y0, y1)),
        (LineTo(x0, y0), LineTo(x1, y1)) => LineTo(l(x0, x1), l(y0, y1)),
        (LineToRel(x0, y0), LineToRel(x1, y1)) => LineToRel(l(x0, x1), l(y0, y1)),
        (HorizontalTo(x0), HorizontalTo(x1)) => HorizontalTo(l(x0, x1)),
        (HorizontalToRel(x0), HorizontalToRel(x1)) => HorizontalToRel(l(x0, x1)),
        (VerticalTo(y0), VerticalTo(y1)) => VerticalTo(l(y0, y1)),
        (VerticalToRel(y0), VerticalToRel(y1)) => VerticalToRel(l(y0, y1)),
        (CubicTo(a1, a2, a3, a4, a5, a6), CubicTo(b1, b2, b3, b4, b5, b6)) => CubicTo(
            l(a1, b1),
            l(a2, b2),
            l(a3, b3),
            l(a4, b4),
            l(a5, b5),
            l(a6, b6),
        ),
        (CubicToRel(a1, a2, a3, a4, a5, a6), CubicToRel(b1, b2, b3, b4, b5, b6)) => CubicToRel(
            l(a1, b1),
            l(a2, b2),
            l(a3, b3),
            l(a4, b4),
            l(a5, b5),
            l(a6, b6),
        ),
        (SmoothCubicTo(a1, a2, a3, a4), SmoothCubicTo(b1, b2, b3, b4)) => {
            SmoothCubicTo(l(a1, b1), l(a2, b2), l(a3, b3), l(a4, b4))
        }
        (SmoothCubicToRel(a1, a2, a3, a4), SmoothCubicToRel(b1, b2, b3, b4)) => {
            SmoothCubicToRel(l(a1, b1), l(a2, b2), l(a3, b3), l(a4, b4))
        }
        (QuadTo(a1, a2, a3, a4), QuadTo(b1, b2, b3, b4)) => {
            QuadTo(l(a1, b1), l(a2, b2), l(a3, b3), l(a4, b4))
        }
        (QuadToRel(a1, a2, a3, a4), QuadToRel(b1, b2, b3, b4)) => {
            QuadToRel(l(a1, b1), l(a2, b2), l(a3, b3), l(a4, b4))
        }
        (SmoothQuadTo(x0, y0), SmoothQuadTo(x1, y1)) => SmoothQuadTo(l(x0, x1), l(y0, y1)),
        (SmoothQuadToRel(x0, y0), SmoothQuadToRel(x1, y1)) => {
            SmoothQuadToRel(l(x0, x1), l(y0, y1))
        }
        (ArcTo(rx0, ry0, r0, la0, s0, x0, y0), ArcTo(rx1, ry1, r1, la1, s1, x1, y1)) => ArcTo(
            l(rx0, rx1),
            l(ry0, ry1),
            l(r0, r1),
            flag(la0, la1),
            flag(s0, s1),
            l(x0, x1),
            l(y0, y1),
        ),
        (ArcToRel(rx0, ry0, r0, la0, s0, x0, y0), ArcToRel(rx1, ry1, r1, la1, s1, x1, y1)) => {
            ArcToRel(
                l(rx0, rx1),
                l(ry0, ry1),
                l(r0, r1),
                flag(la0, la1),
                flag(s0, s1),
                l(x0, x1),
                l(y0, y1),
            )
        }
        (Close, Close) => Close,
        // Kinds that do not pair up.
        _ => {
            if t < 0.5 {
                *a
            } else {
                *b
            }
        }
    }
}

/// Value of a target at eased progress `t`.
pub fn interpolate(target: &AnimateTarget, t: f32, ctx: EvalContext<'_>) -> AnimatedValue {
    match target {
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
        | AnimateTarget::Y2 { from, to } => AnimatedValue::Number(lerp(*from, *to, t)),
        AnimateTarget::StrokeDasharray { from, to } => AnimatedValue::Dasharray(lerp_list(from, to, t)),
        AnimateTarget::StrokeDraw { reverse } => {
            let fraction = if *reverse { 1.0 - t } else { t };
            AnimatedValue::StrokeDraw {
                fraction,
                dash: ctx.path_length.map(|len| stroke_draw_dash(len, fraction)),
            }
        }
        AnimateTarget::Fill { from, to } | AnimateTarget::Stroke { from, to } => {
            AnimatedValue::Color(lerp_color(*from, *to, t))
        }
        AnimateTarget::D { from, to } => AnimatedValue::Path(morph_path(from, to, t)),
        AnimateTarget::Points { from, to } => AnimatedValue::Points(lerp_points(from, to, t)),
        AnimateTarget::Transform { kind, from, to } => {
            let from = kind.arguments(from);
            let to = kind.arguments(to);
            AnimatedValue::Transform(kind.with_values(&lerp_list(&from, &to, t)))
        }
        AnimateTarget::Motion { path, rotate } => {
            let owned;
            let measure = match ctx.motion {
                Some(measure) => measure,
                None => {
                    owned = PathMeasure::from_commands(path);
                    &owned
                }
            };
            let Some(point) = measure.point_at_fraction(t) else {
                return AnimatedValue::Motion {
                    x: 0.0,
                    y: 0.0,
                    angle: 0.0,
                };
            };
            let angle = match rotate {
                MotionRotate::Angle(angle) => *angle,
                MotionRotate::Auto => point.angle,
                MotionRotate::AutoReverse => point.angle + 180.0,
            };
            AnimatedValue::Motion {
                x: point.x,
                y: point.y,
                angle,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgkit_path::parse_path;
    use svgkit_scene::TransformType;

    #[test]
    fn test_list_padding_repeats_last() {
        assert_eq!(lerp_list(&[0.0, 10.0], &[10.0, 20.0, 30.0], 0.5), vec![5.0, 15.0, 20.0]);
        assert_eq!(lerp_list(&[], &[4.0], 0.5), vec![4.0]);
    }

    #[test]
    fn test_points_padding() {
        let from = [(0.0, 0.0)];
        let to = [(10.0, 10.0), (20.0, 0.0)];
        assert_eq!(lerp_points(&from, &to, 0.5), vec![(5.0, 5.0), (10.0, 0.0)]);
    }

    #[test]
    fn test_color_channels() {
        assert_eq!(lerp_color(0xFF00_0000, 0xFFFF_FFFF, 0.5), 0xFF80_8080);
        assert_eq!(lerp_color(0x00FF_0000, 0xFF00_00FF, 0.0), 0x00FF_0000);
        assert_eq!(lerp_color(0x00FF_0000, 0xFF00_00FF, 1.0), 0xFF00_00FF);
    }

    #[test]
    fn test_morph_compatible_paths() {
        let from = parse_path("M0 0 L10 0 A5 5 0 0 1 0 0 Z");
        let to = parse_path("M10 10 L20 10 A7 7 0 1 0 5 5 Z");
        let mid = morph_path(&from, &to, 0.5);
        assert_eq!(mid[0], PathCommand::MoveTo(5.0, 5.0));
        assert_eq!(mid[1], PathCommand::LineTo(15.0, 5.0));
        assert_eq!(mid[2], PathCommand::ArcTo(6.0, 6.0, 0.0, true, false, 2.5, 2.5));
        assert_eq!(mid[3], PathCommand::Close);
    }

    #[test]
    fn test_morph_mismatch_switches_at_half() {
        let from = parse_path("M0 0 L10 0");
        let to = parse_path("M0 0 C1 1 2 2 3 3");
        assert_eq!(morph_path(&from, &to, 0.49), from);
        assert_eq!(morph_path(&from, &to, 0.5), to);

        let longer = parse_path("M0 0 L10 0 L10 10");
        assert_eq!(morph_path(&from, &longer, 0.2), from);
    }

    #[test]
    fn test_transform_value() {
        let target = AnimateTarget::Transform {
            kind: TransformType::Rotate,
            from: vec![0.0, 12.0, 12.0],
            to: vec![360.0, 12.0, 12.0],
        };
        assert_eq!(
            interpolate(&target, 0.25, EvalContext::default()),
            AnimatedValue::Transform(SvgTransform::Rotate {
                angle: 90.0,
                cx: 12.0,
                cy: 12.0
            })
        );
    }

    #[test]
    fn test_transform_missing_arguments() {
        let translate = AnimateTarget::Transform {
            kind: TransformType::Translate,
            from: vec![5.0],
            to: vec![10.0, 10.0],
        };
        assert_eq!(
            interpolate(&translate, 0.0, EvalContext::default()),
            AnimatedValue::Transform(SvgTransform::Translate { x: 5.0, y: 0.0 })
        );
        assert_eq!(
            interpolate(&translate, 0.5, EvalContext::default()),
            AnimatedValue::Transform(SvgTransform::Translate { x: 7.5, y: 5.0 })
        );

        // A bare angle rotates about the origin.
        let rotate = AnimateTarget::Transform {
            kind: TransformType::Rotate,
            from: vec![90.0],
            to: vec![0.0, 10.0, 10.0],
        };
        assert_eq!(
            interpolate(&rotate, 0.5, EvalContext::default()),
            AnimatedValue::Transform(SvgTransform::Rotate {
                angle: 45.0,
                cx: 5.0,
                cy: 5.0
            })
        );
    }

    #[test]
    fn test_morph_close_pairs() {
        let from = parse_path("M0 0 L4 0 Z");
        let to = parse_path("M0 2 L8 2 Z");
        for t in [0.0, 0.3, 0.7, 1.0] {
            assert_eq!(morph_path(&from, &to, t)[2], PathCommand::Close);
        }
        assert_eq!(morph_command(&PathCommand::Close, &PathCommand::Close, 0.2), PathCommand::Close);
    }

    #[test]
    fn test_stroke_draw() {
        let ctx = EvalContext {
            path_length: Some(40.0),
            motion: None,
        };
        let forward = interpolate(&AnimateTarget::StrokeDraw { reverse: false }, 0.25, ctx);
        assert_eq!(
            forward,
            AnimatedValue::StrokeDraw {
                fraction: 0.25,
                dash: Some(StrokeDash {
                    array: vec![40.0, 40.0],
                    offset: 30.0
                })
            }
        );
        let reverse = interpolate(&AnimateTarget::StrokeDraw { reverse: true }, 0.25, EvalContext::default());
        assert_eq!(
            reverse,
            AnimatedValue::StrokeDraw {
                fraction: 0.75,
                dash: None
            }
        );
    }

    #[test]
    fn test_motion_rotation() {
        let path = parse_path("M0 0 V10");
        let auto = AnimateTarget::Motion {
            path: path.clone(),
            rotate: MotionRotate::Auto,
        };
        assert_eq!(
            interpolate(&auto, 0.5, EvalContext::default()),
            AnimatedValue::Motion {
                x: 0.0,
                y: 5.0,
                angle: 90.0
            }
        );
        let reverse = AnimateTarget::Motion {
            path,
            rotate: MotionRotate::AutoReverse,
        };
        assert!(matches!(
            interpolate(&reverse, 1.0, EvalContext::default()),
            AnimatedValue::Motion { y, angle, .. } if y == 10.0 && angle == 270.0
        ));
    }
}
