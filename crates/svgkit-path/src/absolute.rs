//! Normalization of path commands into absolute segments.

use crate::PathCommand;
use serde::{Deserialize, Serialize};

/// A 2D point in user space.
pub type Point = (f32, f32);

/// An absolute path segment.
///
/// Relative coordinates are resolved, horizontal/vertical lines become
/// lines and smooth curves get their reflected control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    /// Control point, end point.
    QuadTo(Point, Point),
    /// Two control points, end point.
    CubicTo(Point, Point, Point),
    ArcTo {
        rx: f32,
        ry: f32,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

impl Segment {
    /// End point of the segment, `None` for a close.
    pub fn end(&self) -> Option<Point> {
        match *self {
            Segment::MoveTo(p) | Segment::LineTo(p) => Some(p),
            Segment::QuadTo(_, p) | Segment::CubicTo(_, _, p) => Some(p),
            Segment::ArcTo { to, .. } => Some(to),
            Segment::Close => None,
        }
    }
}

fn reflect(control: Point, about: Point) -> Point {
    (2.0 * about.0 - control.0, 2.0 * about.1 - control.1)
}

/// Resolve a command list into absolute segments.
pub fn to_absolute(commands: &[PathCommand]) -> Vec<Segment> {
    let mut out = Vec::with_capacity(commands.len());
    let mut current: Point = (0.0, 0.0);
    let mut subpath_start: Point = (0.0, 0.0);
    // Last control point of the previous cubic or quad, for smooth reflection.
    let mut last_cubic: Option<Point> = None;
    let mut last_quad: Option<Point> = None;

    for cmd in commands {
        let (cx, cy) = current;
        let mut next_cubic = None;
        let mut next_quad = None;

        let segment = match *cmd {
            PathCommand::MoveTo(x, y) => {
                subpath_start = (x, y);
                Segment::MoveTo((x, y))
            }
            PathCommand::MoveToRel(dx, dy) => {
                subpath_start = (cx + dx, cy + dy);
                Segment::MoveTo(subpath_start)
            }
            PathCommand::LineTo(x, y) => Segment::LineTo((x, y)),
            PathCommand::LineToRel(dx, dy) => Segment::LineTo((cx + dx, cy + dy)),
            PathCommand::HorizontalTo(x) => Segment::LineTo((x, cy)),
            PathCommand::HorizontalToRel(dx) => Segment::LineTo((cx + dx, cy)),
            PathCommand::VerticalTo(y) => Segment::LineTo((cx, y)),
            PathCommand::VerticalToRel(dy) => Segment::LineTo((cx, cy + dy)),
            PathCommand::CubicTo(x1, y1, x2, y2, x, y) => {
                next_cubic = Some((x2, y2));
                Segment::CubicTo((x1, y1), (x2, y2), (x, y))
            }
            PathCommand::CubicToRel(x1, y1, x2, y2, x, y) => {
                let c2 = (cx + x2, cy + y2);
                next_cubic = Some(c2);
                Segment::CubicTo((cx + x1, cy + y1), c2, (cx + x, cy + y))
            }
            PathCommand::SmoothCubicTo(x2, y2, x, y) => {
                let c1 = last_cubic.map_or(current, |c| reflect(c, current));
                next_cubic = Some((x2, y2));
                Segment::CubicTo(c1, (x2, y2), (x, y))
            }
            PathCommand::SmoothCubicToRel(x2, y2, x, y) => {
                let c1 = last_cubic.map_or(current, |c| reflect(c, current));
                let c2 = (cx + x2, cy + y2);
                next_cubic = Some(c2);
                Segment::CubicTo(c1, c2, (cx + x, cy + y))
            }
            PathCommand::QuadTo(x1, y1, x, y) => {
                next_quad = Some((x1, y1));
                Segment::QuadTo((x1, y1), (x, y))
            }
            PathCommand::QuadToRel(x1, y1, x, y) => {
                let c = (cx + x1, cy + y1);
                next_quad = Some(c);
                Segment::QuadTo(c, (cx + x, cy + y))
            }
            PathCommand::SmoothQuadTo(x, y) => {
                let c = last_quad.map_or(current, |c| reflect(c, current));
                next_quad = Some(c);
                Segment::QuadTo(c, (x, y))
            }
            PathCommand::SmoothQuadToRel(x, y) => {
                let c = last_quad.map_or(current, |c| reflect(c, current));
                next_quad = Some(c);
                Segment::QuadTo(c, (cx + x, cy + y))
            }
            PathCommand::ArcTo(rx, ry, rot, large_arc, sweep, x, y) => Segment::ArcTo {
                rx,
                ry,
                x_axis_rotation: rot,
                large_arc,
                sweep,
                to: (x, y),
            },
            PathCommand::ArcToRel(rx, ry, rot, large_arc, sweep, x, y) => Segment::ArcTo {
                rx,
                ry,
                x_axis_rotation: rot,
                large_arc,
                sweep,
                to: (cx + x, cy + y),
            },
            PathCommand::Close => Segment::Close,
        };

        current = segment.end().unwrap_or(subpath_start);
        last_cubic = next_cubic;
        last_quad = next_quad;
        out.push(segment);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_path;

    #[test]
    fn test_relative_resolution() {
        let segments = to_absolute(&parse_path("m10 10 l5 0 v5 h-5 z"));
        assert_eq!(
            segments,
            vec![
                Segment::MoveTo((10.0, 10.0)),
                Segment::LineTo((15.0, 10.0)),
                Segment::LineTo((15.0, 15.0)),
                Segment::LineTo((10.0, 15.0)),
                Segment::Close,
            ]
        );
    }

    #[test]
    fn test_close_returns_to_subpath_start() {
        let segments = to_absolute(&parse_path("M5 5 L10 5 Z l1 1"));
        assert_eq!(segments[3], Segment::LineTo((6.0, 6.0)));
    }

    #[test]
    fn test_smooth_cubic_reflection() {
        let segments = to_absolute(&parse_path("M0 0 C0 10 10 10 10 0 S20 -10 20 0"));
        assert_eq!(
            segments[2],
            Segment::CubicTo((10.0, -10.0), (20.0, -10.0), (20.0, 0.0))
        );
    }

    #[test]
    fn test_smooth_without_previous_curve() {
        let segments = to_absolute(&parse_path("M3 4 T10 10"));
        assert_eq!(segments[1], Segment::QuadTo((3.0, 4.0), (10.0, 10.0)));
    }

    #[test]
    fn test_smooth_quad_chain() {
        let segments = to_absolute(&parse_path("M0 0 Q5 5 10 0 T20 0 T30 0"));
        assert_eq!(segments[2], Segment::QuadTo((15.0, -5.0), (20.0, 0.0)));
        assert_eq!(segments[3], Segment::QuadTo((25.0, 5.0), (30.0, 0.0)));
    }

    #[test]
    fn test_relative_arc() {
        let segments = to_absolute(&parse_path("M10 10 a5 5 0 0 1 10 0"));
        match segments[1] {
            Segment::ArcTo { to, sweep, .. } => {
                assert_eq!(to, (20.0, 10.0));
                assert!(sweep);
            }
            other => panic!("expected arc, got {other:?}"),
        }
    }
}
