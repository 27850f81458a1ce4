//! Path flattening and arc-length measurement.

use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use svgkit_path::{to_absolute, PathCommand, Point, Segment};

/// Line pieces per cubic or quadratic curve.
pub const CURVE_STEPS: usize = 20;

/// Line pieces per full turn of an elliptical arc.
pub const ARC_STEPS_PER_TURN: f32 = 64.0;

/// A position on a path with the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointOnPath {
    pub x: f32,
    pub y: f32,
    /// Tangent angle in degrees, clockwise from the x axis.
    pub angle: f32,
}

// ==================== Flattening ====================

fn cubic_points(p0: Point, p1: Point, p2: Point, p3: Point, out: &mut Vec<Point>) {
    for i in 1..=CURVE_STEPS {
        let t = i as f32 / CURVE_STEPS as f32;
        let mt = 1.0 - t;
        let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
        out.push((
            a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
            a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
        ));
    }
}

fn quad_points(p0: Point, p1: Point, p2: Point, out: &mut Vec<Point>) {
    for i in 1..=CURVE_STEPS {
        let t = i as f32 / CURVE_STEPS as f32;
        let mt = 1.0 - t;
        let (a, b, c) = (mt * mt, 2.0 * mt * t, t * t);
        out.push((a * p0.0 + b * p1.0 + c * p2.0, a * p0.1 + b * p1.1 + c * p2.1));
    }
}

/// Signed angle from `u` to `v`.
fn vector_angle(u: Point, v: Point) -> f32 {
    (u.0 * v.1 - u.1 * v.0).atan2(u.0 * v.0 + u.1 * v.1)
}

/// Flatten an elliptical arc using its centre parameterization.
///
/// Out-of-range radii are scaled up, a zero radius degrades to a line and an
/// arc to its own start point is dropped.
#[allow(clippy::too_many_arguments)]
fn arc_points(
    from: Point,
    rx: f32,
    ry: f32,
    rotation: f32,
    large_arc: bool,
    sweep: bool,
    to: Point,
    out: &mut Vec<Point>,
) {
    if from == to {
        return;
    }
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx == 0.0 || ry == 0.0 {
        out.push(to);
        return;
    }

    let (sin, cos) = rotation.to_radians().sin_cos();
    let dx2 = (from.0 - to.0) / 2.0;
    let dy2 = (from.1 - to.1) / 2.0;
    let x1p = cos * dx2 + sin * dy2;
    let y1p = -sin * dx2 + cos * dy2;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let (rx2, ry2) = (rx * rx, ry * ry);
    let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let mut coef = if den > 0.0 { (num / den).max(0.0).sqrt() } else { 0.0 };
    if large_arc == sweep {
        coef = -coef;
    }
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;
    let cx = cos * cxp - sin * cyp + (from.0 + to.0) / 2.0;
    let cy = sin * cxp + cos * cyp + (from.1 + to.1) / 2.0;

    let u = ((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = ((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let theta = vector_angle((1.0, 0.0), u);
    let mut delta = vector_angle(u, v);
    if !sweep && delta > 0.0 {
        delta -= TAU;
    } else if sweep && delta < 0.0 {
        delta += TAU;
    }

    let steps = ((delta.abs() / TAU) * ARC_STEPS_PER_TURN).ceil().max(1.0) as usize;
    for i in 1..steps {
        let t = theta + delta * i as f32 / steps as f32;
        let (st, ct) = t.sin_cos();
        out.push((
            cx + rx * ct * cos - ry * st * sin,
            cy + rx * ct * sin + ry * st * cos,
        ));
    }
    out.push(to);
}

/// Flatten absolute segments into one polyline per subpath.
///
/// Closed subpaths end with their start point.
pub fn flatten(segments: &[Segment]) -> Vec<Vec<Point>> {
    let mut polylines: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut pos: Point = (0.0, 0.0);
    let mut start: Point = (0.0, 0.0);

    for segment in segments {
        if current.is_empty() && !matches!(segment, Segment::MoveTo(_)) {
            current.push(pos);
        }
        match *segment {
            Segment::MoveTo(p) => {
                if current.len() > 1 {
                    polylines.push(std::mem::take(&mut current));
                }
                current.clear();
                current.push(p);
                start = p;
            }
            Segment::LineTo(p) => current.push(p),
            Segment::QuadTo(c, p) => quad_points(pos, c, p, &mut current),
            Segment::CubicTo(c1, c2, p) => cubic_points(pos, c1, c2, p, &mut current),
            Segment::ArcTo {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                to,
            } => arc_points(pos, rx, ry, x_axis_rotation, large_arc, sweep, to, &mut current),
            Segment::Close => {
                current.push(start);
                polylines.push(std::mem::take(&mut current));
                pos = start;
                continue;
            }
        }
        if let Some(end) = segment.end() {
            pos = end;
        }
    }
    if current.len() > 1 {
        polylines.push(current);
    }
    polylines
}

// ==================== Measurement ====================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Piece {
    from: Point,
    to: Point,
    /// Distance along the path where this piece starts.
    offset: f32,
    length: f32,
}

/// Arc-length table of a flattened path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathMeasure {
    pieces: Vec<Piece>,
    length: f32,
    /// First point of the path, for paths without length.
    start: Option<Point>,
}

impl PathMeasure {
    pub fn new(segments: &[Segment]) -> Self {
        let mut measure = PathMeasure {
            start: segments.iter().find_map(Segment::end),
            ..Default::default()
        };
        for polyline in flatten(segments) {
            for pair in polyline.windows(2) {
                let (from, to) = (pair[0], pair[1]);
                let length = (to.0 - from.0).hypot(to.1 - from.1);
                if length > 0.0 {
                    measure.pieces.push(Piece {
                        from,
                        to,
                        offset: measure.length,
                        length,
                    });
                    measure.length += length;
                }
            }
        }
        measure
    }

    pub fn from_commands(commands: &[PathCommand]) -> Self {
        Self::new(&to_absolute(commands))
    }

    /// Total length of every subpath.
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    /// Position at `distance` along the path, clamped to its ends.
    ///
    /// `None` only for a path with no points at all.
    pub fn point_at_length(&self, distance: f32) -> Option<PointOnPath> {
        let Some(last) = self.pieces.last() else {
            return self.start.map(|(x, y)| PointOnPath { x, y, angle: 0.0 });
        };
        let distance = distance.clamp(0.0, self.length);
        let index = self
            .pieces
            .partition_point(|p| p.offset + p.length < distance)
            .min(self.pieces.len() - 1);
        let piece = self.pieces.get(index).unwrap_or(last);

        let t = ((distance - piece.offset) / piece.length).clamp(0.0, 1.0);
        let (dx, dy) = (piece.to.0 - piece.from.0, piece.to.1 - piece.from.1);
        Some(PointOnPath {
            x: piece.from.0 + dx * t,
            y: piece.from.1 + dy * t,
            angle: dy.atan2(dx) * 180.0 / PI,
        })
    }

    /// Position at a fraction of the total length.
    pub fn point_at_fraction(&self, fraction: f32) -> Option<PointOnPath> {
        self.point_at_length(self.length * fraction)
    }
}
