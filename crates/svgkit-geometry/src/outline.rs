//! Drawable outlines of shape elements.

use serde::{Deserialize, Serialize};
use svgkit_path::PathCommand;
use svgkit_scene::{Point, SvgElement};

/// The shape a renderer draws for one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outline {
    /// Circle or ellipse.
    Oval { cx: f32, cy: f32, rx: f32, ry: f32 },
    /// Rect with rounded corners.
    RoundRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rx: f32,
        ry: f32,
    },
    /// Straight line sequence. Rects without radius and polygons are closed.
    Lines { points: Vec<Point>, closed: bool },
    /// Arbitrary path data.
    Path(Vec<PathCommand>),
}

impl Outline {
    /// Outline of a shape element, looking through wrappers.
    ///
    /// Containers, text, `<use>` and paint servers have none.
    pub fn from_element(element: &SvgElement) -> Option<Self> {
        let outline = match element.inner() {
            SvgElement::Circle(c) => Outline::Oval {
                cx: c.cx,
                cy: c.cy,
                rx: c.r,
                ry: c.r,
            },
            SvgElement::Ellipse(e) => Outline::Oval {
                cx: e.cx,
                cy: e.cy,
                rx: e.rx,
                ry: e.ry,
            },
            SvgElement::Rect(r) if r.has_radius() => Outline::RoundRect {
                x: r.x,
                y: r.y,
                width: r.width,
                height: r.height,
                rx: r.rx,
                ry: r.ry,
            },
            SvgElement::Rect(r) => Outline::Lines {
                points: vec![
                    (r.x, r.y),
                    (r.x + r.width, r.y),
                    (r.x + r.width, r.y + r.height),
                    (r.x, r.y + r.height),
                ],
                closed: true,
            },
            SvgElement::Line(l) => Outline::Lines {
                points: vec![(l.x1, l.y1), (l.x2, l.y2)],
                closed: false,
            },
            SvgElement::Polyline(p) => Outline::Lines {
                points: p.points.clone(),
                closed: false,
            },
            SvgElement::Polygon(p) => Outline::Lines {
                points: p.points.clone(),
                closed: true,
            },
            SvgElement::Path(p) => Outline::Path(p.commands.clone()),
            _ => return None,
        };
        Some(outline)
    }

    /// Path commands tracing the outline, starting at the same point a
    /// renderer would start stroking.
    pub fn to_commands(&self) -> Vec<PathCommand> {
        match self {
            Outline::Oval { cx, cy, rx, ry } => vec![
                PathCommand::MoveTo(cx + rx, *cy),
                PathCommand::ArcTo(*rx, *ry, 0.0, false, true, cx - rx, *cy),
                PathCommand::ArcTo(*rx, *ry, 0.0, false, true, cx + rx, *cy),
                PathCommand::Close,
            ],
            Outline::RoundRect {
                x,
                y,
                width,
                height,
                rx,
                ry,
            } => {
                let (right, bottom) = (x + width, y + height);
                let corner = |x, y| PathCommand::ArcTo(*rx, *ry, 0.0, false, true, x, y);
                vec![
                    PathCommand::MoveTo(x + rx, *y),
                    PathCommand::HorizontalTo(right - rx),
                    corner(right, y + ry),
                    PathCommand::VerticalTo(bottom - ry),
                    corner(right - rx, bottom),
                    PathCommand::HorizontalTo(x + rx),
                    corner(*x, bottom - ry),
                    PathCommand::VerticalTo(y + ry),
                    corner(x + rx, *y),
                    PathCommand::Close,
                ]
            }
            Outline::Lines { points, closed } => {
                let mut commands: Vec<PathCommand> = points
                    .iter()
                    .enumerate()
                    .map(|(i, &(x, y))| {
                        if i == 0 {
                            PathCommand::MoveTo(x, y)
                        } else {
                            PathCommand::LineTo(x, y)
                        }
                    })
                    .collect();
                if *closed && !commands.is_empty() {
                    commands.push(PathCommand::Close);
                }
                commands
            }
            Outline::Path(commands) => commands.clone(),
        }
    }

    pub fn is_closed(&self) -> bool {
        match self {
            Outline::Oval { .. } | Outline::RoundRect { .. } => true,
            Outline::Lines { closed, .. } => *closed,
            Outline::Path(commands) => matches!(commands.last(), Some(PathCommand::Close)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgkit_scene::{SvgCircle, SvgGroup, SvgPoly, SvgRect};

    #[test]
    fn test_circle_is_oval() {
        let el = SvgElement::Circle(SvgCircle {
            id: None,
            cx: 5.0,
            cy: 5.0,
            r: 2.0,
        });
        assert_eq!(
            Outline::from_element(&el),
            Some(Outline::Oval {
                cx: 5.0,
                cy: 5.0,
                rx: 2.0,
                ry: 2.0
            })
        );
    }

    #[test]
    fn test_rect_variants() {
        let plain = SvgElement::Rect(SvgRect {
            width: 4.0,
            height: 2.0,
            ..Default::default()
        });
        assert!(matches!(
            Outline::from_element(&plain),
            Some(Outline::Lines { ref points, closed: true }) if points.len() == 4
        ));

        let rounded = SvgElement::Rect(SvgRect {
            width: 4.0,
            height: 2.0,
            rx: 1.0,
            ry: 1.0,
            ..Default::default()
        });
        let outline = Outline::from_element(&rounded).unwrap();
        assert!(matches!(outline, Outline::RoundRect { .. }));
        let commands = outline.to_commands();
        assert_eq!(commands.first(), Some(&PathCommand::MoveTo(1.0, 0.0)));
        assert_eq!(commands.last(), Some(&PathCommand::Close));
    }

    #[test]
    fn test_polygon_closes_polyline_does_not() {
        let points = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
        let polygon = SvgElement::Polygon(SvgPoly {
            id: None,
            points: points.clone(),
        });
        let polyline = SvgElement::Polyline(SvgPoly { id: None, points });
        let polygon = Outline::from_element(&polygon).unwrap();
        let polyline = Outline::from_element(&polyline).unwrap();
        assert!(polygon.is_closed());
        assert!(!polyline.is_closed());
        assert_eq!(polygon.to_commands().len(), 4);
        assert_eq!(polyline.to_commands().len(), 3);
    }

    #[test]
    fn test_containers_have_no_outline() {
        assert_eq!(Outline::from_element(&SvgElement::Group(SvgGroup::default())), None);
    }
}
