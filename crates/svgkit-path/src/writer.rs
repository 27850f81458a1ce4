//! Path data serialization.

use crate::PathCommand;
use std::fmt::{self, Write};

fn flag(v: bool) -> u8 {
    u8::from(v)
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.letter();
        match *self {
            PathCommand::MoveTo(x, y)
            | PathCommand::MoveToRel(x, y)
            | PathCommand::LineTo(x, y)
            | PathCommand::LineToRel(x, y)
            | PathCommand::SmoothQuadTo(x, y)
            | PathCommand::SmoothQuadToRel(x, y) => write!(f, "{letter}{x} {y}"),
            PathCommand::HorizontalTo(v)
            | PathCommand::HorizontalToRel(v)
            | PathCommand::VerticalTo(v)
            | PathCommand::VerticalToRel(v) => write!(f, "{letter}{v}"),
            PathCommand::CubicTo(x1, y1, x2, y2, x, y)
            | PathCommand::CubicToRel(x1, y1, x2, y2, x, y) => {
                write!(f, "{letter}{x1} {y1} {x2} {y2} {x} {y}")
            }
            PathCommand::SmoothCubicTo(a, b, x, y)
            | PathCommand::SmoothCubicToRel(a, b, x, y)
            | PathCommand::QuadTo(a, b, x, y)
            | PathCommand::QuadToRel(a, b, x, y) => write!(f, "{letter}{a} {b} {x} {y}"),
            PathCommand::ArcTo(rx, ry, angle, large, sweep, x, y)
            | PathCommand::ArcToRel(rx, ry, angle, large, sweep, x, y) => write!(
                f,
                "{letter}{rx} {ry} {angle} {} {} {x} {y}",
                flag(large),
                flag(sweep)
            ),
            PathCommand::Close => write!(f, "{letter}"),
        }
    }
}

/// Serialize commands back to path data.
///
/// Every command is written with its own letter, so parsing the result
/// yields the same command list.
pub fn to_path_string(commands: &[PathCommand]) -> String {
    let mut out = String::with_capacity(commands.len() * 12);
    for (i, cmd) in commands.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{cmd}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_path;

    #[test]
    fn test_write_simple() {
        let commands = vec![
            PathCommand::MoveTo(0.0, 0.0),
            PathCommand::LineTo(10.5, -3.0),
            PathCommand::Close,
        ];
        assert_eq!(to_path_string(&commands), "M0 0 L10.5 -3 Z");
    }

    #[test]
    fn test_write_arc_flags() {
        let commands = vec![PathCommand::ArcToRel(5.0, 5.0, 30.0, true, false, 1.0, 2.0)];
        assert_eq!(to_path_string(&commands), "a5 5 30 1 0 1 2");
    }

    #[test]
    fn test_reparse_is_identity() {
        let inputs = [
            "M0 0 10 10 20 20",
            "m1.5.5 h-3 v.25 c1 2 3 4 5 6 s1 1 2 2 q0 1 2 3 t4 4 a5 5 0 1010 10 z",
            "M-1e-3 2E2 L.1 .2 Q1 1 2 2 T3 3 A10 20 45 0 1 -5 -5 Z M1 1 l1 1",
        ];
        for input in inputs {
            let commands = parse_path(input);
            assert!(!commands.is_empty());
            assert_eq!(parse_path(&to_path_string(&commands)), commands, "input: {input}");
        }
    }
}
