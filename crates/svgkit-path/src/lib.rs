//! # SvgKit Path
//!
//! SVG path data (`d` attribute) parsing for the SvgKit scene engine.
//!
//! ## Features
//!
//! - **Tokenizer**: Splits path data into command letters and numbers
//! - **Number lists**: The same number rules for points and transform arguments
//! - **Lenient parsing**: Best-effort command list for arbitrary external input
//! - **Strict parsing**: Typed errors for hand-authored path data
//! - **Serialization**: Write commands back to path data
//! - **Normalization**: Resolve relative and smooth commands to absolute segments
//!
//! ## Example
//!
//! ```
//! use svgkit_path::{parse_path, PathCommand};
//!
//! let commands = parse_path("M0 0 10 10 20 20");
//! assert_eq!(commands[1], PathCommand::LineTo(10.0, 10.0));
//! ```

mod absolute;
mod parser;
mod tokenizer;
mod writer;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use absolute::{to_absolute, Point, Segment};
pub use parser::{parse_path, parse_path_strict};
pub use tokenizer::parse_numbers;
pub use writer::to_path_string;

// ==================== Errors ====================

/// Errors raised by [`parse_path_strict`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathParseError {
    #[error("Incomplete path: a command is missing numeric arguments")]
    IncompletePath,

    #[error("Bad number in path data: {0:?}")]
    BadNumber(String),

    #[error("Path data must start with a moveto command")]
    MissingMoveTo,

    #[error("Unknown path command: {0:?}")]
    UnknownCommand(char),
}

// ==================== Commands ====================

/// A single path command, mirroring the SVG path minilanguage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Move to (absolute).
    MoveTo(f32, f32),
    /// Move to (relative).
    MoveToRel(f32, f32),
    /// Line to (absolute).
    LineTo(f32, f32),
    /// Line to (relative).
    LineToRel(f32, f32),
    /// Horizontal line (absolute).
    HorizontalTo(f32),
    /// Horizontal line (relative).
    HorizontalToRel(f32),
    /// Vertical line (absolute).
    VerticalTo(f32),
    /// Vertical line (relative).
    VerticalToRel(f32),
    /// Cubic bezier (absolute).
    CubicTo(f32, f32, f32, f32, f32, f32),
    /// Cubic bezier (relative).
    CubicToRel(f32, f32, f32, f32, f32, f32),
    /// Smooth cubic bezier (absolute).
    SmoothCubicTo(f32, f32, f32, f32),
    /// Smooth cubic bezier (relative).
    SmoothCubicToRel(f32, f32, f32, f32),
    /// Quadratic bezier (absolute).
    QuadTo(f32, f32, f32, f32),
    /// Quadratic bezier (relative).
    QuadToRel(f32, f32, f32, f32),
    /// Smooth quadratic bezier (absolute).
    SmoothQuadTo(f32, f32),
    /// Smooth quadratic bezier (relative).
    SmoothQuadToRel(f32, f32),
    /// Arc (absolute): rx, ry, x-axis rotation, large-arc flag, sweep flag, x, y.
    ArcTo(f32, f32, f32, bool, bool, f32, f32),
    /// Arc (relative).
    ArcToRel(f32, f32, f32, bool, bool, f32, f32),
    /// Close path.
    Close,
}

impl PathCommand {
    /// The command letter as it appears in path data.
    pub fn letter(&self) -> char {
        match self {
            PathCommand::MoveTo(..) => 'M',
            PathCommand::MoveToRel(..) => 'm',
            PathCommand::LineTo(..) => 'L',
            PathCommand::LineToRel(..) => 'l',
            PathCommand::HorizontalTo(..) => 'H',
            PathCommand::HorizontalToRel(..) => 'h',
            PathCommand::VerticalTo(..) => 'V',
            PathCommand::VerticalToRel(..) => 'v',
            PathCommand::CubicTo(..) => 'C',
            PathCommand::CubicToRel(..) => 'c',
            PathCommand::SmoothCubicTo(..) => 'S',
            PathCommand::SmoothCubicToRel(..) => 's',
            PathCommand::QuadTo(..) => 'Q',
            PathCommand::QuadToRel(..) => 'q',
            PathCommand::SmoothQuadTo(..) => 'T',
            PathCommand::SmoothQuadToRel(..) => 't',
            PathCommand::ArcTo(..) => 'A',
            PathCommand::ArcToRel(..) => 'a',
            PathCommand::Close => 'Z',
        }
    }

    /// Whether two commands are of the same type (and therefore morphable).
    pub fn same_kind(&self, other: &PathCommand) -> bool {
        self.letter() == other.letter()
    }

    /// Check for a moveto, absolute or relative.
    pub fn is_move(&self) -> bool {
        matches!(self, PathCommand::MoveTo(..) | PathCommand::MoveToRel(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(PathCommand::MoveTo(0.0, 0.0).letter(), 'M');
        assert_eq!(PathCommand::ArcToRel(1.0, 1.0, 0.0, false, true, 2.0, 2.0).letter(), 'a');
        assert_eq!(PathCommand::Close.letter(), 'Z');
    }

    #[test]
    fn test_same_kind() {
        let a = PathCommand::CubicTo(0.0, 0.0, 1.0, 1.0, 2.0, 2.0);
        let b = PathCommand::CubicTo(5.0, 5.0, 6.0, 6.0, 7.0, 7.0);
        let c = PathCommand::CubicToRel(5.0, 5.0, 6.0, 6.0, 7.0, 7.0);
        assert!(a.same_kind(&b));
        assert!(!a.same_kind(&c));
    }
}
