//! Path command builder.
//!
//! One builder drives both entry points: the lenient one keeps whatever
//! commands were complete when an error was hit, the strict one reports the
//! error.

use crate::tokenizer::{is_command, Tokenizer};
use crate::{PathCommand, PathParseError};
use tracing::debug;

/// Token cursor with one slot of lookahead.
///
/// Arc flags may be written without separators (`a5 5 0 1010 10`), so a flag
/// read can consume a single character and push the remainder back.
struct Cursor<'a> {
    tokens: Tokenizer<'a>,
    peeked: Option<&'a str>,
}

impl<'a> Cursor<'a> {
    fn new(d: &'a str) -> Self {
        Self {
            tokens: Tokenizer::new(d),
            peeked: None,
        }
    }

    fn peek(&mut self) -> Option<&'a str> {
        if self.peeked.is_none() {
            self.peeked = self.tokens.next();
        }
        self.peeked
    }

    fn bump(&mut self) -> Option<&'a str> {
        self.peek();
        self.peeked.take()
    }

    /// Next token, which must be an argument rather than a command letter.
    fn argument(&mut self) -> Result<&'a str, PathParseError> {
        match self.peek() {
            None => Err(PathParseError::IncompletePath),
            Some(token) if is_command(token) => Err(PathParseError::IncompletePath),
            Some(_) => Ok(self.bump().unwrap_or_default()),
        }
    }

    fn number(&mut self) -> Result<f32, PathParseError> {
        let token = self.argument()?;
        token
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| PathParseError::BadNumber(token.to_string()))
    }

    fn flag(&mut self) -> Result<bool, PathParseError> {
        let token = self.argument()?;
        let mut chars = token.chars();
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| PathParseError::BadNumber(token.to_string()))?;
        let rest = chars.as_str();
        if !rest.is_empty() {
            self.peeked = Some(rest);
        }
        Ok(digit != 0)
    }

    fn pair(&mut self) -> Result<(f32, f32), PathParseError> {
        Ok((self.number()?, self.number()?))
    }
}

/// Read the arguments of one command.
fn read_command(letter: char, cursor: &mut Cursor<'_>) -> Result<PathCommand, PathParseError> {
    let cmd = match letter {
        'M' => {
            let (x, y) = cursor.pair()?;
            PathCommand::MoveTo(x, y)
        }
        'm' => {
            let (x, y) = cursor.pair()?;
            PathCommand::MoveToRel(x, y)
        }
        'L' => {
            let (x, y) = cursor.pair()?;
            PathCommand::LineTo(x, y)
        }
        'l' => {
            let (x, y) = cursor.pair()?;
            PathCommand::LineToRel(x, y)
        }
        'H' => PathCommand::HorizontalTo(cursor.number()?),
        'h' => PathCommand::HorizontalToRel(cursor.number()?),
        'V' => PathCommand::VerticalTo(cursor.number()?),
        'v' => PathCommand::VerticalToRel(cursor.number()?),
        'C' | 'c' => {
            let (x1, y1) = cursor.pair()?;
            let (x2, y2) = cursor.pair()?;
            let (x, y) = cursor.pair()?;
            if letter == 'C' {
                PathCommand::CubicTo(x1, y1, x2, y2, x, y)
            } else {
                PathCommand::CubicToRel(x1, y1, x2, y2, x, y)
            }
        }
        'S' | 's' => {
            let (x2, y2) = cursor.pair()?;
            let (x, y) = cursor.pair()?;
            if letter == 'S' {
                PathCommand::SmoothCubicTo(x2, y2, x, y)
            } else {
                PathCommand::SmoothCubicToRel(x2, y2, x, y)
            }
        }
        'Q' | 'q' => {
            let (x1, y1) = cursor.pair()?;
            let (x, y) = cursor.pair()?;
            if letter == 'Q' {
                PathCommand::QuadTo(x1, y1, x, y)
            } else {
                PathCommand::QuadToRel(x1, y1, x, y)
            }
        }
        'T' => {
            let (x, y) = cursor.pair()?;
            PathCommand::SmoothQuadTo(x, y)
        }
        't' => {
            let (x, y) = cursor.pair()?;
            PathCommand::SmoothQuadToRel(x, y)
        }
        'A' | 'a' => {
            let (rx, ry) = cursor.pair()?;
            let angle = cursor.number()?;
            let large_arc = cursor.flag()?;
            let sweep = cursor.flag()?;
            let (x, y) = cursor.pair()?;
            if letter == 'A' {
                PathCommand::ArcTo(rx, ry, angle, large_arc, sweep, x, y)
            } else {
                PathCommand::ArcToRel(rx, ry, angle, large_arc, sweep, x, y)
            }
        }
        'Z' | 'z' => PathCommand::Close,
        other => return Err(PathParseError::UnknownCommand(other)),
    };
    Ok(cmd)
}

fn is_known(letter: char) -> bool {
    "MmLlHhVvCcSsQqTtAaZz".contains(letter)
}

/// Command type used when a bare number follows a complete command.
fn repeated(letter: char) -> char {
    match letter {
        'M' => 'L',
        'm' => 'l',
        other => other,
    }
}

/// Build commands until the input ends or an error is hit.
fn build(d: &str) -> (Vec<PathCommand>, Option<PathParseError>) {
    let mut commands = Vec::new();
    let mut cursor = Cursor::new(d);
    let mut current: Option<char> = None;

    while let Some(token) = cursor.peek() {
        let letter = if is_command(token) {
            cursor.bump();
            token.chars().next().unwrap_or('?')
        } else {
            match current {
                None => return (commands, Some(PathParseError::MissingMoveTo)),
                Some('Z' | 'z') => {
                    return (commands, Some(PathParseError::BadNumber(token.to_string())))
                }
                Some(letter) => repeated(letter),
            }
        };

        if commands.is_empty() && !matches!(letter, 'M' | 'm') {
            let err = if is_known(letter) {
                PathParseError::MissingMoveTo
            } else {
                PathParseError::UnknownCommand(letter)
            };
            return (commands, Some(err));
        }

        match read_command(letter, &mut cursor) {
            Ok(cmd) => commands.push(cmd),
            Err(err) => return (commands, Some(err)),
        }
        current = Some(letter);
    }

    (commands, None)
}

/// Parse path data, keeping every command completed before the first error.
///
/// Never fails: malformed input yields a (possibly empty) prefix of the
/// commands it describes.
pub fn parse_path(d: &str) -> Vec<PathCommand> {
    let (commands, err) = build(d);
    if let Some(err) = err {
        debug!(error = %err, kept = commands.len(), "Truncated path data");
    }
    commands
}

/// Parse path data, reporting the first error.
pub fn parse_path_strict(d: &str) -> Result<Vec<PathCommand>, PathParseError> {
    match build(d) {
        (commands, None) => Ok(commands),
        (_, Some(err)) => Err(err),
    }
}
