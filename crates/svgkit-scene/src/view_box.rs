//! Viewport values: `viewBox` and `preserveAspectRatio`.

use crate::transform::Transform2D;
use crate::values::{parse_number, split_list};
use serde::{Deserialize, Serialize};

/// SVG viewBox.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    /// Parse a viewBox attribute: exactly four space/comma separated numbers
    /// with non-negative size. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts = split_list(s)
            .map(parse_number)
            .collect::<Option<Vec<f32>>>()?;
        match parts.as_slice() {
            [min_x, min_y, width, height] if *width >= 0.0 && *height >= 0.0 => Some(ViewBox {
                min_x: *min_x,
                min_y: *min_y,
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }

    /// Mapping from viewBox coordinates to a `width × height` viewport.
    pub fn transform_for(&self, width: f32, height: f32, par: PreserveAspectRatio) -> Transform2D {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Transform2D::identity();
        }
        let sx = width / self.width;
        let sy = height / self.height;

        let Some((fx, fy)) = par.align.factors() else {
            return Transform2D::identity()
                .scale(sx, sy)
                .translate(-self.min_x, -self.min_y);
        };

        let s = if par.slice { sx.max(sy) } else { sx.min(sy) };
        let tx = (width - self.width * s) * fx;
        let ty = (height - self.height * s) * fy;
        Transform2D::identity()
            .translate(tx, ty)
            .scale(s, s)
            .translate(-self.min_x, -self.min_y)
    }
}

/// Alignment part of `preserveAspectRatio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Align {
    /// Non-uniform scaling.
    None,
    XMinYMin,
    XMidYMin,
    XMaxYMin,
    XMinYMid,
    #[default]
    XMidYMid,
    XMaxYMid,
    XMinYMax,
    XMidYMax,
    XMaxYMax,
}

impl Align {
    fn parse(s: &str) -> Option<Self> {
        let align = match s {
            "none" => Align::None,
            "xMinYMin" => Align::XMinYMin,
            "xMidYMin" => Align::XMidYMin,
            "xMaxYMin" => Align::XMaxYMin,
            "xMinYMid" => Align::XMinYMid,
            "xMidYMid" => Align::XMidYMid,
            "xMaxYMid" => Align::XMaxYMid,
            "xMinYMax" => Align::XMinYMax,
            "xMidYMax" => Align::XMidYMax,
            "xMaxYMax" => Align::XMaxYMax,
            _ => return None,
        };
        Some(align)
    }

    /// Fraction of the free space placed before the content on each axis.
    fn factors(self) -> Option<(f32, f32)> {
        let f = match self {
            Align::None => return None,
            Align::XMinYMin => (0.0, 0.0),
            Align::XMidYMin => (0.5, 0.0),
            Align::XMaxYMin => (1.0, 0.0),
            Align::XMinYMid => (0.0, 0.5),
            Align::XMidYMid => (0.5, 0.5),
            Align::XMaxYMid => (1.0, 0.5),
            Align::XMinYMax => (0.0, 1.0),
            Align::XMidYMax => (0.5, 1.0),
            Align::XMaxYMax => (1.0, 1.0),
        };
        Some(f)
    }
}

/// `preserveAspectRatio`; defaults to `xMidYMid meet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreserveAspectRatio {
    pub align: Align,
    /// `slice` when true, `meet` otherwise.
    pub slice: bool,
}

impl PreserveAspectRatio {
    /// Parse the attribute; malformed input gives the default.
    pub fn parse(s: &str) -> Self {
        let mut tokens = s.split_whitespace().peekable();
        if tokens.peek() == Some(&"defer") {
            tokens.next();
        }
        let Some(align) = tokens.next().and_then(Align::parse) else {
            return Self::default();
        };
        let slice = match tokens.next() {
            None | Some("meet") => false,
            Some("slice") => true,
            Some(_) => return Self::default(),
        };
        Self { align, slice }
    }
}
