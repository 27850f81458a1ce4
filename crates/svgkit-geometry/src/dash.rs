//! Stroke dash patterns.

use serde::{Deserialize, Serialize};

/// Dash pattern ready for a stroker: an even-length array and a phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeDash {
    pub array: Vec<f32>,
    pub offset: f32,
}

impl StrokeDash {
    pub fn new(array: &[f32], offset: f32) -> Self {
        Self {
            array: normalize_dasharray(array),
            offset,
        }
    }

    /// A solid stroke needs no dashing.
    pub fn is_solid(&self) -> bool {
        self.array.is_empty()
    }
}

/// Make a dasharray usable for stroking.
///
/// Odd-length arrays are repeated once to even length. Negative entries or
/// an all-zero array disable dashing and give an empty array.
pub fn normalize_dasharray(array: &[f32]) -> Vec<f32> {
    if array.iter().any(|v| *v < 0.0 || !v.is_finite()) || array.iter().all(|v| *v == 0.0) {
        return Vec::new();
    }
    let mut out = array.to_vec();
    if out.len() % 2 == 1 {
        out.extend_from_slice(array);
    }
    out
}

/// Dash pattern showing the first `fraction` of a path of `length`.
///
/// One dash and one gap both as long as the path; the offset slides the gap
/// in from the end.
pub fn stroke_draw_dash(length: f32, fraction: f32) -> StrokeDash {
    let fraction = fraction.clamp(0.0, 1.0);
    StrokeDash {
        array: vec![length, length],
        offset: length * (1.0 - fraction),
    }
}
