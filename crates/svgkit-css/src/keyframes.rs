//! `@keyframes` sets.

use crate::{DeclaredValue, StyleDeclarations};
use svgkit_cssparser::KeyframesAst;
use tracing::debug;

/// One keyframe at an offset in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub offset: f32,
    pub declarations: StyleDeclarations,
}

/// A named keyframe set, sorted by offset.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeSet {
    pub name: String,
    pub frames: Vec<Keyframe>,
}

fn parse_offset(selector: &str) -> Option<f32> {
    match selector {
        "from" => Some(0.0),
        "to" => Some(1.0),
        _ => {
            let pct = selector.strip_suffix('%')?.trim().parse::<f32>().ok()?;
            (0.0..=100.0).contains(&pct).then_some(pct / 100.0)
        }
    }
}

impl KeyframeSet {
    pub fn from_ast(ast: &KeyframesAst) -> Self {
        let mut frames = Vec::new();
        for block in &ast.frames {
            let declarations = StyleDeclarations::from_ast(&block.declarations);
            for selector in &block.selectors {
                match parse_offset(selector) {
                    Some(offset) => frames.push(Keyframe {
                        offset,
                        declarations: declarations.clone(),
                    }),
                    None => debug!(keyframes = %ast.name, selector = %selector, "Bad keyframe selector"),
                }
            }
        }
        frames.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self {
            name: ast.name.clone(),
            frames,
        }
    }

    /// Properties named by any keyframe, in first-seen order.
    pub fn properties(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for frame in &self.frames {
            for (property, _) in frame.declarations.iter() {
                if !out.contains(&property) {
                    out.push(property);
                }
            }
        }
        out
    }

    /// `(offset, value)` for every keyframe that declares `property`.
    pub fn property_frames(&self, property: &str) -> Vec<(f32, &str)> {
        self.frames
            .iter()
            .filter_map(|f| match f.declarations.get(property)? {
                DeclaredValue::Value(v) => Some((f.offset, v.as_str())),
                DeclaredValue::Inherit => None,
            })
            .collect()
    }
}
