//! Clip path resolution.

use serde::{Deserialize, Serialize};
use svgkit_scene::{DefsRegistry, SvgElement, Transform2D};
use tracing::warn;

use crate::outline::Outline;

/// One shape contributing to a clip region, in clip-path user space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipOutline {
    pub outline: Outline,
    pub transform: Transform2D,
}

/// Outlines of the `<clipPath>` with the given id.
///
/// Children of nested groups are flattened with their transforms composed.
/// A `<use>` is followed one level deep. Unknown ids or ids naming something
/// other than a clip path give no outlines.
pub fn clip_outlines(registry: &DefsRegistry<'_>, id: &str) -> Vec<ClipOutline> {
    let Some(clip) = registry.get(id) else {
        warn!(id, "Unresolved clip-path reference");
        return Vec::new();
    };
    let SvgElement::ClipPath(clip_path) = clip.inner() else {
        warn!(id, tag = clip.tag_name(), "clip-path does not name a clipPath");
        return Vec::new();
    };
    let base = own_transform(clip, &Transform2D::IDENTITY);
    let mut out = Vec::new();
    for child in &clip_path.children {
        collect(registry, child, &base, true, &mut out);
    }
    out
}

fn own_transform(element: &SvgElement, parent: &Transform2D) -> Transform2D {
    match element.style().and_then(|s| s.transform.as_ref()) {
        Some(t) => parent.multiply(&t.to_matrix()),
        None => *parent,
    }
}

fn collect(
    registry: &DefsRegistry<'_>,
    element: &SvgElement,
    parent: &Transform2D,
    follow_use: bool,
    out: &mut Vec<ClipOutline>,
) {
    let transform = own_transform(element, parent);
    match element.inner() {
        SvgElement::Group(group) => {
            for child in &group.children {
                collect(registry, child, &transform, follow_use, out);
            }
        }
        SvgElement::Use(u) if follow_use => {
            let Some(target) = u.href.as_deref().and_then(|href| registry.get(href)) else {
                return;
            };
            let placed = transform.translate(u.x, u.y);
            collect(registry, target, &placed, false, out);
        }
        other => {
            if let Some(outline) = Outline::from_element(other) {
                out.push(ClipOutline { outline, transform });
            }
        }
    }
}
