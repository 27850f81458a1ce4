//! Parsed documents and the defs registry.

use crate::color::SvgColor;
use crate::element::SvgElement;
use crate::parser::{build_element, viewport_length, ParseContext, ParseOptions};
use crate::style::SvgStyle;
use crate::view_box::{PreserveAspectRatio, ViewBox};
use crate::SvgError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use svgkit_xml::find_element;
use tracing::{debug, info_span};

/// Viewport size used when neither a size nor a viewBox is given.
pub const DEFAULT_SIZE: (f32, f32) = (300.0, 150.0);

/// A parsed SVG document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgDocument {
    /// Root `width`, absent when missing or relative.
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub view_box: Option<ViewBox>,
    pub preserve_aspect_ratio: PreserveAspectRatio,
    /// The `<svg>` element as a group.
    pub root: SvgElement,
}

impl SvgDocument {
    /// Parse with default options.
    pub fn parse(src: &str) -> Result<Self, SvgError> {
        Self::parse_with(src, ParseOptions::default())
    }

    /// Parse SVG markup.
    ///
    /// Only a missing `<svg>` element is an error. Malformed markup below the
    /// root truncates the affected sibling list instead.
    pub fn parse_with(src: &str, options: ParseOptions) -> Result<Self, SvgError> {
        let _span = info_span!("svg_parse", len = src.len()).entered();
        let svg = find_element(src, "svg").ok_or(SvgError::NoRootElement)?;
        let ctx = ParseContext::new(src, options);
        let root = build_element(&svg, &SvgStyle::default(), &ctx).ok_or(SvgError::NoRootElement)?;

        let document = SvgDocument {
            width: viewport_length(svg.attr("width")),
            height: viewport_length(svg.attr("height")),
            view_box: svg.attr("viewBox").and_then(ViewBox::parse),
            preserve_aspect_ratio: svg
                .attr("preserveAspectRatio")
                .map(PreserveAspectRatio::parse)
                .unwrap_or_default(),
            root,
        };
        debug!(
            elements = document.element_count(),
            view_box = document.view_box.is_some(),
            "SVG parsed"
        );
        Ok(document)
    }

    /// Viewport size. A missing dimension comes from the viewBox, keeping its
    /// aspect ratio when the other dimension is set.
    pub fn size(&self) -> (f32, f32) {
        match (self.width, self.height, self.view_box) {
            (Some(w), Some(h), _) => (w, h),
            (Some(w), None, Some(vb)) if vb.width > 0.0 => (w, w * vb.height / vb.width),
            (None, Some(h), Some(vb)) if vb.height > 0.0 => (h * vb.width / vb.height, h),
            (None, None, Some(vb)) if vb.width > 0.0 && vb.height > 0.0 => (vb.width, vb.height),
            (w, h, _) => (w.unwrap_or(DEFAULT_SIZE.0), h.unwrap_or(DEFAULT_SIZE.1)),
        }
    }

    /// Visit every element in document order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SvgElement)) {
        self.root.walk(visit);
    }

    pub fn element_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }

    /// Build the id registry for this tree.
    pub fn registry(&self) -> DefsRegistry<'_> {
        DefsRegistry::build(&self.root)
    }
}

/// Elements by id, built in one pass over a tree.
///
/// Entries point at the outermost wrapper of each element. When ids repeat,
/// the later element in document order wins.
#[derive(Debug, Clone, Default)]
pub struct DefsRegistry<'a> {
    by_id: HashMap<&'a str, &'a SvgElement>,
}

impl<'a> DefsRegistry<'a> {
    pub fn build(root: &'a SvgElement) -> Self {
        let mut by_id = HashMap::new();
        root.walk(&mut |element| {
            if let Some(id) = element.id() {
                by_id.insert(id, element);
            }
        });
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a SvgElement> {
        self.by_id.get(id).copied()
    }

    /// The gradient or pattern a paint refers to.
    pub fn paint_server(&self, paint: &SvgColor) -> Option<&'a SvgElement> {
        let SvgColor::PaintServer(id) = paint else {
            return None;
        };
        self.get(id).filter(|e| {
            matches!(
                e.inner(),
                SvgElement::LinearGradient(_) | SvgElement::RadialGradient(_) | SvgElement::Pattern(_)
            )
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_root() {
        assert!(matches!(SvgDocument::parse("<html/>"), Err(SvgError::NoRootElement)));
        assert!(matches!(SvgDocument::parse(""), Err(SvgError::NoRootElement)));
    }

    #[test]
    fn test_size_fallbacks() {
        let doc = SvgDocument::parse(r#"<svg width="48" height="32"/>"#).unwrap();
        assert_eq!(doc.size(), (48.0, 32.0));
        let doc = SvgDocument::parse(r#"<svg viewBox="0 0 24 12"/>"#).unwrap();
        assert_eq!(doc.size(), (24.0, 12.0));
        let doc = SvgDocument::parse(r#"<svg width="48" viewBox="0 0 24 12"/>"#).unwrap();
        assert_eq!(doc.size(), (48.0, 24.0));
        let doc = SvgDocument::parse(r#"<svg width="100%"/>"#).unwrap();
        assert_eq!(doc.width, None);
        assert_eq!(doc.size(), DEFAULT_SIZE);
    }

    #[test]
    fn test_view_box_absent_not_synthesized() {
        let doc = SvgDocument::parse(r#"<svg width="10" height="10" viewBox="bad"/>"#).unwrap();
        assert_eq!(doc.view_box, None);
        assert_eq!(doc.preserve_aspect_ratio, PreserveAspectRatio::default());
    }

    #[test]
    fn test_registry_later_ids_win() {
        let doc = SvgDocument::parse(
            r#"<svg><defs><circle id="a" r="1"/></defs><g id="b"><rect id="a" width="1" height="1"/></g></svg>"#,
        )
        .unwrap();
        let reg = doc.registry();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("a").map(|e| e.tag_name()), Some("rect"));
        assert!(reg.contains("b"));
        assert!(reg.get("missing").is_none());
    }

    #[test]
    fn test_paint_server_lookup() {
        let doc = SvgDocument::parse(
            r##"<svg><defs><radialGradient id="g"><stop offset="0"/></radialGradient></defs>
                <circle id="c" r="4" fill="url(#g)"/></svg>"##,
        )
        .unwrap();
        let reg = doc.registry();
        let circle = reg.get("c").unwrap();
        let fill = circle.style().and_then(|s| s.fill.clone()).unwrap();
        assert!(matches!(reg.paint_server(&fill).map(|e| e.inner()), Some(SvgElement::RadialGradient(_))));
        assert!(reg.paint_server(&SvgColor::PaintServer("c".into())).is_none());
        assert!(reg.paint_server(&SvgColor::BLACK).is_none());
    }
}
