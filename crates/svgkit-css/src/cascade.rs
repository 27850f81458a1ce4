//! Cascade resolution.

use crate::{declarations_from_ast, Stylesheet};
use smallvec::SmallVec;
use svgkit_cssparser::{parse_declarations, DeclarationAst};
use svgkit_xml::Attributes;
use tracing::trace;

/// Attributes that double as CSS properties.
///
/// They form the lowest cascade layer: any matching rule or inline
/// declaration overrides them.
pub const PRESENTATION_ATTRIBUTES: &[&str] = &[
    "fill",
    "fill-opacity",
    "fill-rule",
    "stroke",
    "stroke-width",
    "stroke-opacity",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-dasharray",
    "stroke-dashoffset",
    "opacity",
    "paint-order",
    "vector-effect",
    "transform",
    "clip-path",
    "mask",
    "marker-start",
    "marker-mid",
    "marker-end",
    "stop-color",
    "stop-opacity",
    "font-family",
    "font-size",
    "font-weight",
    "text-anchor",
    "display",
    "visibility",
];

/// A declared value after the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredValue {
    Value(String),
    /// `inherit`: take the parent's value, never a literal.
    Inherit,
}

impl DeclaredValue {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("inherit") {
            DeclaredValue::Inherit
        } else {
            DeclaredValue::Value(value.to_string())
        }
    }
}

/// Ordered property map. Setting an existing property overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclarations {
    entries: Vec<(String, DeclaredValue)>,
}

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ast(decls: &[DeclarationAst]) -> Self {
        declarations_from_ast(decls)
    }

    /// Parse an inline `style` attribute.
    pub fn parse_inline(style: &str) -> Self {
        declarations_from_ast(&parse_declarations(style))
    }

    pub fn set(&mut self, property: &str, value: DeclaredValue) {
        match self.entries.iter_mut().find(|(p, _)| p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property.to_string(), value)),
        }
    }

    /// Overlay every declaration of `other` onto this map.
    pub fn overlay(&mut self, other: &StyleDeclarations) {
        for (property, value) in &other.entries {
            self.set(property, value.clone());
        }
    }

    pub fn get(&self, property: &str) -> Option<&DeclaredValue> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v)
    }

    /// The concrete value of a property; `None` when absent or `inherit`.
    pub fn value(&self, property: &str) -> Option<&str> {
        match self.get(property)? {
            DeclaredValue::Value(v) => Some(v),
            DeclaredValue::Inherit => None,
        }
    }

    pub fn is_inherit(&self, property: &str) -> bool {
        matches!(self.get(property), Some(DeclaredValue::Inherit))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeclaredValue)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merge every style source of one element.
///
/// Layers, lowest first: presentation attributes, matching stylesheet rules
/// sorted by specificity (ties in source order), the inline `style`
/// attribute. `!important` does not change the order.
pub fn resolve_style(
    tag: &str,
    attrs: &Attributes<'_>,
    stylesheet: &Stylesheet,
) -> StyleDeclarations {
    let mut merged = StyleDeclarations::new();

    for name in PRESENTATION_ATTRIBUTES {
        if let Some(value) = attrs.get(name) {
            merged.set(name, DeclaredValue::parse(value));
        }
    }

    if !stylesheet.rules.is_empty() {
        let classes: SmallVec<[&str; 4]> = attrs
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default();
        let id = attrs.get("id");
        for rule in stylesheet.matching_rules(tag, &classes, id) {
            trace!(tag, selector = ?rule.selector, "Rule matched");
            merged.overlay(&rule.declarations);
        }
    }

    if let Some(style) = attrs.get("style") {
        merged.overlay(&StyleDeclarations::parse_inline(style));
    }

    merged
}
