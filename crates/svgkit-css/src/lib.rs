//! # SvgKit CSS
//!
//! Selector matching and style cascade for SVG documents.
//!
//! ## Features
//!
//! 1. **Selectors**: Universal, tag, class and id selectors with fixed specificity
//! 2. **Stylesheets**: Rules and `@keyframes` sets merged from every `<style>` block
//! 3. **Cascade**: Presentation attributes < rules by specificity < inline style
//! 4. **Inherit**: `inherit` is an explicit "no override" marker, never a value

mod cascade;
mod keyframes;

use svgkit_cssparser::{parse_stylesheet_partial, DeclarationAst};
use tracing::{debug, warn};

pub use cascade::{resolve_style, DeclaredValue, StyleDeclarations, PRESENTATION_ATTRIBUTES};
pub use keyframes::{Keyframe, KeyframeSet};

// ==================== Selectors ====================

/// A simple selector. Compound selectors and combinators are not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `*`
    Universal,
    /// `rect` (stored lowercase, matched case-insensitively)
    Tag(String),
    /// `.name`
    Class(String),
    /// `#name`
    Id(String),
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

impl Selector {
    /// Parse a single selector, `None` for anything beyond a simple selector.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == "*" {
            return Some(Selector::Universal);
        }
        if let Some(class) = text.strip_prefix('.') {
            return is_ident(class).then(|| Selector::Class(class.to_string()));
        }
        if let Some(id) = text.strip_prefix('#') {
            return is_ident(id).then(|| Selector::Id(id.to_string()));
        }
        is_ident(text).then(|| Selector::Tag(text.to_ascii_lowercase()))
    }

    /// Universal=0 < Tag=1 < Class=2 < Id=3.
    pub fn specificity(&self) -> u8 {
        match self {
            Selector::Universal => 0,
            Selector::Tag(_) => 1,
            Selector::Class(_) => 2,
            Selector::Id(_) => 3,
        }
    }

    /// Whether the selector matches an element.
    ///
    /// `classes` is the element's `class` attribute split on whitespace.
    pub fn matches(&self, tag: &str, classes: &[&str], id: Option<&str>) -> bool {
        match self {
            Selector::Universal => true,
            Selector::Tag(name) => name.eq_ignore_ascii_case(tag),
            Selector::Class(name) => classes.iter().any(|c| *c == name.as_str()),
            Selector::Id(name) => id == Some(name.as_str()),
        }
    }
}

// ==================== Rules ====================

/// A rule with a single selector.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: Selector,
    pub declarations: StyleDeclarations,
}

/// All rules and keyframe sets of one document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Stylesheet {
    /// Rules in source order.
    pub rules: Vec<Rule>,
    pub keyframes: Vec<KeyframeSet>,
}

impl Stylesheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a CSS string into a stylesheet.
    ///
    /// Never fails. Selector lists are split into one rule per selector,
    /// unsupported selectors are dropped, and an unclosed block ends the
    /// stylesheet while keeping the rules before it.
    pub fn parse(css: &str) -> Self {
        debug!(len = css.len(), "Parsing CSS");
        let (ast, err) = parse_stylesheet_partial(css);
        if let Some(err) = err {
            warn!(error = %err, kept = ast.rules.len(), "Stylesheet truncated");
        }

        let mut stylesheet = Stylesheet::new();
        for rule in ast.rules {
            let declarations = StyleDeclarations::from_ast(&rule.declarations);
            for text in rule.selector.split(',') {
                match Selector::parse(text) {
                    Some(selector) => stylesheet.rules.push(Rule {
                        selector,
                        declarations: declarations.clone(),
                    }),
                    None => debug!(selector = text.trim(), "Unsupported selector skipped"),
                }
            }
        }
        stylesheet.keyframes = ast.keyframes.iter().map(KeyframeSet::from_ast).collect();

        debug!(
            rule_count = stylesheet.rules.len(),
            keyframes = stylesheet.keyframes.len(),
            "CSS parsed"
        );
        stylesheet
    }

    /// Append another stylesheet's rules after this one's.
    pub fn append(&mut self, other: Stylesheet) {
        self.rules.extend(other.rules);
        self.keyframes.extend(other.keyframes);
    }

    /// Keyframe set by name. A later definition replaces an earlier one.
    pub fn keyframes(&self, name: &str) -> Option<&KeyframeSet> {
        self.keyframes.iter().rev().find(|k| k.name == name)
    }

    /// Matching rules, sorted ascending by specificity with ties in source order.
    pub fn matching_rules(&self, tag: &str, classes: &[&str], id: Option<&str>) -> Vec<&Rule> {
        let mut matched: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|r| r.selector.matches(tag, classes, id))
            .collect();
        // `sort_by_key` is stable.
        matched.sort_by_key(|r| r.selector.specificity());
        matched
    }

    /// Get the number of rules in this stylesheet.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.keyframes.is_empty()
    }
}

pub(crate) fn declarations_from_ast(decls: &[DeclarationAst]) -> StyleDeclarations {
    let mut out = StyleDeclarations::new();
    for decl in decls {
        out.set(&decl.property, DeclaredValue::parse(&decl.value));
    }
    out
}
