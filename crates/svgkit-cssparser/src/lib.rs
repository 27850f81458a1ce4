//! # SvgKit CSS Parser
//!
//! CSS text to AST for the SvgKit style layer.
//!
//! Covers what SVG documents put in `<style>` blocks and `style=""`
//! attributes: plain rules `selector { prop: value; }`, `@keyframes` blocks,
//! and inline declaration lists. Other at-rules are skipped. There is no
//! selector parsing here; selector text is kept raw for the cascade crate.

use std::borrow::Cow;
use thiserror::Error;

/// Errors that can occur while parsing CSS.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
}

/// A parsed stylesheet AST.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StylesheetAst {
    pub rules: Vec<RuleAst>,
    pub keyframes: Vec<KeyframesAst>,
}

/// A parsed rule AST.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleAst {
    /// Raw selector text, possibly a comma-separated list.
    pub selector: String,
    pub declarations: Vec<DeclarationAst>,
}

/// A parsed declaration AST.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationAst {
    /// Lowercased property name.
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// An `@keyframes name { ... }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframesAst {
    pub name: String,
    pub frames: Vec<KeyframeBlockAst>,
}

/// One keyframe block, e.g. `0%, 50% { opacity: 0 }`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeBlockAst {
    /// Lowercased keyframe selectors (`from`, `to`, `25%`).
    pub selectors: Vec<String>,
    pub declarations: Vec<DeclarationAst>,
}

/// Parse a stylesheet into an AST.
///
/// Fails with [`ParseError::UnexpectedEof`] when a block is left unclosed.
pub fn parse_stylesheet(css: &str) -> Result<StylesheetAst, ParseError> {
    match parse_stylesheet_partial(css) {
        (ast, None) => Ok(ast),
        (_, Some(err)) => Err(err),
    }
}

/// Parse a stylesheet, keeping everything before the first error.
pub fn parse_stylesheet_partial(css: &str) -> (StylesheetAst, Option<ParseError>) {
    let css = strip_comments(css);
    let mut parser = Parser {
        src: &css,
        pos: 0,
        out: StylesheetAst::default(),
    };
    let err = parser.run().err();
    (parser.out, err)
}

/// Parse a declaration list such as the content of a `style` attribute.
pub fn parse_declarations(block: &str) -> Vec<DeclarationAst> {
    let block = strip_comments(block);
    split_top_level(&block, ';')
        .into_iter()
        .filter_map(parse_declaration)
        .collect()
}

// ==================== Internals ====================

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    out: StylesheetAst,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn run(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return Ok(());
            }
            if rest.starts_with('@') {
                self.at_rule()?;
            } else if !self.rule()? {
                return Ok(());
            }
        }
    }

    /// Read `prelude { body }`, returning both and advancing past the block.
    fn block(&mut self) -> Result<Option<(&'a str, &'a str)>, ParseError> {
        let rest = self.rest();
        let Some(open) = find_top_level(rest, '{') else {
            return Ok(None);
        };
        let close = block_end(rest, open).ok_or(ParseError::UnexpectedEof)?;
        self.pos += close + 1;
        Ok(Some((&rest[..open], &rest[open + 1..close])))
    }

    /// Plain rule. Returns false when there is no further block.
    fn rule(&mut self) -> Result<bool, ParseError> {
        let Some((prelude, body)) = self.block()? else {
            // Trailing text without a block.
            return Ok(false);
        };
        let selector = prelude.trim();
        let declarations = parse_declarations(body);
        if !selector.is_empty() && !declarations.is_empty() {
            self.out.rules.push(RuleAst {
                selector: selector.to_string(),
                declarations,
            });
        }
        Ok(true)
    }

    fn at_rule(&mut self) -> Result<(), ParseError> {
        let rest = self.rest();
        let name_len = rest[1..]
            .find(|c: char| c.is_whitespace() || c == '{' || c == ';')
            .map_or(rest.len(), |i| i + 1);
        let keyword = rest[1..name_len].to_ascii_lowercase();

        let semi = find_top_level(rest, ';');
        let open = find_top_level(rest, '{');
        match (semi, open) {
            // Statement at-rule such as @import or @charset.
            (Some(semi), open) if open.map_or(true, |open| semi < open) => {
                self.pos += semi + 1;
                Ok(())
            }
            (_, Some(_)) => {
                self.pos += name_len;
                let Some((prelude, body)) = self.block()? else {
                    return Ok(());
                };
                if is_keyframes_keyword(&keyword) {
                    let name = prelude.trim().trim_matches(|c| c == '"' || c == '\'');
                    self.out.keyframes.push(KeyframesAst {
                        name: name.to_string(),
                        frames: parse_keyframe_blocks(body)?,
                    });
                }
                Ok(())
            }
            _ => {
                self.pos = self.src.len();
                Ok(())
            }
        }
    }
}

fn is_keyframes_keyword(keyword: &str) -> bool {
    keyword == "keyframes"
        || keyword
            .strip_prefix('-')
            .and_then(|k| k.split_once('-'))
            .map_or(false, |(_, k)| k == "keyframes")
}

fn parse_keyframe_blocks(body: &str) -> Result<Vec<KeyframeBlockAst>, ParseError> {
    let mut frames = Vec::new();
    let mut rest = body;
    while let Some(open) = find_top_level(rest, '{') {
        let close = block_end(rest, open).ok_or(ParseError::UnexpectedEof)?;
        let selectors = rest[..open]
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if !selectors.is_empty() {
            frames.push(KeyframeBlockAst {
                selectors,
                declarations: parse_declarations(&rest[open + 1..close]),
            });
        }
        rest = &rest[close + 1..];
    }
    Ok(frames)
}

fn parse_declaration(raw: &str) -> Option<DeclarationAst> {
    let (property, value) = raw.split_once(':')?;
    let property = property.trim();
    let value = value.trim();
    if property.is_empty() || value.is_empty() {
        return None;
    }
    let (value, important) = strip_important(value);
    Some(DeclarationAst {
        property: property.to_ascii_lowercase(),
        value: value.to_string(),
        important,
    })
}

fn strip_important(value: &str) -> (&str, bool) {
    let lower = value.to_ascii_lowercase();
    if let Some(idx) = lower.rfind("!important") {
        let before = value[..idx].trim_end();
        (before, true)
    } else {
        (value, false)
    }
}

/// Remove `/* ... */` comments. An unterminated comment runs to the end.
fn strip_comments(css: &str) -> Cow<'_, str> {
    if !css.contains("/*") {
        return Cow::Borrowed(css);
    }
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return Cow::Owned(out),
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Scan state shared by the top-level searches: quotes and parentheses hide
/// delimiters.
fn scan(s: &str, mut visit: impl FnMut(usize, u8, bool) -> bool) {
    let mut quote: Option<u8> = None;
    let mut parens = 0usize;
    for (i, b) in s.bytes().enumerate() {
        match (quote, b) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'(') => parens += 1,
            (None, b')') => parens = parens.saturating_sub(1),
            (None, b) => {
                if visit(i, b, parens == 0) {
                    return;
                }
            }
        }
    }
}

fn find_top_level(s: &str, target: char) -> Option<usize> {
    let target = target as u8;
    let mut found = None;
    scan(s, |i, b, top| {
        if top && b == target {
            found = Some(i);
            true
        } else {
            false
        }
    });
    found
}

/// Index of the `}` matching the `{` at `open`.
fn block_end(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut found = None;
    scan(&s[open..], |i, b, _| {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    found = Some(open + i);
                    return true;
                }
            }
            _ => {}
        }
        false
    });
    found
}

fn split_top_level(s: &str, delimiter: char) -> Vec<&str> {
    let delimiter = delimiter as u8;
    let mut parts = Vec::new();
    let mut start = 0;
    scan(s, |i, b, top| {
        if top && b == delimiter {
            parts.push(&s[start..i]);
            start = i + 1;
        }
        false
    });
    parts.push(&s[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_stylesheet() {
        let css = r#"
            rect { fill: black; }
            .container { stroke-width: 2px; opacity: 0.5 !important; }
        "#;
        let ast = parse_stylesheet(css).unwrap();
        assert_eq!(ast.rules.len(), 2);
        assert_eq!(ast.rules[0].selector, "rect");
        assert_eq!(ast.rules[0].declarations.len(), 1);
        assert_eq!(ast.rules[1].selector, ".container");
        assert_eq!(ast.rules[1].declarations.len(), 2);
        assert_eq!(ast.rules[1].declarations[1].value, "0.5");
        assert!(ast.rules[1].declarations[1].important);
    }

    #[test]
    fn parse_with_comments() {
        let css = r#"
            /* comment */
            path { fill: red; /* inside */ stroke: blue; }
        "#;
        let ast = parse_stylesheet(css).unwrap();
        assert_eq!(ast.rules.len(), 1);
        assert_eq!(ast.rules[0].declarations.len(), 2);
    }

    #[test]
    fn unclosed_block_is_error() {
        let css = "circle { fill: black;";
        let err = parse_stylesheet(css).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof));
    }

    #[test]
    fn partial_keeps_rules_before_unclosed_block() {
        let (ast, err) = parse_stylesheet_partial("a { fill: red } b { fill: blue");
        assert_eq!(err, Some(ParseError::UnexpectedEof));
        assert_eq!(ast.rules.len(), 1);
        assert_eq!(ast.rules[0].selector, "a");
    }

    #[test]
    fn parse_keyframes() {
        let css = r#"
            @keyframes spin {
                from { transform: rotate(0deg); }
                50%, 75% { opacity: 0.5 }
                to { transform: rotate(360deg); }
            }
            @-webkit-keyframes "pulse" { 0% { opacity: 0 } 100% { opacity: 1 } }
            .c { animation: spin 1s linear infinite; }
        "#;
        let ast = parse_stylesheet(css).unwrap();
        assert_eq!(ast.keyframes.len(), 2);
        let spin = &ast.keyframes[0];
        assert_eq!(spin.name, "spin");
        assert_eq!(spin.frames.len(), 3);
        assert_eq!(spin.frames[1].selectors, vec!["50%", "75%"]);
        assert_eq!(spin.frames[2].declarations[0].value, "rotate(360deg)");
        assert_eq!(ast.keyframes[1].name, "pulse");
        assert_eq!(ast.rules.len(), 1);
    }

    #[test]
    fn other_at_rules_are_skipped() {
        let css = r#"
            @import url("x.css");
            @media (min-width: 10px) { rect { fill: red } }
            @font-face { font-family: x; }
            rect { fill: blue }
        "#;
        let ast = parse_stylesheet(css).unwrap();
        assert_eq!(ast.rules.len(), 1);
        assert_eq!(ast.rules[0].declarations[0].value, "blue");
        assert!(ast.keyframes.is_empty());
    }

    #[test]
    fn parse_inline_declarations() {
        let decls = parse_declarations("Fill: red; stroke:url(data:a;b) ; ; bogus; opacity: ");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].property, "fill");
        assert_eq!(decls[1].property, "stroke");
        assert_eq!(decls[1].value, "url(data:a;b)");
    }

    #[test]
    fn selector_list_kept_raw() {
        let ast = parse_stylesheet("rect, .a , #b { fill: red }").unwrap();
        assert_eq!(ast.rules[0].selector, "rect, .a , #b");
    }
}
