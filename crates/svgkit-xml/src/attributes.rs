//! Attribute list parsing.

use crate::entities::decode_entities;
use std::borrow::Cow;

/// Parsed attributes of one tag, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes<'a> {
    entries: Vec<(&'a str, Cow<'a, str>)>,
}

impl<'a> Attributes<'a> {
    /// Parse raw attribute text (`x="1" y='2' flag`).
    ///
    /// Values are entity-decoded. An attribute without `=` gets an empty
    /// value; an unterminated quote runs to the end of the text.
    pub fn parse(raw: &'a str) -> Self {
        let mut entries = Vec::new();
        let mut rest = raw.trim_start();

        while !rest.is_empty() {
            let name_len = rest
                .find(|c: char| c.is_whitespace() || c == '=')
                .unwrap_or(rest.len());
            let name = &rest[..name_len];
            rest = rest[name_len..].trim_start();

            let value = match rest.strip_prefix('=') {
                Some(after) => {
                    let after = after.trim_start();
                    match after.chars().next() {
                        Some(q @ ('"' | '\'')) => {
                            let body = &after[1..];
                            let close = body.find(q).unwrap_or(body.len());
                            rest = body.get(close + 1..).unwrap_or("");
                            &body[..close]
                        }
                        _ => {
                            let len = after.find(char::is_whitespace).unwrap_or(after.len());
                            rest = &after[len..];
                            &after[..len]
                        }
                    }
                }
                None => "",
            };

            if !name.is_empty() {
                entries.push((name, decode_entities(value)));
            }
            rest = rest.trim_start();
        }

        Self { entries }
    }

    /// Value of the first attribute with this name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_ref())
    }

    /// First present value among several names (e.g. `href`, `xlink:href`).
    pub fn get_any(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (*n, v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_values() {
        let attrs = Attributes::parse(r#"cx="12" cy='8' fill = "red""#);
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get("cx"), Some("12"));
        assert_eq!(attrs.get("cy"), Some("8"));
        assert_eq!(attrs.get("fill"), Some("red"));
    }

    #[test]
    fn test_values_keep_inner_whitespace_and_quotes() {
        let attrs = Attributes::parse(r#"d="M0 0 L10 10" font-family='"Open Sans"'"#);
        assert_eq!(attrs.get("d"), Some("M0 0 L10 10"));
        assert_eq!(attrs.get("font-family"), Some("\"Open Sans\""));
    }

    #[test]
    fn test_unquoted_and_valueless() {
        let attrs = Attributes::parse("width=10 hidden height=20");
        assert_eq!(attrs.get("width"), Some("10"));
        assert_eq!(attrs.get("hidden"), Some(""));
        assert_eq!(attrs.get("height"), Some("20"));
    }

    #[test]
    fn test_entities_decoded() {
        let attrs = Attributes::parse(r#"title="a &amp; b""#);
        assert_eq!(attrs.get("title"), Some("a & b"));
    }

    #[test]
    fn test_prefixed_names() {
        let attrs = Attributes::parse(r##"xlink:href="#p""##);
        assert_eq!(attrs.get_any(&["href", "xlink:href"]), Some("#p"));
        assert!(!attrs.contains("href"));
    }

    #[test]
    fn test_unterminated_quote() {
        let attrs = Attributes::parse(r#"a="1" b="oops"#);
        assert_eq!(attrs.get("a"), Some("1"));
        assert_eq!(attrs.get("b"), Some("oops"));
    }

    #[test]
    fn test_duplicate_first_wins() {
        let attrs = Attributes::parse(r#"x="1" x="2""#);
        assert_eq!(attrs.get("x"), Some("1"));
    }
}
