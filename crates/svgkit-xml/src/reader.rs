//! Tag event reader.
//!
//! Walks the input once with a byte offset and yields tag events. Text is not
//! reported; callers slice it out of the source using the tag offsets.

use tracing::debug;

/// Kind of a tag event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Open,
    /// `<name ... />`
    SelfClosing,
    /// `</name>`
    Close,
}

/// A tag event with its raw attribute text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub kind: TagKind,
    pub name: &'a str,
    /// Raw attribute text, not yet parsed.
    pub attrs: &'a str,
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset just past the closing `>`.
    pub end: usize,
}

/// Markup that is not a tag, skipped by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Skipped {
    Comment,
    Cdata,
    Instruction,
    Declaration,
}

impl Skipped {
    pub(crate) fn classify(rest: &str) -> Option<Self> {
        if rest.starts_with("<!--") {
            Some(Skipped::Comment)
        } else if rest.starts_with("<![CDATA[") {
            Some(Skipped::Cdata)
        } else if rest.starts_with("<?") {
            Some(Skipped::Instruction)
        } else if rest.starts_with("<!") {
            Some(Skipped::Declaration)
        } else {
            None
        }
    }

    /// Offset just past the end of this markup within `rest`.
    pub(crate) fn end(self, rest: &str) -> Option<usize> {
        match self {
            Skipped::Comment => rest[4..].find("-->").map(|i| 4 + i + 3),
            Skipped::Cdata => rest[9..].find("]]>").map(|i| 9 + i + 3),
            Skipped::Instruction => rest[2..].find("?>").map(|i| 2 + i + 2),
            Skipped::Declaration => {
                // DOCTYPE internal subsets contain '>' inside brackets.
                let mut depth = 0usize;
                for (i, b) in rest.bytes().enumerate().skip(2) {
                    match b {
                        b'[' => depth += 1,
                        b']' => depth = depth.saturating_sub(1),
                        b'>' if depth == 0 => return Some(i + 1),
                        _ => {}
                    }
                }
                None
            }
        }
    }
}

/// Find the `>` that ends a tag, ignoring any inside quoted values.
fn tag_end(rest: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, b) in rest.bytes().enumerate().skip(1) {
        match (quote, b) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i + 1),
            (None, _) => {}
        }
    }
    None
}

fn is_name_end(c: char) -> bool {
    c.is_whitespace() || c == '/' || c == '>'
}

/// Iterator over the tag events of a document fragment.
#[derive(Debug, Clone)]
pub struct TagReader<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> TagReader<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn stop(&mut self, at: usize, what: &str) -> Option<Tag<'a>> {
        debug!(offset = at, what, "Unterminated markup, stopping");
        self.pos = self.src.len();
        None
    }
}

impl<'a> Iterator for TagReader<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        loop {
            let at = self.pos + self.src.get(self.pos..)?.find('<')?;
            let rest = &self.src[at..];

            if let Some(skipped) = Skipped::classify(rest) {
                match skipped.end(rest) {
                    Some(len) => {
                        self.pos = at + len;
                        continue;
                    }
                    None => return self.stop(at, "comment or declaration"),
                }
            }

            if let Some(body) = rest.strip_prefix("</") {
                let Some(gt) = body.find('>') else {
                    return self.stop(at, "close tag");
                };
                let end = at + 2 + gt + 1;
                self.pos = end;
                return Some(Tag {
                    kind: TagKind::Close,
                    name: body[..gt].trim(),
                    attrs: "",
                    start: at,
                    end,
                });
            }

            let body = &rest[1..];
            let name_len = body.find(is_name_end).unwrap_or(body.len());
            let name = &body[..name_len];
            if name.is_empty() || !name.starts_with(|c: char| c.is_alphabetic() || c == '_') {
                // A bare '<' in text.
                self.pos = at + 1;
                continue;
            }

            let Some(len) = tag_end(rest) else {
                return self.stop(at, "start tag");
            };
            let end = at + len;
            let inner = &rest[1 + name_len..len - 1];
            let (kind, attrs) = match inner.trim_end().strip_suffix('/') {
                Some(attrs) => (TagKind::SelfClosing, attrs),
                None => (TagKind::Open, inner),
            };
            self.pos = end;
            return Some(Tag {
                kind,
                name,
                attrs: attrs.trim(),
                start: at,
                end,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<(TagKind, &str)> {
        TagReader::new(src).map(|t| (t.kind, t.name)).collect()
    }

    #[test]
    fn test_basic_events() {
        assert_eq!(
            kinds(r#"<svg width="10"><g><rect/></g></svg>"#),
            vec![
                (TagKind::Open, "svg"),
                (TagKind::Open, "g"),
                (TagKind::SelfClosing, "rect"),
                (TagKind::Close, "g"),
                (TagKind::Close, "svg"),
            ]
        );
    }

    #[test]
    fn test_offsets_and_attrs() {
        let src = r#"ab<rect x="1" y='2' />cd"#;
        let tag = TagReader::new(src).next().unwrap();
        assert_eq!(tag.start, 2);
        assert_eq!(&src[tag.end..], "cd");
        assert_eq!(tag.attrs, r#"x="1" y='2'"#);
    }

    #[test]
    fn test_skips_prolog_comments_and_cdata() {
        let src = r#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" [ <!ENTITY e "x"> ]>
<!-- <fake/> -->
<svg><![CDATA[ <not-a-tag/> ]]></svg>"#;
        assert_eq!(kinds(src), vec![(TagKind::Open, "svg"), (TagKind::Close, "svg")]);
    }

    #[test]
    fn test_gt_inside_quotes() {
        let tag = TagReader::new(r#"<text title="a > b">"#).next().unwrap();
        assert_eq!(tag.kind, TagKind::Open);
        assert_eq!(tag.attrs, r#"title="a > b""#);
    }

    #[test]
    fn test_bare_less_than_is_text() {
        assert_eq!(kinds("1 < 2 <g/>"), vec![(TagKind::SelfClosing, "g")]);
    }

    #[test]
    fn test_unterminated_stops() {
        assert_eq!(kinds("<g><rect x='1'"), vec![(TagKind::Open, "g")]);
        assert_eq!(kinds("<g/><!-- never closed"), vec![(TagKind::SelfClosing, "g")]);
    }
}
