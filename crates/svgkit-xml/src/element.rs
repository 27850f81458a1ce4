//! Element walker.
//!
//! Elements are located lazily: [`Children`] reads one child tag, then scans
//! forward for the close tag with the same name, counting nested tags of that
//! name so `<g><g></g></g>` pairs correctly. Tags with other names inside are
//! not validated.

use crate::attributes::Attributes;
use crate::entities::decode_entities;
use crate::reader::{Skipped, Tag, TagKind, TagReader};
use tracing::debug;

/// One element with its raw inner markup.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<'a> {
    /// Qualified tag name as written (`svg`, `svg:rect`).
    pub name: &'a str,
    pub attributes: Attributes<'a>,
    /// Markup between the start and end tags (empty when self-closing).
    pub inner: &'a str,
    pub self_closing: bool,
}

impl<'a> Element<'a> {
    /// Tag name without a namespace prefix.
    pub fn local_name(&self) -> &'a str {
        self.name.rsplit(':').next().unwrap_or(self.name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Child elements, in document order.
    pub fn children(&self) -> Children<'a> {
        Children::new(self.inner)
    }

    /// Decoded text content of this element.
    pub fn text(&self) -> String {
        text_content(self.inner)
    }
}

/// Complete an element whose start tag was just read from `reader`.
///
/// Returns `None` when the matching close tag is missing.
fn complete<'a>(src: &'a str, tag: Tag<'a>, reader: &mut TagReader<'a>) -> Option<Element<'a>> {
    let attributes = Attributes::parse(tag.attrs);
    match tag.kind {
        TagKind::SelfClosing => Some(Element {
            name: tag.name,
            attributes,
            inner: "",
            self_closing: true,
        }),
        TagKind::Open => {
            let mut depth = 1usize;
            for next in reader.by_ref() {
                if next.name != tag.name {
                    continue;
                }
                match next.kind {
                    TagKind::Open => depth += 1,
                    TagKind::Close => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(Element {
                                name: tag.name,
                                attributes,
                                inner: &src[tag.end..next.start],
                                self_closing: false,
                            });
                        }
                    }
                    TagKind::SelfClosing => {}
                }
            }
            debug!(tag = tag.name, offset = tag.start, "Unmatched start tag");
            None
        }
        TagKind::Close => None,
    }
}

/// Iterator over the child elements of a markup fragment.
///
/// Stops at the first stray close tag or unmatched start tag; the siblings
/// before it are still produced.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    src: &'a str,
    reader: TagReader<'a>,
    done: bool,
}

impl<'a> Children<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            reader: TagReader::new(src),
            done: false,
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Element<'a>> {
        if self.done {
            return None;
        }
        let Some(tag) = self.reader.next() else {
            self.done = true;
            return None;
        };
        if tag.kind == TagKind::Close {
            debug!(tag = tag.name, offset = tag.start, "Stray close tag");
            self.done = true;
            return None;
        }
        let element = complete(self.src, tag, &mut self.reader);
        if element.is_none() {
            self.done = true;
        }
        element
    }
}

/// First element with the given local name anywhere in `src`.
pub fn find_element<'a>(src: &'a str, local_name: &str) -> Option<Element<'a>> {
    let mut reader = TagReader::new(src);
    while let Some(tag) = reader.next() {
        if tag.kind == TagKind::Close {
            continue;
        }
        let name = tag.name.rsplit(':').next().unwrap_or(tag.name);
        if name == local_name {
            return complete(src, tag, &mut reader);
        }
    }
    None
}

/// Decoded text of a fragment with all markup removed.
///
/// CDATA sections are kept verbatim, comments and tags are dropped.
pub fn text_content(inner: &str) -> String {
    let mut out = String::new();
    let mut rest = inner;
    while let Some(lt) = rest.find('<') {
        out.push_str(&decode_entities(&rest[..lt]));
        let markup = &rest[lt..];
        let skipped = Skipped::classify(markup);
        let len = match skipped {
            Some(kind) => kind.end(markup),
            None => markup.find('>').map(|gt| gt + 1),
        };
        let Some(len) = len else {
            return out;
        };
        if skipped == Some(Skipped::Cdata) {
            out.push_str(&markup[9..len - 3]);
        }
        rest = &markup[len..];
    }
    out.push_str(&decode_entities(rest));
    out
}
