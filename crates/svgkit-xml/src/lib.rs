//! # SvgKit XML
//!
//! Best-effort XML micro-parser for SVG input.
//!
//! ## Features
//!
//! - **Tag reader**: Open/self-closing/close events with byte offsets
//! - **Element walker**: Depth-counted matching of same-name nested tags
//! - **Attributes**: Quoted, unquoted and valueless attributes with entity decoding
//! - **Text**: Markup-free text extraction with CDATA support
//!
//! The parser never fails. Malformed markup ends the current sibling list and
//! everything parsed before it is kept.

mod attributes;
mod element;
mod entities;
mod reader;

pub use attributes::Attributes;
pub use element::{find_element, text_content, Children, Element};
pub use entities::decode_entities;
pub use reader::{Tag, TagKind, TagReader};
