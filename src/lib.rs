//! Lossless HTML tokenizing, tag extraction and URL rewriting.
//!
//! Documents are split into text and markup tokens that concatenate back to
//! the input. Tags carry lowercased names, their attributes and absolute byte
//! spans, which is enough to find every URL reference and patch it in place
//! without disturbing the rest of the document.

pub mod ast;
pub mod error;
pub mod generate;
pub mod html;
pub mod parser;
pub mod patch;
pub mod urls;

pub use ast::{
    AttrSpans, AttrValue, Attributes, Node, PositionedNode, PositionedTag, PositionedText, Span,
    Tag, Token, TokenKind,
};
pub use error::{Error, InvalidSpanError, SpanErrorKind};
pub use generate::HtmlGenerator;
pub use html::RawTextElements;
pub use parser::HtmlParser;
pub use patch::{UrlEdits, patch};
pub use urls::{ContentType, TagContext, UrlMatch, UrlSource, find_css_urls};

/// Parsing configuration.
///
/// Both fields pick between two historical behaviors; the defaults are the
/// plain HTML reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Elements whose body is kept as literal text (default: script, style)
    pub raw_text: RawTextElements,
    /// Percent-decode attribute values in the simplified view and encode them
    /// again on serialization
    pub decode_values: bool,
}

pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    tokenize_with(source, &Options::default())
}

pub fn tokenize_with<'a>(source: &'a str, options: &Options) -> Vec<Token<'a>> {
    parser::tokenize(source, options.raw_text)
}

/// Tags and text with absolute spans
pub fn extract_positioned(source: &str) -> Vec<PositionedNode<'_>> {
    extract_positioned_with(source, &Options::default())
}

pub fn extract_positioned_with<'a>(source: &'a str, options: &Options) -> Vec<PositionedNode<'a>> {
    parser::extract_positioned(source, options.raw_text)
}

/// Tags and text without positions; `serialize` is its inverse
pub fn extract_simplified(source: &str) -> Vec<Node> {
    extract_simplified_with(source, &Options::default())
}

pub fn extract_simplified_with(source: &str, options: &Options) -> Vec<Node> {
    parser::extract(source, options)
}

pub fn serialize(nodes: &[Node]) -> String {
    generate::serialize(nodes)
}

pub fn serialize_with(nodes: &[Node], options: &Options) -> String {
    generate::serialize_with(nodes, options)
}

/// Every URL referenced by `source`, in document order.
///
/// With a `base_url` each match's `url` is the resolved absolute URL.
pub fn find_urls(
    source: &str,
    base_url: Option<&str>,
    content_type: ContentType,
) -> Result<Vec<UrlMatch>, Error> {
    find_urls_with(source, base_url, content_type, &Options::default())
}

pub fn find_urls_with(
    source: &str,
    base_url: Option<&str>,
    content_type: ContentType,
    options: &Options,
) -> Result<Vec<UrlMatch>, Error> {
    urls::find_urls(source, base_url, content_type, options)
}

/// Write `matches` back into `source`, using `edits` where given
pub fn apply_url_edits(
    source: &str,
    matches: &[UrlMatch],
    edits: &UrlEdits,
) -> Result<String, InvalidSpanError> {
    patch::apply_url_edits(source, matches, edits)
}

/// Rewrite every URL in `source` to its absolute form against `base_url`
pub fn resolve_urls(
    source: &str,
    base_url: &str,
    content_type: ContentType,
    options: &Options,
) -> Result<String, Error> {
    let matches = urls::find_urls(source, Some(base_url), content_type, options)?;
    Ok(patch::apply_url_edits(source, &matches, &UrlEdits::new())?)
}
