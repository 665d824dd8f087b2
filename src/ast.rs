use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::html::{COMMENT_CLOSE_NAME, COMMENT_OPEN_NAME};

/// Half-open byte range `[start, end)` into the source document.
///
/// Offsets are UTF-8 byte offsets; see [`crate::parser::positions`] for
/// conversions to character or UTF-16 offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty span positioned at `at`
    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Shift both ends by `delta` bytes
    pub fn offset(self, delta: usize) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// The text this span covers, or `None` if it is out of bounds or
    /// splits a UTF-8 sequence.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

/// What a token is: literal text or a bracket-delimited tag/comment marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Text,
    Markup,
}

/// A contiguous slice of the source. Tokens concatenate back to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

/// Attribute value: `key=value` or a bare `key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Present(String),
    /// Bare attribute with no `=`, e.g. `<input disabled>`
    Flag,
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Present(value) => Some(value),
            AttrValue::Flag => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, AttrValue::Flag)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Present(value.to_string())
    }
}

/// Lowercased attribute key → value, iterated in key order
pub type Attributes = BTreeMap<String, AttrValue>;

/// Source ranges of one attribute: the key text and the value text
/// (whitespace and one pair of double quotes excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttrSpans {
    pub key: Span,
    pub value: Span,
}

/// Tag in the simplified (offset-free) view.
///
/// `name` is lowercased and carries a trailing `/` when the tag was
/// self-closed. Comment delimiters are tags named `!--` and `--`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn comment_open() -> Self {
        Self::new(COMMENT_OPEN_NAME)
    }

    pub fn comment_close() -> Self {
        Self::new(COMMENT_CLOSE_NAME)
    }

    pub fn is_comment_open(&self) -> bool {
        self.name == COMMENT_OPEN_NAME
    }

    pub fn is_comment_close(&self) -> bool {
        self.name == COMMENT_CLOSE_NAME
    }

    pub fn is_self_closing(&self) -> bool {
        self.name.ends_with('/')
    }

    /// Name without the self-closing slash
    pub fn base_name(&self) -> &str {
        self.name.strip_suffix('/').unwrap_or(&self.name)
    }
}

/// Node of the simplified view: a tag or a literal text run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Tag(Tag),
}

impl Node {
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Node::Tag(tag) => Some(tag),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Tag(_) => None,
        }
    }
}

impl From<Tag> for Node {
    fn from(tag: Tag) -> Self {
        Node::Tag(tag)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/// Tag carrying absolute offsets for itself and each of its attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionedTag {
    pub name: String,
    pub attributes: Attributes,
    pub attribute_spans: BTreeMap<String, AttrSpans>,
    /// Whole tag including brackets
    pub span: Span,
}

impl PositionedTag {
    pub fn key_span(&self, key: &str) -> Option<Span> {
        self.attribute_spans.get(key).map(|spans| spans.key)
    }

    pub fn value_span(&self, key: &str) -> Option<Span> {
        self.attribute_spans.get(key).map(|spans| spans.value)
    }

    pub fn is_comment_open(&self) -> bool {
        self.name == COMMENT_OPEN_NAME
    }

    pub fn is_comment_close(&self) -> bool {
        self.name == COMMENT_CLOSE_NAME
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionedText<'a> {
    pub text: &'a str,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PositionedNode<'a> {
    Tag(PositionedTag),
    Text(PositionedText<'a>),
}

impl<'a> PositionedNode<'a> {
    pub fn span(&self) -> Span {
        match self {
            PositionedNode::Tag(tag) => tag.span,
            PositionedNode::Text(text) => text.span,
        }
    }

    pub fn as_tag(&self) -> Option<&PositionedTag> {
        match self {
            PositionedNode::Tag(tag) => Some(tag),
            PositionedNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&PositionedText<'a>> {
        match self {
            PositionedNode::Text(text) => Some(text),
            PositionedNode::Tag(_) => None,
        }
    }
}
