//! Offset bookkeeping.
//!
//! Tag text goes through several stripping stages before its attributes are
//! parsed (brackets, self-closing slash, name split, whitespace, quotes).
//! [`Located`] carries the absolute offset of a substring through each of
//! these stages so spans never have to be recovered by re-scanning.
//!
//! Spans are byte offsets; the conversion helpers at the bottom turn them
//! into character or UTF-16 offsets for consumers that count differently.

use crate::ast::Span;

/// A substring of the document together with its absolute byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located<'a> {
    text: &'a str,
    start: usize,
}

impl<'a> Located<'a> {
    pub fn new(text: &'a str, start: usize) -> Self {
        Self { text, start }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Sub-slice by byte range relative to this slice
    pub fn slice(&self, from: usize, to: usize) -> Self {
        Self {
            text: &self.text[from..to],
            start: self.start + from,
        }
    }

    pub fn split_at(&self, mid: usize) -> (Self, Self) {
        (self.slice(0, mid), self.slice(mid, self.text.len()))
    }

    pub fn strip_suffix(&self, suffix: &str) -> Option<Self> {
        self.text
            .strip_suffix(suffix)
            .map(|rest| Self::new(rest, self.start))
    }

    pub fn trim(&self) -> Self {
        let leading = self.text.len() - self.text.trim_start().len();
        let trimmed = self.text.trim();
        Self::new(trimmed, self.start + leading)
    }

    /// Strip every leading and trailing character found in `chars`
    pub fn trim_matches(&self, chars: &[char]) -> Self {
        let rest = self.text.trim_start_matches(chars);
        let leading = self.text.len() - rest.len();
        Self::new(rest.trim_end_matches(chars), self.start + leading)
    }

    /// Remove one pair of enclosing double quotes, if present
    pub fn unquote(&self) -> Self {
        if self.text.len() >= 2 && self.text.starts_with('"') && self.text.ends_with('"') {
            self.slice(1, self.text.len() - 1)
        } else {
            *self
        }
    }

    /// Empty slice positioned at the end of this one
    pub fn end_point(&self) -> Self {
        Self::new("", self.end())
    }
}

/// Convert a byte offset to a character (Unicode scalar) offset.
pub fn byte_to_char(source: &str, byte_offset: usize) -> usize {
    let byte_offset = floor_boundary(source, byte_offset);
    source[..byte_offset].chars().count()
}

/// Convert a byte offset to a UTF-16 offset.
pub fn byte_to_utf16(source: &str, byte_offset: usize) -> usize {
    let byte_offset = floor_boundary(source, byte_offset);
    source[..byte_offset].encode_utf16().count()
}

/// Convert a byte span to a character span
pub fn char_span(source: &str, span: Span) -> Span {
    Span::new(byte_to_char(source, span.start), byte_to_char(source, span.end))
}

fn floor_boundary(source: &str, byte_offset: usize) -> usize {
    let mut offset = byte_offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
