//! Splits a document into text runs and bracket-delimited markup.
//!
//! The scan never fails: unterminated tags, comments and raw-text bodies
//! degrade to a trailing text token. Concatenating the token texts always
//! reproduces the input.

use crate::ast::{Span, Token, TokenKind};
use crate::html::{COMMENT_CLOSE, COMMENT_OPEN, RawTextElements};
use log::{debug, trace};

/// What the scanner expects at the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Text, or the start of a tag/comment
    Data,
    /// Inside `<...`, looking for `>`
    Tag,
    /// After `<!--`, looking for `-->`
    Comment,
    /// After the opening tag of a raw-text element, looking for `</name`
    RawText(&'static str),
}

/// Tokenizer for one document
pub struct Tokenizer<'a> {
    source: &'a str,
    raw_text: RawTextElements,
    pos: usize,
    mode: Mode,
    tokens: Vec<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str, raw_text: RawTextElements) -> Self {
        Self {
            source,
            raw_text,
            pos: 0,
            mode: Mode::Data,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source
    pub fn tokenize(mut self) -> Vec<Token<'a>> {
        while self.pos < self.source.len() {
            let rest = &self.source[self.pos..];
            match self.mode {
                Mode::Data => {
                    if rest.starts_with(COMMENT_OPEN) {
                        self.emit(TokenKind::Markup, COMMENT_OPEN.len());
                        self.mode = Mode::Comment;
                    } else if rest.starts_with('<') {
                        self.mode = Mode::Tag;
                    } else {
                        let len = rest.find('<').unwrap_or(rest.len());
                        self.emit(TokenKind::Text, len);
                    }
                }
                Mode::Tag => match find_tag_end(rest) {
                    Some(len) => {
                        let tag = &rest[..len];
                        self.emit(TokenKind::Markup, len);
                        self.mode = self
                            .raw_text
                            .lookup(opening_tag_name(tag))
                            .map_or(Mode::Data, Mode::RawText);
                    }
                    None => {
                        debug!("unterminated tag at byte {}", self.pos);
                        self.emit_rest();
                    }
                },
                Mode::Comment => match rest.find(COMMENT_CLOSE) {
                    Some(len) => {
                        self.emit(TokenKind::Text, len);
                        self.emit(TokenKind::Markup, COMMENT_CLOSE.len());
                        self.mode = Mode::Data;
                    }
                    None => {
                        debug!("unterminated comment at byte {}", self.pos);
                        self.emit_rest();
                    }
                },
                Mode::RawText(name) => match find_close_tag(rest, name) {
                    Some(len) => {
                        // The closing tag itself is picked up in data mode
                        self.emit(TokenKind::Text, len);
                        self.mode = Mode::Data;
                    }
                    None => {
                        debug!("unterminated <{}> body at byte {}", name, self.pos);
                        self.emit_rest();
                    }
                },
            }
        }

        trace!("tokenized {} bytes into {} tokens", self.source.len(), self.tokens.len());
        self.tokens
    }

    /// Emit the next `len` bytes as one token.
    ///
    /// Only comment and raw-text bodies can be empty; they are still emitted
    /// so `<!---->` keeps its three-part shape.
    fn emit(&mut self, kind: TokenKind, len: usize) {
        let start = self.pos;
        self.pos += len;
        self.tokens.push(Token {
            kind,
            text: &self.source[start..self.pos],
            span: Span::new(start, self.pos),
        });
    }

    /// Emit everything left as literal text and stop
    fn emit_rest(&mut self) {
        self.emit(TokenKind::Text, self.source.len() - self.pos);
    }
}

/// Tokenize `source` with the given raw-text element set.
pub fn tokenize(source: &str, raw_text: RawTextElements) -> Vec<Token<'_>> {
    Tokenizer::new(source, raw_text).tokenize()
}

/// Length of the tag starting at `rest[0] == '<'`, including its `>`.
pub(crate) fn find_tag_end(rest: &str) -> Option<usize> {
    rest.get(1..)?.find('>').map(|i| i + 2)
}

/// Name of an opening tag as written: the run after `<` up to whitespace,
/// `/` or `>`. Closing tags (`</x>`) yield an empty name.
pub(crate) fn opening_tag_name(tag: &str) -> &str {
    let inner = tag.strip_prefix('<').unwrap_or(tag);
    let end = inner
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(inner.len());
    &inner[..end]
}

/// Offset of the first `</name` in `rest`, ignoring ASCII case.
pub(crate) fn find_close_tag(rest: &str, name: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let name = name.as_bytes();
    let needle_len = name.len() + 2;
    let mut i = 0;
    while i + needle_len <= bytes.len() {
        let rel = rest[i..].find("</")?;
        i += rel;
        if i + needle_len > bytes.len() {
            return None;
        }
        if bytes[i + 2..i + needle_len].eq_ignore_ascii_case(name) {
            return Some(i);
        }
        i += 2;
    }
    None
}
