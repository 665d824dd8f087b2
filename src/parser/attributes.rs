//! Attribute text (the inside of a tag after its name) to a key/value map.
//!
//! Splitting never fails. At each position the splitter takes, in order of
//! preference:
//! 1. a maximal whitespace run,
//! 2. `key="value"` (space allowed between `=` and the opening quote),
//! 3. `key=value` (space allowed after `=`),
//! 4. a bare non-whitespace run.
//!
//! Anything malformed falls through to the bare case.

use crate::ast::{AttrSpans, AttrValue, Attributes, Span};
use crate::parser::positions::Located;
use std::collections::BTreeMap;

/// Attribute map with the source ranges of every key and value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAttributes {
    pub attributes: Attributes,
    pub spans: BTreeMap<String, AttrSpans>,
}

impl ParsedAttributes {
    pub fn key_span(&self, key: &str) -> Option<Span> {
        self.spans.get(key).map(|s| s.key)
    }

    pub fn value_span(&self, key: &str) -> Option<Span> {
        self.spans.get(key).map(|s| s.value)
    }
}

/// Split attribute text into whitespace runs and attribute tokens.
/// The pieces concatenate back to `text`.
pub fn split_attrs(text: &str) -> Vec<&str> {
    split_located(Located::new(text, 0))
        .into_iter()
        .map(|piece| piece.text())
        .collect()
}

/// Build the attribute map of `text`. Spans are relative to `text`.
pub fn build_attrs(text: &str) -> ParsedAttributes {
    build_located(Located::new(text, 0))
}

/// Build the attribute map of a located slice; spans are absolute.
pub(crate) fn build_located(text: Located<'_>) -> ParsedAttributes {
    let mut parsed = ParsedAttributes::default();

    for piece in split_located(text) {
        if piece.text().starts_with(char::is_whitespace) {
            continue;
        }

        let (key, value, value_span) = match piece.text().find('=') {
            Some(eq) => {
                let key = piece.slice(0, eq).trim();
                let value = piece.slice(eq + 1, piece.text().len()).trim().unquote();
                (key, AttrValue::Present(value.text().to_string()), value.span())
            }
            None => (piece, AttrValue::Flag, piece.end_point().span()),
        };

        let name = key.text().to_lowercase();
        parsed.spans.insert(
            name.clone(),
            AttrSpans {
                key: key.span(),
                value: value_span,
            },
        );
        parsed.attributes.insert(name, value);
    }

    parsed
}

pub(crate) fn split_located(text: Located<'_>) -> Vec<Located<'_>> {
    let source = text.text();
    let mut pieces = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];
        let len = match whitespace_run(rest) {
            0 => attribute_token(rest),
            n => n,
        };
        pieces.push(text.slice(pos, pos + len));
        pos += len;
    }

    pieces
}

/// Length of the whitespace run at the start of `s`
fn whitespace_run(s: &str) -> usize {
    s.find(|c: char| !c.is_whitespace()).unwrap_or(s.len())
}

/// Length of the run of characters that are neither whitespace nor `=`
fn key_run(s: &str) -> usize {
    s.find(|c: char| c.is_whitespace() || c == '=').unwrap_or(s.len())
}

/// Length of the non-whitespace run at the start of `s`
fn word_run(s: &str) -> usize {
    s.find(char::is_whitespace).unwrap_or(s.len())
}

/// Length of the attribute token at the start of `s` (which is not whitespace)
fn attribute_token(s: &str) -> usize {
    quoted_pair(s)
        .or_else(|| unquoted_pair(s))
        .unwrap_or_else(|| word_run(s))
}

/// Length of `key=value` up to the start of the value, if `s` starts that way
fn key_and_equals(s: &str) -> Option<usize> {
    let key = key_run(s);
    if key == 0 || !s[key..].starts_with('=') {
        return None;
    }
    let after_eq = key + 1;
    Some(after_eq + whitespace_run(&s[after_eq..]))
}

/// `key = "value"` with the closing quote included
fn quoted_pair(s: &str) -> Option<usize> {
    let value_start = key_and_equals(s)?;
    let value = s[value_start..].strip_prefix('"')?;
    let close = value.find('"')?;
    Some(value_start + 1 + close + 1)
}

/// `key=value` where value is a non-whitespace run
fn unquoted_pair(s: &str) -> Option<usize> {
    let value_start = key_and_equals(s)?;
    match word_run(&s[value_start..]) {
        0 => None,
        n => Some(value_start + n),
    }
}
