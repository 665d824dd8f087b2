//! Rebuild a document from non-overlapping replacement spans.

use crate::ast::Span;
use crate::error::{InvalidSpanError, SpanErrorKind};
use crate::urls::UrlMatch;
use std::collections::BTreeMap;

/// Replace each span of `source` with the replacement at the same index.
///
/// Spans may be given in any order; they are sorted internally. Everything
/// outside the spans is copied unchanged.
pub fn patch<S: AsRef<str>>(
    source: &str,
    spans: &[Span],
    replacements: &[S],
) -> Result<String, InvalidSpanError> {
    if spans.len() != replacements.len() {
        return Err(InvalidSpanError::new(
            SpanErrorKind::LengthMismatch,
            format!("{} spans but {} replacements", spans.len(), replacements.len()),
        ));
    }

    for &span in spans {
        check_span(source, span)?;
    }

    // Stable, so empty spans at the same offset keep their given order
    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by_key(|&i| (spans[i].start, spans[i].end));

    for pair in order.windows(2) {
        let (prev, next) = (spans[pair[0]], spans[pair[1]]);
        if next.start < prev.end {
            return Err(InvalidSpanError::new(
                SpanErrorKind::Overlapping,
                format!(
                    "{}..{} overlaps {}..{}",
                    prev.start, prev.end, next.start, next.end
                ),
            )
            .with_span(next));
        }
    }

    let extra: usize = replacements.iter().map(|r| r.as_ref().len()).sum();
    let mut output = String::with_capacity(source.len() + extra);
    let mut pos = 0;
    for i in order {
        let span = spans[i];
        output.push_str(&source[pos..span.start]);
        output.push_str(replacements[i].as_ref());
        pos = span.end;
    }
    output.push_str(&source[pos..]);

    Ok(output)
}

fn check_span(source: &str, span: Span) -> Result<(), InvalidSpanError> {
    if span.start > span.end {
        return Err(InvalidSpanError::new(
            SpanErrorKind::Inverted,
            format!("span {}..{}", span.start, span.end),
        )
        .with_span(span));
    }
    if span.end > source.len() {
        return Err(InvalidSpanError::new(
            SpanErrorKind::OutOfBounds,
            format!("span {}..{} in a document of {} bytes", span.start, span.end, source.len()),
        )
        .with_span(span));
    }
    if !source.is_char_boundary(span.start) || !source.is_char_boundary(span.end) {
        return Err(InvalidSpanError::new(
            SpanErrorKind::NotCharBoundary,
            format!("span {}..{}", span.start, span.end),
        )
        .with_span(span));
    }
    Ok(())
}

/// Replacement URLs keyed by the index of the match they replace.
///
/// Matches without an entry keep their `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlEdits {
    replacements: BTreeMap<usize, String>,
}

impl UrlEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the URL of match `index`
    pub fn set(&mut self, index: usize, url: impl Into<String>) -> &mut Self {
        self.replacements.insert(index, url.into());
        self
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.replacements.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Build edits by asking `f` for a new URL for each match
    pub fn from_fn<F>(matches: &[UrlMatch], mut f: F) -> Self
    where
        F: FnMut(&UrlMatch) -> Option<String>,
    {
        let replacements = matches
            .iter()
            .enumerate()
            .filter_map(|(i, m)| f(m).map(|url| (i, url)))
            .collect();
        Self { replacements }
    }
}

/// Write every match's URL (or its edit) back into `source`.
///
/// With no edits and no base URL this reproduces `source` exactly; with a
/// base URL it rewrites every reference to its resolved form.
pub fn apply_url_edits(
    source: &str,
    matches: &[UrlMatch],
    edits: &UrlEdits,
) -> Result<String, InvalidSpanError> {
    if let Some((&index, _)) = edits.replacements.iter().find(|(i, _)| **i >= matches.len()) {
        return Err(InvalidSpanError::new(
            SpanErrorKind::LengthMismatch,
            format!("edit for match {} but only {} matches", index, matches.len()),
        ));
    }

    let spans: Vec<Span> = matches.iter().map(|m| m.span).collect();
    let urls: Vec<&str> = matches
        .iter()
        .enumerate()
        .map(|(i, m)| edits.get(i).unwrap_or(&m.url))
        .collect();
    patch(source, &spans, &urls)
}
