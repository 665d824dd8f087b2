use crate::ast::Span;
use std::fmt;

/// Why a set of replacement spans was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanErrorKind {
    LengthMismatch,
    Inverted,
    OutOfBounds,
    NotCharBoundary,
    Overlapping,
}

impl SpanErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanErrorKind::LengthMismatch => "Span and replacement counts differ",
            SpanErrorKind::Inverted => "Inverted span",
            SpanErrorKind::OutOfBounds => "Span out of bounds",
            SpanErrorKind::NotCharBoundary => "Span splits a character",
            SpanErrorKind::Overlapping => "Overlapping spans",
        }
    }
}

/// Replacement spans that cannot be applied to the document.
///
/// These are caller errors (for example a span taken from a different
/// document), never a property of the document text itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSpanError {
    pub kind: SpanErrorKind,
    pub message: String,
    pub span: Option<Span>,
}

impl InvalidSpanError {
    pub fn new(kind: SpanErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
        }
    }

    /// Attach the offending span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for InvalidSpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

impl std::error::Error for InvalidSpanError {}

/// Error from locating or rewriting URLs
#[derive(Debug)]
pub enum Error {
    InvalidSpan(InvalidSpanError),
    /// Base URL or a reference could not be resolved
    Url { input: String, source: url::ParseError },
}

impl Error {
    pub fn url(input: impl Into<String>, source: url::ParseError) -> Self {
        Error::Url {
            input: input.into(),
            source,
        }
    }
}

impl From<InvalidSpanError> for Error {
    fn from(err: InvalidSpanError) -> Self {
        Error::InvalidSpan(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSpan(err) => write!(f, "{}", err),
            Error::Url { input, source } => write!(f, "Cannot resolve URL '{}': {}", input, source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidSpan(err) => Some(err),
            Error::Url { source, .. } => Some(source),
        }
    }
}
