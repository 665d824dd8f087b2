use crate::ast::Span;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // url(payload) with no parens, quotes or newlines in the payload,
    // or url("payload") with optional space around the quoted part
    static ref CSS_URL: Regex =
        Regex::new(r#"url\(\s*([^()'"\r\n]*)\)|url\(\s*"([^"\r\n]*)"\s*\)"#).unwrap();
}

/// Spans of every `url(...)` payload in `css`, relative to `css`.
///
/// The span covers the payload only: not `url(`, the quotes or `)`.
pub fn find_css_urls(css: &str) -> Vec<Span> {
    CSS_URL
        .captures_iter(css)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| Span::new(m.start(), m.end()))
        .collect()
}
