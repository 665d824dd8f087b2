//! Locating URL references in HTML and CSS.

mod css;
mod markup;

pub use css::find_css_urls;

use crate::Options;
use crate::ast::{Attributes, Span};
use crate::error::Error;
use log::trace;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// How to read the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ContentType {
    #[default]
    #[serde(rename = "text/html")]
    Html,
    #[serde(rename = "text/css")]
    Css,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Css => "text/css",
        }
    }

    /// `text/html` or `text/css`, ignoring case and any `;` parameters
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        if essence.eq_ignore_ascii_case("text/html") {
            Some(ContentType::Html)
        } else if essence.eq_ignore_ascii_case("text/css") {
            Some(ContentType::Css)
        } else {
            None
        }
    }

    /// Content type implied by a file extension (`.css` is CSS, everything
    /// else is HTML)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("css") => ContentType::Css,
            _ => ContentType::Html,
        }
    }
}

/// The tag a markup match was found in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagContext {
    /// Index of the tag in the extracted tag list
    pub tag_index: usize,
    pub tag_name: String,
    /// Attribute holding the URL
    pub attribute: String,
    /// Every attribute of the tag, shared between matches of the same tag
    pub attributes: Arc<Attributes>,
}

/// Where a match was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UrlSource {
    /// URL-valued attribute such as `<a href>`
    Attribute(TagContext),
    /// `url(...)` in a stylesheet: a CSS document or a `<style>` body
    Stylesheet,
    /// `url(...)` inside a `style="..."` attribute
    StyleAttribute(TagContext),
}

/// One URL occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlMatch {
    /// Absolute byte span of the URL text only (no quotes, no `url(`)
    pub span: Span,
    /// The URL text, or its resolution against the base URL when one is given
    pub url: String,
    pub source: UrlSource,
}

impl UrlMatch {
    /// The URL exactly as written in `source`
    pub fn raw<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source).unwrap_or("")
    }

    pub fn in_markup(&self) -> bool {
        matches!(
            self.source,
            UrlSource::Attribute(_) | UrlSource::StyleAttribute(_)
        )
    }

    pub fn in_stylesheet(&self) -> bool {
        matches!(
            self.source,
            UrlSource::Stylesheet | UrlSource::StyleAttribute(_)
        )
    }

    pub fn tag(&self) -> Option<&TagContext> {
        match &self.source {
            UrlSource::Attribute(tag) | UrlSource::StyleAttribute(tag) => Some(tag),
            UrlSource::Stylesheet => None,
        }
    }

    pub fn tag_name(&self) -> Option<&str> {
        self.tag().map(|tag| tag.tag_name.as_str())
    }

    pub fn tag_attribute_name(&self) -> Option<&str> {
        self.tag().map(|tag| tag.attribute.as_str())
    }

    pub fn tag_attributes(&self) -> Option<&Attributes> {
        self.tag().map(|tag| tag.attributes.as_ref())
    }

    pub fn tag_index(&self) -> Option<usize> {
        self.tag().map(|tag| tag.tag_index)
    }
}

/// Find every URL in `source`.
///
/// When `base_url` is given each match's `url` is resolved against it.
pub fn find_urls(
    source: &str,
    base_url: Option<&str>,
    content_type: ContentType,
    options: &Options,
) -> Result<Vec<UrlMatch>, Error> {
    let mut matches = match content_type {
        ContentType::Css => stylesheet_matches(source, 0),
        ContentType::Html => markup::find_markup_urls(source, options),
    };
    trace!("found {} URLs in {} document", matches.len(), content_type.as_str());

    if let Some(base_url) = base_url {
        let base = Url::parse(base_url).map_err(|e| Error::url(base_url, e))?;
        for m in &mut matches {
            m.url = base
                .join(&m.url)
                .map_err(|e| Error::url(m.url.as_str(), e))?
                .to_string();
        }
    }

    Ok(matches)
}

/// CSS `url()` matches of `css`, whose first byte is at `offset` in the document
pub(crate) fn stylesheet_matches(css: &str, offset: usize) -> Vec<UrlMatch> {
    find_css_urls(css)
        .into_iter()
        .map(|span| UrlMatch {
            span: span.offset(offset),
            url: css[span.start..span.end].to_string(),
            source: UrlSource::Stylesheet,
        })
        .collect()
}
