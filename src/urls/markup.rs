use super::{TagContext, UrlMatch, UrlSource, stylesheet_matches};
use crate::Options;
use crate::ast::{AttrValue, PositionedNode, PositionedTag};
use crate::html::{STYLE_ATTRIBUTE, STYLE_ELEMENT, url_attributes};
use crate::parser::extract_positioned;
use log::debug;
use std::sync::Arc;

/// URL matches in an HTML document, in document order
pub(super) fn find_markup_urls(source: &str, options: &Options) -> Vec<UrlMatch> {
    let nodes = extract_positioned(source, options.raw_text);
    let mut matches = Vec::new();

    for (index, node) in nodes.iter().enumerate() {
        match node {
            PositionedNode::Tag(tag) => tag_urls(source, index, tag, &mut matches),
            PositionedNode::Text(text) => {
                let after_style = index
                    .checked_sub(1)
                    .and_then(|prev| nodes[prev].as_tag())
                    .is_some_and(|tag| tag.name == STYLE_ELEMENT);
                if after_style {
                    matches.extend(stylesheet_matches(text.text, text.span.start));
                }
            }
        }
    }

    matches
}

fn tag_urls(source: &str, index: usize, tag: &PositionedTag, matches: &mut Vec<UrlMatch>) {
    let mut attributes = None;
    let mut context = |attribute: &str| TagContext {
        tag_index: index,
        tag_name: tag.name.clone(),
        attribute: attribute.to_string(),
        attributes: attributes
            .get_or_insert_with(|| Arc::new(tag.attributes.clone()))
            .clone(),
    };

    let mut seen: Vec<&str> = Vec::new();
    for attribute in url_attributes(&tag.name) {
        // Several prefixes can name the same attribute (`a` and `area`)
        if seen.contains(&attribute) {
            continue;
        }
        seen.push(attribute);

        let Some(span) = present_value_span(tag, attribute) else {
            continue;
        };
        matches.push(UrlMatch {
            span,
            url: source[span.start..span.end].to_string(),
            source: UrlSource::Attribute(context(attribute)),
        });
    }

    if let Some(span) = present_value_span(tag, STYLE_ATTRIBUTE) {
        for m in stylesheet_matches(&source[span.start..span.end], span.start) {
            matches.push(UrlMatch {
                source: UrlSource::StyleAttribute(context(STYLE_ATTRIBUTE)),
                ..m
            });
        }
    }
}

/// Value span of `attribute` when it has a value; bare flags carry no URL
fn present_value_span(tag: &PositionedTag, attribute: &str) -> Option<crate::ast::Span> {
    match tag.attributes.get(attribute)? {
        AttrValue::Present(_) => tag.value_span(attribute),
        AttrValue::Flag => {
            debug!("<{}> has a bare {} attribute; skipping", tag.name, attribute);
            None
        }
    }
}
