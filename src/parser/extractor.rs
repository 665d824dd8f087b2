//! Tokens to positioned tag/text nodes, and the simplified tag-list view.

use super::attributes::build_located;
use super::positions::Located;
use super::tokenizer::tokenize;
use crate::Options;
use crate::ast::{AttrValue, Attributes, Node, PositionedNode, PositionedTag, PositionedText, Tag, Token};
use crate::html::{COMMENT_CLOSE, COMMENT_CLOSE_NAME, COMMENT_OPEN, COMMENT_OPEN_NAME, RawTextElements};
use log::debug;
use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;

/// Tag and text nodes of `source`, each with its absolute span.
pub fn extract_positioned(source: &str, raw_text: RawTextElements) -> Vec<PositionedNode<'_>> {
    let tokens = tokenize(source, raw_text);
    let mut nodes: Vec<PositionedNode<'_>> = Vec::with_capacity(tokens.len());

    for token in tokens {
        // Comment bodies are opaque even when they look like a tag
        let after_comment_open = matches!(
            nodes.last(),
            Some(PositionedNode::Tag(tag)) if tag.is_comment_open()
        );
        let as_tag = is_tag_shaped(token.text) && (!after_comment_open || token.text == COMMENT_CLOSE);

        let node = if as_tag {
            PositionedNode::Tag(parse_tag(&token))
        } else {
            PositionedNode::Text(PositionedText {
                text: token.text,
                span: token.span,
            })
        };
        nodes.push(node);
    }

    nodes
}

/// `<...>` of at least two characters, or exactly a comment delimiter.
///
/// Decided on the text alone, so a raw-text body such as `<b>` in
/// `<script><b></script>` is a tag while `<b> x` stays text.
fn is_tag_shaped(text: &str) -> bool {
    (text.len() >= 2 && text.starts_with('<') && text.ends_with('>'))
        || text == COMMENT_OPEN
        || text == COMMENT_CLOSE
}

/// Parse one tag-shaped token.
fn parse_tag(token: &Token<'_>) -> PositionedTag {
    match token.text {
        COMMENT_OPEN => return marker(COMMENT_OPEN_NAME, token),
        COMMENT_CLOSE => return marker(COMMENT_CLOSE_NAME, token),
        _ => {}
    }

    // Every leading and trailing bracket goes, so `<<b>` is named `b`
    let inner = Located::new(token.text, token.span.start).trim_matches(&['<', '>']);
    let (inner, self_closing) = match inner.strip_suffix("/") {
        Some(inner) => (inner, true),
        None => (inner, false),
    };

    // Only a space ends the name; `<img\tsrc=x>` is one long name
    let (name, attr_text) = match inner.text().find(' ') {
        Some(space) => inner.split_at(space),
        None => (inner, inner.end_point()),
    };

    let mut name = name.text().trim().to_lowercase();
    if self_closing {
        name.push('/');
    }

    let parsed = build_located(attr_text);
    PositionedTag {
        name,
        attributes: parsed.attributes,
        attribute_spans: parsed.spans,
        span: token.span,
    }
}

fn marker(name: &str, token: &Token<'_>) -> PositionedTag {
    PositionedTag {
        name: name.to_string(),
        attributes: Attributes::new(),
        attribute_spans: BTreeMap::new(),
        span: token.span,
    }
}

/// The simplified view: offsets dropped, optionally percent-decoded values.
pub fn extract(source: &str, options: &Options) -> Vec<Node> {
    extract_positioned(source, options.raw_text)
        .into_iter()
        .map(|node| simplify(source, node, options))
        .collect()
}

fn simplify(source: &str, node: PositionedNode<'_>, options: &Options) -> Node {
    let tag = match node {
        PositionedNode::Text(text) => return Node::Text(text.text.to_string()),
        PositionedNode::Tag(tag) => tag,
    };

    if !options.decode_values {
        return Node::Tag(Tag {
            name: tag.name,
            attributes: tag.attributes,
        });
    }

    match decode_attributes(tag.attributes) {
        Some(attributes) => Node::Tag(Tag {
            name: tag.name,
            attributes,
        }),
        None => {
            debug!(
                "attribute of <{}> at byte {} does not decode to UTF-8; keeping it as text",
                tag.name, tag.span.start
            );
            Node::Text(source[tag.span.start..tag.span.end].to_string())
        }
    }
}

/// Percent-decode every present value; `None` if any is not valid UTF-8
fn decode_attributes(attributes: Attributes) -> Option<Attributes> {
    attributes
        .into_iter()
        .map(|(key, value)| match value {
            AttrValue::Present(raw) => {
                let decoded = percent_decode_str(&raw).decode_utf8().ok()?;
                Some((key, AttrValue::Present(decoded.into_owned())))
            }
            AttrValue::Flag => Some((key, AttrValue::Flag)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;

    fn tag(name: &str) -> Node {
        Node::Tag(Tag::new(name))
    }

    fn tag_with(name: &str, attrs: &[(&str, Option<&str>)]) -> Node {
        let mut tag = Tag::new(name);
        for &(key, value) in attrs {
            let value = value.map(AttrValue::from).unwrap_or(AttrValue::Flag);
            tag.attributes.insert(key.to_string(), value);
        }
        Node::Tag(tag)
    }

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    fn historical() -> Options {
        Options {
            raw_text: RawTextElements::ScriptStylePre,
            decode_values: true,
        }
    }

    #[test]
    fn test_empty() {
        assert!(extract("", &Options::default()).is_empty());
        assert!(extract_positioned("", RawTextElements::default()).is_empty());
    }

    #[test]
    fn test_simple_document() {
        let nodes = extract(
            "abc<body bgcolor=#ffffff>Hi<h1>Ho</h1><br>a<br/>Bye!",
            &Options::default(),
        );
        assert_eq!(
            nodes,
            vec![
                text("abc"),
                tag_with("body", &[("bgcolor", Some("#ffffff"))]),
                text("Hi"),
                tag("h1"),
                text("Ho"),
                tag("/h1"),
                tag("br"),
                text("a"),
                tag("br/"),
                text("Bye!"),
            ]
        );
    }

    #[test]
    fn test_script_body_stays_text() {
        let nodes = extract(
            "<script language=\"Javascript\"><blah>var x; </script>",
            &Options::default(),
        );
        assert_eq!(
            nodes,
            vec![
                tag_with("script", &[("language", Some("Javascript"))]),
                text("<blah>var x; "),
                tag("/script"),
            ]
        );
    }

    #[test]
    fn test_comment_markers() {
        let nodes = extract("<!-- blah -->", &Options::default());
        assert_eq!(nodes, vec![tag("!--"), text(" blah "), tag("--")]);

        let nodes = extract("<!--<a href=x>-->", &Options::default());
        assert_eq!(nodes, vec![tag("!--"), text("<a href=x>"), tag("--")]);

        let nodes = extract("<!---->", &Options::default());
        assert_eq!(nodes, vec![tag("!--"), text(""), tag("--")]);
    }

    #[test]
    fn test_historical_document() {
        let doc = "\n\n<Html><BODY bgcolor=#ffffff>Hi<h1>Ho</h1><br><br /><img SRc=\"text%5f.gif\"><TAG NOshow><img test=\"5%ff\" /></body></html>\nBye!\n";
        assert_eq!(
            extract(doc, &historical()),
            vec![
                text("\n\n"),
                tag("html"),
                tag_with("body", &[("bgcolor", Some("#ffffff"))]),
                text("Hi"),
                tag("h1"),
                text("Ho"),
                tag("/h1"),
                tag("br"),
                tag("br/"),
                tag_with("img", &[("src", Some("text_.gif"))]),
                tag_with("tag", &[("noshow", None)]),
                // %ff is not UTF-8, so the tag is demoted to text
                text("<img test=\"5%ff\" />"),
                tag("/body"),
                tag("/html"),
                text("\nBye!\n"),
            ]
        );
    }

    #[test]
    fn test_historical_document_with_comments() {
        let doc = "\r<HTML><!-- Comment<a href=\"blah\"> --><hiYa><foo><test tag=\"5\" content=6><is broken=False><yay><pre><><>><</pre><foo bar=5>end<!-- <!-- nested --> <script language=\"JavaScript\"><>!><!_!_!-->!_-></script>";
        assert_eq!(
            extract(doc, &historical()),
            vec![
                text("\r"),
                tag("html"),
                tag("!--"),
                text(" Comment<a href=\"blah\"> "),
                tag("--"),
                tag("hiya"),
                tag("foo"),
                tag_with("test", &[("content", Some("6")), ("tag", Some("5"))]),
                tag_with("is", &[("broken", Some("False"))]),
                tag("yay"),
                tag("pre"),
                text("<><>><"),
                tag("/pre"),
                tag_with("foo", &[("bar", Some("5"))]),
                text("end"),
                tag("!--"),
                text(" <!-- nested "),
                tag("--"),
                text(" "),
                tag_with("script", &[("language", Some("JavaScript"))]),
                // A tag-shaped raw-text body is still a tag
                tag("!><!_!_!-->!_-"),
                tag("/script"),
            ]
        );
    }

    #[test]
    fn test_values_not_decoded_by_default() {
        let nodes = extract("<img src=\"text%5f.gif\">", &Options::default());
        assert_eq!(nodes, vec![tag_with("img", &[("src", Some("text%5f.gif"))])]);
    }

    #[test]
    fn test_positioned_spans() {
        let doc = "x<IMG SRC = a.gif Alt=\"a b\" ISMAP/>y";
        let nodes = extract_positioned(doc, RawTextElements::default());
        assert_eq!(nodes.len(), 3);

        let img = nodes[1].as_tag().unwrap();
        assert_eq!(img.name, "img/");
        assert_eq!(img.span, Span::new(1, doc.len() - 1));

        for key in img.attributes.keys() {
            let span = img.key_span(key).unwrap();
            assert_eq!(doc[span.start..span.end].to_lowercase(), *key);
        }

        let alt = img.value_span("alt").unwrap();
        assert_eq!(&doc[alt.start..alt.end], "a b");

        let ismap = img.value_span("ismap").unwrap();
        assert!(ismap.is_empty());
        assert_eq!(&doc[ismap.start..ismap.start + 1], "/");

        assert_eq!(nodes[2].as_text().unwrap().span, Span::new(doc.len() - 1, doc.len()));
    }

    #[test]
    fn test_name_ends_at_first_space_only() {
        let doc = "<a\nhref=\"x.html\"><IMG\tSRC=\"a.gif\"><b  id=c>";
        let nodes = extract_positioned(doc, RawTextElements::default());

        let a = nodes[0].as_tag().unwrap();
        assert_eq!(a.name, "a\nhref=\"x.html\"");
        assert!(a.attributes.is_empty());

        let img = nodes[1].as_tag().unwrap();
        assert_eq!(img.name, "img\tsrc=\"a.gif\"");
        assert!(img.attributes.is_empty());

        let b = nodes[2].as_tag().unwrap();
        assert_eq!(b.name, "b");
        let id = b.value_span("id").unwrap();
        assert_eq!(&doc[id.start..id.end], "c");
    }

    #[test]
    fn test_all_outer_brackets_stripped() {
        let nodes = extract("<<b>", &Options::default());
        assert_eq!(nodes, vec![tag("b")]);

        let nodes = extract("<<b>>", &Options::default());
        assert_eq!(nodes, vec![tag("b"), text(">")]);

        let nodes = extract("<>", &Options::default());
        assert_eq!(nodes, vec![tag("")]);

        let doc = "<<<a href=x>";
        let nodes = extract_positioned(doc, RawTextElements::default());
        let a = nodes[0].as_tag().unwrap();
        assert_eq!(a.name, "a");
        assert_eq!(a.span, Span::new(0, doc.len()));
        let href = a.value_span("href").unwrap();
        assert_eq!(&doc[href.start..href.end], "x");
    }

    #[test]
    fn test_tag_shaped_raw_text_body() {
        let nodes = extract("<script><b></script>", &Options::default());
        assert_eq!(nodes, vec![tag("script"), tag("b"), tag("/script")]);

        let nodes = extract("<style><b> x</style>", &Options::default());
        assert_eq!(nodes, vec![tag("style"), text("<b> x"), tag("/style")]);
    }

    #[test]
    fn test_unterminated_tag_is_text() {
        let nodes = extract_positioned("<tag", RawTextElements::default());
        assert_eq!(
            nodes,
            vec![PositionedNode::Text(PositionedText {
                text: "<tag",
                span: Span::new(0, 4),
            })]
        );
    }
}
