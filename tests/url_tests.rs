//! Locating URLs and writing edits back into the document.

use htmldata::parser::positions::{byte_to_char, byte_to_utf16};
use htmldata::{
    ContentType, Error, Options, Span, UrlEdits, UrlSource, apply_url_edits, find_urls,
    find_urls_with, resolve_urls,
};

#[test]
fn test_find_two_urls() {
    let doc = "<img src=\"a.gif\"><a href=\"b.html\">";
    let matches = find_urls(doc, None, ContentType::Html).unwrap();
    let found: Vec<(&str, &str)> = matches.iter().map(|m| (m.url.as_str(), m.raw(doc))).collect();
    assert_eq!(found, vec![("a.gif", "a.gif"), ("b.html", "b.html")]);
    assert_eq!(matches[1].span, Span::new(26, 32));
}

#[test]
fn test_base_url() {
    let matches = find_urls("<img src=\"a.gif\">", Some("http://x.org/y/"), ContentType::Html).unwrap();
    assert_eq!(matches[0].url, "http://x.org/y/a.gif");
    assert_eq!(matches[0].span, Span::new(10, 15));
}

#[test]
fn test_unquoted_and_spaced_values() {
    let doc = "<a href = \"x.html\"><a href= y.html><a href=z.html>";
    let matches = find_urls(doc, None, ContentType::Html).unwrap();
    // A space before `=` breaks the pair, so only the last two are URLs
    let raws: Vec<&str> = matches.iter().map(|m| m.raw(doc)).collect();
    assert_eq!(raws, vec!["y.html", "z.html"]);
}

#[test]
fn test_match_serialization() {
    let doc = "<a href=x.html>";
    let matches = find_urls(doc, None, ContentType::Html).unwrap();
    let json = serde_json::to_value(&matches[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "span": {"start": 8, "end": 14},
            "url": "x.html",
            "source": {
                "kind": "attribute",
                "tag_index": 0,
                "tag_name": "a",
                "attribute": "href",
                "attributes": {"href": "x.html"},
            },
        })
    );

    let css = find_urls("url(a.png)", None, ContentType::Css).unwrap();
    assert_eq!(css[0].source, UrlSource::Stylesheet);
    assert_eq!(
        serde_json::to_value(&css[0].source).unwrap(),
        serde_json::json!({"kind": "stylesheet"})
    );
}

#[test]
fn test_tag_index_points_into_tag_list() {
    let doc = "<p>one</p><!-- x --><img src=two.gif>";
    let matches = find_urls(doc, None, ContentType::Html).unwrap();
    let nodes = htmldata::extract_simplified(doc);
    let index = matches[0].tag_index().unwrap();
    let tag = nodes[index].as_tag().unwrap();
    assert_eq!(tag.name, "img");
    assert_eq!(Some(&tag.attributes), matches[0].tag_attributes());
}

#[test]
fn test_edit_every_url() {
    let doc = "<link href=\"s.css\"><style>p{background:url(bg.png)}</style><a href=x.html>x</a>";
    let matches = find_urls(doc, None, ContentType::Html).unwrap();
    assert_eq!(matches.len(), 3);

    let edits = UrlEdits::from_fn(&matches, |m| Some(format!("/static/{}", m.url)));
    assert_eq!(edits.len(), 3);
    assert_eq!(
        apply_url_edits(doc, &matches, &edits).unwrap(),
        "<link href=\"/static/s.css\"><style>p{background:url(/static/bg.png)}</style><a href=/static/x.html>x</a>"
    );
}

#[test]
fn test_edit_index_out_of_range() {
    let doc = "<a href=x.html>";
    let matches = find_urls(doc, None, ContentType::Html).unwrap();
    let mut edits = UrlEdits::new();
    edits.set(1, "y.html");
    assert!(apply_url_edits(doc, &matches, &edits).is_err());
}

#[test]
fn test_resolved_urls_written_back() {
    let doc = "<img src=\"../i/a.gif\"> <a href=\"#top\">";
    let out = resolve_urls(doc, "http://x.org/y/z.html", ContentType::Html, &Options::default())
        .unwrap();
    assert_eq!(
        out,
        "<img src=\"http://x.org/i/a.gif\"> <a href=\"http://x.org/y/z.html#top\">"
    );
}

#[test]
fn test_unresolvable_base() {
    let err = find_urls("<a href=x>", Some("relative/base"), ContentType::Html).unwrap_err();
    assert!(matches!(err, Error::Url { .. }));
    assert!(err.to_string().starts_with("Cannot resolve URL 'relative/base'"));
}

#[test]
fn test_multibyte_offsets() {
    let doc = "<p>héllo wörld</p><img src=\"ü.png\">";
    let matches = find_urls_with(doc, None, ContentType::Html, &Options::default()).unwrap();
    let span = matches[0].span;
    assert_eq!(&doc[span.start..span.end], "ü.png");
    assert_eq!(byte_to_char(doc, span.start), 28);
    assert_eq!(byte_to_utf16(doc, span.start), 28);
    assert_eq!(span.start, 30);
}

#[test]
fn test_only_a_space_separates_attributes() {
    assert!(find_urls("<img\tsrc=\"a.gif\">", None, ContentType::Html).unwrap().is_empty());
    assert!(find_urls("<a\nhref=x.html>", None, ContentType::Html).unwrap().is_empty());

    let matches = find_urls("<<img  src=a.gif>>", None, ContentType::Html).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].span, Span::new(11, 16));
}
