//! Tag list back to HTML.
//!
//! The output is functionally equivalent to the parsed document: tag names
//! lowercased, attributes sorted by key, values double-quoted. Text passes
//! through verbatim.

use crate::Options;
use crate::ast::{AttrValue, Node, Tag};
use crate::html::{COMMENT_CLOSE, COMMENT_OPEN};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in attribute values when values are percent-coded
const VALUE_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'/');

/// Renders a tag list as HTML
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlGenerator {
    /// Percent-encode attribute values (inverse of decoding on extraction)
    pub encode_values: bool,
}

impl HtmlGenerator {
    pub fn new(options: &Options) -> Self {
        Self {
            encode_values: options.decode_values,
        }
    }

    pub fn generate(&self, nodes: &[Node]) -> String {
        let mut output = String::new();
        for node in nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Tag(tag) => self.write_tag(&mut output, tag),
            }
        }
        output
    }

    fn write_tag(&self, output: &mut String, tag: &Tag) {
        if tag.is_comment_open() {
            output.push_str(COMMENT_OPEN);
            return;
        }
        if tag.is_comment_close() {
            output.push_str(COMMENT_CLOSE);
            return;
        }

        output.push('<');
        output.push_str(tag.base_name());
        // BTreeMap iteration is key-sorted
        for (key, value) in &tag.attributes {
            output.push(' ');
            output.push_str(key);
            if let AttrValue::Present(value) = value {
                output.push_str("=\"");
                if self.encode_values {
                    output.extend(utf8_percent_encode(value, VALUE_ESCAPES));
                } else {
                    output.push_str(value);
                }
                output.push('"');
            }
        }
        if tag.is_self_closing() {
            output.push_str(" /");
        }
        output.push('>');
    }
}

/// Render `nodes` as HTML without percent-encoding values.
pub fn serialize(nodes: &[Node]) -> String {
    HtmlGenerator::default().generate(nodes)
}

/// Render `nodes` as HTML, percent-encoding values when `options` decodes them.
pub fn serialize_with(nodes: &[Node], options: &Options) -> String {
    HtmlGenerator::new(options).generate(nodes)
}
