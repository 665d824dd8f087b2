pub mod attributes;
mod extractor;
pub mod positions;
pub mod tokenizer;

pub use attributes::{ParsedAttributes, build_attrs, split_attrs};
pub use extractor::{extract, extract_positioned};
pub use tokenizer::{Tokenizer, tokenize};

use crate::Options;
use crate::ast::{Node, PositionedNode, Token};

/// Document parser
pub struct HtmlParser {
    // Configuration only, no state
    options: Options,
}

impl HtmlParser {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn tokenize<'a>(&self, source: &'a str) -> Vec<Token<'a>> {
        tokenize(source, self.options.raw_text)
    }

    pub fn extract_positioned<'a>(&self, source: &'a str) -> Vec<PositionedNode<'a>> {
        extract_positioned(source, self.options.raw_text)
    }

    pub fn extract(&self, source: &str) -> Vec<Node> {
        extract(source, &self.options)
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
