//! # Parsing
//!
//! Rope in, [`ParsedDoc`] out. Blocks are built in a single forward pass
//! over the lines; inline trees are built on demand per block with
//! [`parse_inline_for_block`].

pub mod blocks;
pub mod inline;
pub mod rope;
pub mod snapshot;
pub mod tree;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

use blocks::{BlockBuilder, BlockNode, MarkdownLineClassifier, ReferenceMap};
use inline::InlineTree;
use rope::{lines_with_spans, span::Span};
use tree::{DepthTree, NodeId};

/// Knobs for a parse. Everything else about the grammar is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Columns a tab advances to when measuring indentation.
    pub tab_width: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { tab_width: 4 }
    }
}

#[derive(Debug)]
pub struct ParsedDoc {
    pub blocks: DepthTree<BlockNode>,
    /// First definition per label, resolved after the block pass.
    pub references: ReferenceMap,
}

pub fn parse_document(rope: &Rope) -> ParsedDoc {
    parse_document_with(rope, &ParseOptions::default())
}

pub fn parse_document_with(rope: &Rope, options: &ParseOptions) -> ParsedDoc {
    let classifier = MarkdownLineClassifier::new(options.tab_width);
    let mut builder = BlockBuilder::new();

    for lr in lines_with_spans(rope) {
        let line = classifier.classify(&lr);
        builder.push(&line);
    }

    let blocks = builder.finish();
    let references = ReferenceMap::resolve(&blocks);
    log::debug!(
        "parsed {} blocks, {} reference definitions",
        blocks.len(),
        references.len()
    );
    ParsedDoc { blocks, references }
}

/// The spans holding inline content for `node`, if it has any.
///
/// Only paragraphs and headers carry inline content; code and fences are raw
/// zones and containers have no text of their own.
pub fn inline_lines(doc: &ParsedDoc, node: NodeId) -> Option<Vec<Span>> {
    match doc.blocks.get(node) {
        BlockNode::Paragraph(p) if !p.lines.is_empty() => Some(p.lines.clone()),
        BlockNode::Header(h) => Some(vec![h.text]),
        _ => None,
    }
}

/// Convenience: builds the inline tree for one block of a parsed document.
pub fn parse_inline_for_block(rope: &Rope, doc: &ParsedDoc, node: NodeId) -> Option<InlineTree> {
    let lines = inline_lines(doc, node)?;
    Some(inline::parse_inline(rope, &lines, &doc.references))
}
