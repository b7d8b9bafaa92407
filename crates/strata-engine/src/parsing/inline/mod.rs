//! # Inline Parsing
//!
//! Inline parsing runs per block, after the block tree is complete, over the
//! content lines of paragraphs and headers.
//!
//! ## Architecture
//!
//! 1. **Recognition** (`recognizer`): the block's lines produce two ordered
//!    streams: literal text (one span per line, soft breaks between) and
//!    recognized structures (code spans, emphasis, links, images).
//! 2. **Merge** (`tree_builder`): the streams are fused into an
//!    [`InlineTree`] in which every structure's content is covered exactly by
//!    its children.
//!
//! ## Modules
//!
//! - **`types`**: `TextInlineNode`, `NonTextInlineNode`, `InlineNode`
//! - **`kinds`**: inline delimiters (CodeSpan, Emphasis, Link)
//! - **`cursor`**: `Cursor` over one scope of the joined block text
//! - **`recognizer`**: `recognize()` producing `InlineStreams`
//! - **`tree_builder`**: `build_inline_tree()`
//!
//! ## Raw Zone Precedence
//!
//! Code spans take precedence: `` `*not emphasis*` `` is a single code span.

pub mod cursor;
pub mod kinds;
pub mod recognizer;
pub mod tree_builder;
pub mod types;

use xi_rope::Rope;

use crate::parsing::{blocks::ReferenceMap, rope::span::Span};

pub use recognizer::{InlineStreams, recognize};
pub use tree_builder::build_inline_tree;
pub use types::{InlineNode, InlineTree, NonTextInlineNode, NonTextKind, TextInlineNode, TextKind};

/// Recognizes and merges the inline content of `lines` in one go.
pub fn parse_inline(rope: &Rope, lines: &[Span], refs: &ReferenceMap) -> InlineTree {
    let InlineStreams { texts, non_texts } = recognize(rope, lines, refs);
    build_inline_tree(texts, non_texts)
}
