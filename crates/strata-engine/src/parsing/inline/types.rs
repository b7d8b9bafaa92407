use serde::Serialize;

use crate::parsing::{
    blocks::kinds::ReferenceDefinition, rope::span::Span, tree::DepthTree,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextKind {
    Text,
    /// The separator between two content lines of a block, including any
    /// container prefix (`> `, list indentation) on the following line.
    SoftBreak,
}

/// A run of literal text. Byte offsets into the rope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextInlineNode {
    pub kind: TextKind,
    pub start: usize,
    pub end: usize,
}

impl TextInlineNode {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NonTextKind {
    Code,
    /// `level` is 1 for `*a*`, 2 for `**a**`.
    Emphasis { level: u8 },
    Link { definition: ReferenceDefinition },
    Image { definition: ReferenceDefinition },
}

/// A recognized structure. `start..end` covers its delimiters, `content`
/// the part whose text becomes its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonTextInlineNode {
    pub kind: NonTextKind,
    pub start: usize,
    pub end: usize,
    pub content: Span,
}

impl NonTextInlineNode {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    Text(TextInlineNode),
    NonText(NonTextInlineNode),
}

impl InlineNode {
    /// Full span, delimiters included.
    pub fn span(&self) -> Span {
        match self {
            InlineNode::Text(t) => t.span(),
            InlineNode::NonText(n) => n.span(),
        }
    }
}

/// The inline content of one block.
pub type InlineTree = DepthTree<InlineNode>;
